// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output specs

use crate::prelude::*;

#[test]
fn pw_no_args_shows_usage_and_fails() {
    cli().fails().exit_code(2).stderr_has("Usage:");
}

#[test]
fn pw_help_lists_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("health")
        .stdout_has("run")
        .stdout_has("status")
        .stdout_has("watch")
        .stdout_has("artifact")
        .stdout_has("phases")
        .stdout_has("graph");
}

#[test]
fn pw_artifact_help_shows_subcommands() {
    cli().args(&["artifact", "--help"]).passes().stdout_has("list").stdout_has("get");
}

#[test]
fn pw_run_help_shows_options() {
    cli()
        .args(&["run", "--help"])
        .passes()
        .stdout_has("--dataset")
        .stdout_has("--max-loops")
        .stdout_has("--watch");
}

#[test]
fn pw_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2.0");
}

#[test]
fn pw_run_rejects_out_of_range_loops() {
    cli().args(&["run", "--max-loops", "11"]).fails().exit_code(2).stderr_has("--max-loops");
}
