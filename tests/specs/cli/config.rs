// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration and connection failure specs. No orchestrator is running.

use crate::prelude::*;

/// Nothing listens on port 1 locally, so connections are refused at once.
const DEAD_URL: &str = "http://127.0.0.1:1";

#[test]
fn unreachable_orchestrator_gets_a_hint() {
    cli()
        .args(&["health", "--url", DEAD_URL])
        .fails()
        .exit_code(1)
        .stderr_has("is the orchestrator running?");
}

#[test]
fn url_from_environment_is_used() {
    cli().args(&["list"]).env("PW_URL", DEAD_URL).fails().stderr_has("is the orchestrator running?");
}

#[test]
fn invalid_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = config_file(dir.path(), "poll_interval_ms = \"soon\"\n");
    cli()
        .args(&["health"])
        .env("PW_CONFIG", &path)
        .fails()
        .stderr_has("invalid config file");
}

#[test]
fn invalid_env_value_is_reported() {
    cli()
        .args(&["health"])
        .env("PW_POLL_MS", "2s")
        .fails()
        .stderr_has("invalid value for PW_POLL_MS");
}

#[test]
fn artifact_names_must_be_bare() {
    cli()
        .args(&["artifact", "get", "r1", "../../etc/passwd", "--url", DEAD_URL])
        .fails()
        .stderr_has("bare filename");
}

#[test]
fn graph_needs_the_orchestrator() {
    cli()
        .args(&["graph", "--url", DEAD_URL])
        .fails()
        .exit_code(1)
        .stderr_has("is the orchestrator running?");
}
