// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pw phases` specs

use crate::prelude::*;

#[test]
fn lists_phases_in_order() {
    let out = cli().args(&["phases"]).passes();
    let labels: Vec<&str> = out
        .stdout
        .lines()
        .filter_map(|l| l.split_once(". ").map(|(_, rest)| rest))
        .map(|rest| rest.split("  ").next().unwrap_or_default().trim())
        .collect();
    assert_eq!(
        labels,
        vec![
            "Data Profiling",
            "Feature Engineering",
            "Visualization",
            "Model Training",
            "Evaluation",
            "Critic Review"
        ]
    );
}

#[test]
fn json_output_carries_metadata() {
    let out = cli().args(&["phases", "--output", "json"]).passes();
    let phases = out.json();
    assert_eq!(phases.as_array().map(Vec::len), Some(6));
    assert_eq!(phases[0]["phase"], "data_profiling");
    assert_eq!(phases[5]["phase"], "critic_review");
    assert_eq!(phases[5]["icon"], "eye");
}

#[test]
fn phases_ignore_broken_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = config_file(dir.path(), "this is not toml");
    cli().args(&["phases"]).env("PW_CONFIG", path).passes().stdout_has("Critic Review");
}
