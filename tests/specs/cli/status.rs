// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pw status --file` specs: projecting saved status responses.

use crate::prelude::*;

fn looping_run() -> Value {
    json!({
        "pipeline_id": "3f0c9a2b",
        "status": "running",
        "current_phase": "feature_engineering",
        "loop_count": 1,
        "phase_timings": {
            "data_profiling": 1.0,
            "feature_engineering": 2.0,
            "visualization": 2.0,
            "model_training": 5.0,
            "evaluation": 1.0,
            "critic_review_1": 2.0
        },
        "errors": []
    })
}

#[test]
fn text_timeline_for_a_loop_back() {
    let file = SnapshotFile::new(&looping_run());
    cli().args(&["status", "--file", file.path()]).passes().stdout_eq(
        "\
Run 3f0c9a2b running  phase: feature_engineering  loops: 1
  ● Data Profiling        completed   1.0s
  ◐ Feature Engineering   running     2.0s
  ↻ Visualization         will_rerun  2.0s
  ↻ Model Training        will_rerun  5.0s
  ↻ Evaluation            will_rerun  1.0s
  ● Critic Review         completed   2.0s
",
    );
}

#[test]
fn json_view_has_one_entry_per_phase() {
    let file = SnapshotFile::new(&looping_run());
    let view = cli().args(&["status", "--file", file.path(), "--output", "json"]).passes().json();

    let statuses: Vec<&str> =
        view["phases"].as_array().unwrap().iter().map(|p| p["status"].as_str().unwrap()).collect();
    assert_eq!(
        statuses,
        vec!["completed", "running", "will_rerun", "will_rerun", "will_rerun", "completed"]
    );
    assert_eq!(view["phases"][5]["count"], 1);
    assert_eq!(view["run_id"], "3f0c9a2b");
}

#[test]
fn reads_snapshot_from_stdin() {
    let body = json!({
        "run_id": "r2",
        "status": "failed",
        "current_phase": "model_training",
        "phase_timings": {"data_profiling": 1.0},
        "errors": [{"phase": "model_training", "error_type": "ExecutionError", "error": "oom"}, "sandbox crashed"]
    });
    cli()
        .args(&["status", "--file", "-"])
        .stdin(&body.to_string())
        .passes()
        .stdout_has("Run r2 failed")
        .stdout_has("  ✗ Model Training        error       oom")
        .stdout_has("Errors:\n  [model_training] oom\n  sandbox crashed\n");
}

#[test]
fn malformed_fields_still_render() {
    let file = SnapshotFile::new(&json!({
        "status": 7,
        "current_phase": null,
        "loop_count": "two",
        "phase_timings": {"data_profiling": "fast", "mystery_phase": 3.0},
        "errors": "boom"
    }));
    cli()
        .args(&["status", "--file", file.path()])
        .passes()
        .stdout_has("unknown")
        .stdout_has("  ○ Data Profiling        pending")
        .stdout_lacks("mystery")
        .stdout_has("Errors:\n  boom\n");
}

#[test]
fn invalid_json_fails() {
    let file = SnapshotFile::raw("{not json");
    cli().args(&["status", "--file", file.path()]).fails().exit_code(1).stderr_has("is not valid JSON");
}

#[test]
fn status_needs_run_id_or_file() {
    cli().args(&["status"]).fails().exit_code(2);
}
