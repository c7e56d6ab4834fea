// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn create_request_omits_unset_fields() {
    let json = serde_json::to_string(&CreateRunRequest::new()).unwrap();
    assert_eq!(json, "{}");
}

#[test]
fn create_request_setters() {
    let req = CreateRunRequest::new()
        .dataset_path("/data/titanic.csv")
        .objectives("Predict survival")
        .dataset_format(DatasetFormat::Parquet)
        .max_loops(2u8);

    let value = serde_json::to_value(&req).unwrap();
    assert_eq!(value["dataset_path"], "/data/titanic.csv");
    assert_eq!(value["objectives"], "Predict survival");
    assert_eq!(value["dataset_format"], "parquet");
    assert_eq!(value["max_loops"], 2);
    assert!(value.get("llm_provider").is_none());
}

#[test]
fn run_created_accepts_pipeline_id() {
    let json = r#"{"pipeline_id":"abc","status":"accepted","message":"Pipeline abc started."}"#;
    let created: RunCreated = serde_json::from_str(json).unwrap();
    assert_eq!(created.run_id, "abc");
    assert_eq!(created.status, "accepted");
}

#[test]
fn run_summary_defaults_missing_fields() {
    let summary: RunSummary = serde_json::from_str(r#"{"pipeline_id":"p1"}"#).unwrap();
    assert_eq!(summary.run_id, "p1");
    assert_eq!(summary.current_phase, "");
}

#[test]
fn artifact_list_parses() {
    let json = r#"{"pipeline_id":"p1","artifacts":["model.pkl","plots/dist.png"]}"#;
    let list: ArtifactList = serde_json::from_str(json).unwrap();
    assert_eq!(list.artifacts.len(), 2);
}

#[test]
fn health_reports_healthy() {
    let json = r#"{"status":"healthy","version":"0.1.0","llm_provider":"anthropic","sandbox_type":"subprocess"}"#;
    let health: Health = serde_json::from_str(json).unwrap();
    assert!(health.is_healthy());
}

#[test]
fn api_error_message_handles_structured_detail() {
    let e: ApiError = serde_json::from_str(r#"{"detail":"Pipeline not found: x"}"#).unwrap();
    assert_eq!(e.message(), "Pipeline not found: x");

    let e: ApiError = serde_json::from_str(r#"{"detail":[{"msg":"field required"}]}"#).unwrap();
    assert_eq!(e.message(), r#"[{"msg":"field required"}]"#);
}

#[test]
fn routes_are_prefixed() {
    assert_eq!(routes::health(), "/api/v1/health");
    assert_eq!(routes::run("r1"), "/api/v1/pipelines/r1");
    assert_eq!(routes::plot("r1", "roc.png"), "/api/v1/pipelines/r1/plots/roc.png");
    assert_eq!(routes::graph_mermaid(), "/api/v1/graph/mermaid");
}

#[yare::parameterized(
    plain     = { "roc_curve.png", true },
    dotted    = { "model.v2.pkl",  true },
    empty     = { "",              false },
    traversal = { "../secrets",    false },
    nested    = { "plots/roc.png", false },
    windows   = { "a\\b.png",      false },
    dotdot    = { "..",            false },
)]
fn artifact_names(name: &str, ok: bool) {
    assert_eq!(validate_artifact_name(name).is_ok(), ok);
}

#[yare::parameterized(
    absolute = { "/tmp/ml-pipeline/artifacts/p1/plots/roc_curve.png", "roc_curve.png" },
    relative = { "plots/dist.png",                                    "dist.png" },
    bare     = { "model.pkl",                                         "model.pkl" },
    windows  = { "C:\\runs\\p1\\model.pkl",                           "model.pkl" },
    trailing = { "plots/",                                            "plots" },
)]
fn file_name_strips_directories(path: &str, expected: &str) {
    assert_eq!(routes::file_name(path), expected);
}

#[test]
fn listed_paths_become_downloadable_names() {
    let json = r#"{"pipeline_id":"p1","artifacts":[
        "/tmp/ml-pipeline/artifacts/p1/plots/roc_curve.png",
        "/tmp/ml-pipeline/artifacts/p1/model.pkl"
    ]}"#;
    let list: ArtifactList = serde_json::from_str(json).unwrap();

    let names: Vec<&str> = list.file_names().collect();
    assert_eq!(names, vec!["roc_curve.png", "model.pkl"]);
    assert!(names.iter().all(|n| validate_artifact_name(n).is_ok()));
}
