// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Route paths, relative to the API base URL (`.../api/v1`).

use thiserror::Error;

pub const API_PREFIX: &str = "/api/v1";

pub fn health() -> String {
    format!("{API_PREFIX}/health")
}

pub fn runs() -> String {
    format!("{API_PREFIX}/pipelines")
}

pub fn run(id: &str) -> String {
    format!("{API_PREFIX}/pipelines/{id}")
}

pub fn artifacts(id: &str) -> String {
    format!("{API_PREFIX}/pipelines/{id}/artifacts")
}

pub fn plots(id: &str) -> String {
    format!("{API_PREFIX}/pipelines/{id}/plots")
}

pub fn plot(id: &str, filename: &str) -> String {
    format!("{API_PREFIX}/pipelines/{id}/plots/{filename}")
}

/// Pipeline topology as a Mermaid definition (plain text).
pub fn graph_mermaid() -> String {
    format!("{API_PREFIX}/graph/mermaid")
}

/// Rejected artifact name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("artifact name is empty")]
    Empty,
    #[error("artifact name must be a bare filename: {0}")]
    NotBare(String),
}

/// Last component of a server-side path, accepting either separator.
pub fn file_name(path: &str) -> &str {
    path.trim_end_matches(['/', '\\']).rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Artifacts are addressed by bare filename; the orchestrator refuses paths.
pub fn validate_artifact_name(name: &str) -> Result<&str, NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(NameError::NotBare(name.to_string()));
    }
    Ok(name)
}
