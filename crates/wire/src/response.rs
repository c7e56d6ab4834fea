// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use pw_core::RunId;
use serde::{Deserialize, Serialize};

/// Response to `POST /pipelines`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunCreated {
    #[serde(alias = "pipeline_id")]
    pub run_id: RunId,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// Entry of `GET /pipelines`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(alias = "pipeline_id")]
    pub run_id: RunId,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub current_phase: String,
    #[serde(default)]
    pub objectives: String,
}

/// Response to `GET /pipelines/{id}/artifacts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactList {
    #[serde(alias = "pipeline_id")]
    pub run_id: RunId,
    #[serde(default)]
    pub artifacts: Vec<String>,
}

impl ArtifactList {
    /// Bare file names of the listed paths, in listing order.
    ///
    /// The orchestrator lists full server-side paths; downloads are addressed
    /// by file name only.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.artifacts.iter().map(|path| crate::routes::file_name(path))
    }
}

/// Entry of `GET /pipelines/{id}/plots`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotEntry {
    pub filename: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

/// Response to `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub llm_provider: String,
    #[serde(default)]
    pub sandbox_type: String,
}

impl Health {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub detail: serde_json::Value,
}

impl ApiError {
    /// The detail as display text; validation errors arrive as structured JSON.
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
