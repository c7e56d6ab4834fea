// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};

/// Input dataset file format accepted by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetFormat {
    Csv,
    Parquet,
    Json,
}

pw_core::simple_display! {
    DatasetFormat {
        Csv => "csv",
        Parquet => "parquet",
        Json => "json",
    }
}

/// Body of `POST /pipelines`.
///
/// Every field is optional on the client side. Omitted fields are left out of
/// the body entirely so the orchestrator's own defaults apply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateRunRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objectives: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_format: Option<DatasetFormat>,
    /// Critic loop budget (the orchestrator accepts 1..=10).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_loops: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_provider: Option<String>,
}

impl CreateRunRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pw_core::setters! {
        option {
            dataset_path: String,
            objectives: String,
            dataset_format: DatasetFormat,
            max_loops: u8,
            llm_provider: String,
        }
    }
}
