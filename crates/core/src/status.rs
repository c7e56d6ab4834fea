// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Overall run status as reported by the orchestrator.

use serde::{Deserialize, Serialize};

/// Overall status of a pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    #[default]
    Pending,
    Running,
    Completed,
    CompletedWithErrors,
    Failed,
    /// Any status string this client does not recognize.
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// Parse a wire status string; unrecognized values are `Unknown`.
    pub fn parse(s: &str) -> RunStatus {
        match s {
            "pending" => RunStatus::Pending,
            "running" => RunStatus::Running,
            "completed" => RunStatus::Completed,
            "completed_with_errors" => RunStatus::CompletedWithErrors,
            "failed" => RunStatus::Failed,
            _ => RunStatus::Unknown,
        }
    }

    /// Terminal runs never change again; polling stops once one is observed.
    pub fn is_terminal(self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::CompletedWithErrors | RunStatus::Failed)
    }

    pub fn is_running(self) -> bool {
        matches!(self, RunStatus::Running)
    }
}

crate::simple_display! {
    RunStatus {
        Pending => "pending",
        Running => "running",
        Completed => "completed",
        CompletedWithErrors => "completed_with_errors",
        Failed => "failed",
        Unknown => "unknown",
    }
}
