// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Projected, render-ready view of a run.

use crate::id::RunId;
use crate::phase::{CurrentPhase, Phase};
use crate::snapshot::TokenUsage;
use crate::status::RunStatus;
use serde::Serialize;

/// Display status of a single phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    Pending,
    Running,
    Completed,
    Error,
    /// Output from an earlier pass that an in-progress loop-back will recompute.
    WillRerun,
}

crate::simple_display! {
    PhaseStatus {
        Pending => "pending",
        Running => "running",
        Completed => "completed",
        Error => "error",
        WillRerun => "will_rerun",
    }
}

/// One row of the timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseView {
    pub phase: Phase,
    pub status: PhaseStatus,
    /// Aggregated elapsed seconds, when any timing was recorded.
    pub duration_seconds: Option<f64>,
    /// Number of recorded executions; only set for the re-enterable phase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// Last error attributed to this phase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// The snapshot carried a result payload for this phase.
    pub has_output: bool,
}

/// Fully-resolved timeline for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunView {
    pub run_id: RunId,
    pub status: RunStatus,
    pub current_phase: CurrentPhase,
    pub loop_count: u32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub objectives: String,
    /// Exactly one entry per canonical phase, in canonical order.
    pub phases: Vec<PhaseView>,
    /// Every snapshot error, rendered, in snapshot order.
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_usage: Option<TokenUsage>,
}

impl RunView {
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn phase(&self, phase: Phase) -> Option<&PhaseView> {
        self.phases.iter().find(|v| v.phase == phase)
    }

    pub fn completed_count(&self) -> usize {
        self.phases.iter().filter(|v| v.status == PhaseStatus::Completed).count()
    }

    /// Total recorded seconds across all phases.
    pub fn total_seconds(&self) -> f64 {
        self.phases.iter().filter_map(|v| v.duration_seconds).sum()
    }
}
