// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Raw run snapshot as returned by the orchestrator's status endpoint.
//!
//! Parsing is total: any JSON value yields a snapshot. Missing, `null` or
//! wrongly-typed fields fall back to their defaults instead of failing, so a
//! half-written status record still renders.

use crate::id::RunId;
use crate::phase::Phase;
use crate::run_error::ErrorEntry;
use crate::status::RunStatus;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One polled snapshot of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct RawSnapshot {
    pub run_id: RunId,
    pub status: RunStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_phase: Option<String>,
    pub loop_count: u32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub objectives: String,
    pub phase_timings: IndexMap<String, Value>,
    pub errors: Vec<ErrorEntry>,
    #[serde(flatten)]
    pub outputs: PhaseOutputs,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_usage: Option<TokenUsage>,
}

/// Opaque per-phase result payloads. Presence means the phase produced output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PhaseOutputs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_profile: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_engineering: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visualizations: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critic_decisions: Option<Value>,
}

impl PhaseOutputs {
    /// Snapshot field carrying the payload of a phase.
    pub fn field(phase: Phase) -> &'static str {
        match phase {
            Phase::DataProfiling => "data_profile",
            Phase::FeatureEngineering => "feature_engineering",
            Phase::Visualization => "visualizations",
            Phase::ModelTraining => "model",
            Phase::Evaluation => "evaluation",
            Phase::CriticReview => "critic_decisions",
        }
    }

    pub fn get(&self, phase: Phase) -> Option<&Value> {
        match phase {
            Phase::DataProfiling => self.data_profile.as_ref(),
            Phase::FeatureEngineering => self.feature_engineering.as_ref(),
            Phase::Visualization => self.visualizations.as_ref(),
            Phase::ModelTraining => self.model.as_ref(),
            Phase::Evaluation => self.evaluation.as_ref(),
            Phase::CriticReview => self.critic_decisions.as_ref(),
        }
    }

    fn slot(&mut self, phase: Phase) -> &mut Option<Value> {
        match phase {
            Phase::DataProfiling => &mut self.data_profile,
            Phase::FeatureEngineering => &mut self.feature_engineering,
            Phase::Visualization => &mut self.visualizations,
            Phase::ModelTraining => &mut self.model,
            Phase::Evaluation => &mut self.evaluation,
            Phase::CriticReview => &mut self.critic_decisions,
        }
    }

    pub fn set(&mut self, phase: Phase, payload: Value) {
        *self.slot(phase) = Some(payload).filter(|v| !v.is_null());
    }
}

/// LLM token accounting attached to live snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
    #[serde(default)]
    pub llm_calls: u64,
}

impl RawSnapshot {
    /// Whether the snapshot carries a result payload for `phase`.
    pub fn has_output(&self, phase: Phase) -> bool {
        self.outputs.get(phase).is_some()
    }
}

impl From<Value> for RawSnapshot {
    fn from(value: Value) -> Self {
        let Value::Object(mut obj) = value else {
            return RawSnapshot::default();
        };

        let run_id = take_str(&mut obj, "run_id")
            .or_else(|| take_str(&mut obj, "pipeline_id"))
            .map(RunId::from)
            .unwrap_or_default();

        let status = match obj.remove("status") {
            Some(Value::String(s)) => RunStatus::parse(&s),
            Some(Value::Null) | None => RunStatus::Pending,
            Some(_) => RunStatus::Unknown,
        };

        let loop_count = obj
            .get("loop_count")
            .and_then(Value::as_u64)
            .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
            .unwrap_or(0);

        let phase_timings = match obj.remove("phase_timings") {
            Some(Value::Object(map)) => map.into_iter().collect(),
            _ => IndexMap::new(),
        };

        let errors = match obj.remove("errors") {
            Some(Value::Array(items)) => items.into_iter().map(ErrorEntry::from).collect(),
            Some(Value::Null) | None => Vec::new(),
            Some(single) => vec![ErrorEntry::from(single)],
        };

        let mut outputs = PhaseOutputs::default();
        for phase in Phase::ALL {
            if let Some(payload) = obj.remove(PhaseOutputs::field(phase)) {
                outputs.set(phase, payload);
            }
        }

        let token_usage =
            obj.remove("token_usage").and_then(|v| serde_json::from_value::<TokenUsage>(v).ok());

        RawSnapshot {
            run_id,
            status,
            current_phase: take_str(&mut obj, "current_phase"),
            loop_count,
            objectives: take_str(&mut obj, "objectives").unwrap_or_default(),
            phase_timings,
            errors,
            outputs,
            token_usage,
        }
    }
}

fn take_str(obj: &mut Map<String, Value>, key: &str) -> Option<String> {
    match obj.remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
