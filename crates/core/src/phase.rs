// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Canonical pipeline phases and current-phase identity.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Sentinel `current_phase` value written once the critic accepts (or the
/// loop budget is exhausted) and the run is being finalized.
pub const FINALIZED: &str = "finalized";

/// A phase of the pipeline, in canonical execution and display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    DataProfiling,
    FeatureEngineering,
    Visualization,
    ModelTraining,
    Evaluation,
    CriticReview,
}

impl Phase {
    /// Every phase, in canonical order. Iteration order of this array is the
    /// only source of phase ordering; map iteration order is never used.
    pub const ALL: [Phase; 6] = [
        Phase::DataProfiling,
        Phase::FeatureEngineering,
        Phase::Visualization,
        Phase::ModelTraining,
        Phase::Evaluation,
        Phase::CriticReview,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::DataProfiling => "data_profiling",
            Phase::FeatureEngineering => "feature_engineering",
            Phase::Visualization => "visualization",
            Phase::ModelTraining => "model_training",
            Phase::Evaluation => "evaluation",
            Phase::CriticReview => "critic_review",
        }
    }

    /// Parse a canonical phase name. Composite timing keys do not parse.
    pub fn parse(s: &str) -> Option<Phase> {
        Phase::ALL.into_iter().find(|p| p.as_str() == s)
    }

    /// Position in canonical order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether the orchestrator may execute this phase more than once per run.
    ///
    /// Only the critic review re-enters: each review records its own
    /// `critic_review_<n>` timing.
    pub fn is_reenterable(self) -> bool {
        matches!(self, Phase::CriticReview)
    }

    pub fn meta(self) -> &'static PhaseMeta {
        &PHASE_TABLE[self.index()]
    }
}

crate::simple_display! {
    Phase {
        DataProfiling => "data_profiling",
        FeatureEngineering => "feature_engineering",
        Visualization => "visualization",
        ModelTraining => "model_training",
        Evaluation => "evaluation",
        CriticReview => "critic_review",
    }
}

/// Display metadata for a phase. Not used by the projection itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseMeta {
    pub phase: Phase,
    pub label: &'static str,
    pub description: &'static str,
    /// Icon key understood by the presentation layer.
    pub icon: &'static str,
}

/// Phase metadata, indexed by [`Phase::index`].
pub static PHASE_TABLE: [PhaseMeta; 6] = [
    PhaseMeta {
        phase: Phase::DataProfiling,
        label: "Data Profiling",
        description: "Shape, types, missing values and correlations of the input dataset",
        icon: "chart-bar",
    },
    PhaseMeta {
        phase: Phase::FeatureEngineering,
        label: "Feature Engineering",
        description: "Derived features generated and validated in the sandbox",
        icon: "wrench",
    },
    PhaseMeta {
        phase: Phase::Visualization,
        label: "Visualization",
        description: "Exploratory plots and the insights drawn from them",
        icon: "chart-line",
    },
    PhaseMeta {
        phase: Phase::ModelTraining,
        label: "Model Training",
        description: "Candidate models trained and cross-validated",
        icon: "cpu",
    },
    PhaseMeta {
        phase: Phase::Evaluation,
        label: "Evaluation",
        description: "Held-out metrics and overfitting check for the best model",
        icon: "check-circle",
    },
    PhaseMeta {
        phase: Phase::CriticReview,
        label: "Critic Review",
        description: "Review of the results; finalizes or loops back to an earlier phase",
        icon: "eye",
    },
];

/// Identity of the phase the orchestrator reports as current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentPhase {
    /// One of the canonical phases.
    Canonical(Phase),
    /// The terminal accept/stop decision has been made.
    Finalized,
    /// Anything else, including an absent value (empty string) and the
    /// orchestrator's bookkeeping markers such as `queued` or `initialized`.
    Unknown(String),
}

impl CurrentPhase {
    pub fn parse(raw: Option<&str>) -> CurrentPhase {
        match raw {
            None => CurrentPhase::Unknown(String::new()),
            Some(FINALIZED) => CurrentPhase::Finalized,
            Some(s) => match Phase::parse(s) {
                Some(phase) => CurrentPhase::Canonical(phase),
                None => CurrentPhase::Unknown(s.to_string()),
            },
        }
    }

    /// Canonical index of the current phase, if it names one.
    pub fn index(&self) -> Option<usize> {
        match self {
            CurrentPhase::Canonical(phase) => Some(phase.index()),
            CurrentPhase::Finalized | CurrentPhase::Unknown(_) => None,
        }
    }

    pub fn phase(&self) -> Option<Phase> {
        match self {
            CurrentPhase::Canonical(phase) => Some(*phase),
            CurrentPhase::Finalized | CurrentPhase::Unknown(_) => None,
        }
    }

    pub fn is_finalized(&self) -> bool {
        matches!(self, CurrentPhase::Finalized)
    }

    pub fn as_str(&self) -> &str {
        match self {
            CurrentPhase::Canonical(phase) => phase.as_str(),
            CurrentPhase::Finalized => FINALIZED,
            CurrentPhase::Unknown(s) => s,
        }
    }
}

impl Default for CurrentPhase {
    fn default() -> Self {
        CurrentPhase::Unknown(String::new())
    }
}

impl std::fmt::Display for CurrentPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CurrentPhase {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CurrentPhase {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(CurrentPhase::parse(raw.as_deref()))
    }
}

#[cfg(test)]
#[path = "phase_tests.rs"]
mod tests;
