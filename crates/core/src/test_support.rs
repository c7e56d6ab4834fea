// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{ErrorEntry, Phase, RawSnapshot, RunId, RunStatus};
use serde_json::{json, Value};

// ── Snapshot builder ────────────────────────────────────────────────────

/// Builder for [`RawSnapshot`] values in tests.
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    snapshot: RawSnapshot,
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self {
            snapshot: RawSnapshot { run_id: RunId::new("run-test"), ..RawSnapshot::default() },
        }
    }
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run_id(mut self, id: &str) -> Self {
        self.snapshot.run_id = RunId::new(id);
        self
    }

    pub fn status(mut self, status: RunStatus) -> Self {
        self.snapshot.status = status;
        self
    }

    pub fn current(mut self, phase: &str) -> Self {
        self.snapshot.current_phase = Some(phase.to_string());
        self
    }

    pub fn loop_count(mut self, n: u32) -> Self {
        self.snapshot.loop_count = n;
        self
    }

    /// Record a timing under a raw key (bare or composite).
    pub fn timing(mut self, key: &str, seconds: f64) -> Self {
        self.snapshot.phase_timings.insert(key.to_string(), json!(seconds));
        self
    }

    pub fn raw_timing(mut self, key: &str, value: Value) -> Self {
        self.snapshot.phase_timings.insert(key.to_string(), value);
        self
    }

    /// Record one second for each phase, in canonical order, up to and
    /// including `last`.
    pub fn ran_through(mut self, last: Phase) -> Self {
        for phase in Phase::ALL.into_iter().take(last.index() + 1) {
            self = self.timing(phase.as_str(), 1.0);
        }
        self
    }

    pub fn error(mut self, message: &str) -> Self {
        self.snapshot.errors.push(ErrorEntry::Message(message.to_string()));
        self
    }

    pub fn phase_error(mut self, phase: &str, message: &str) -> Self {
        self.snapshot.errors.push(ErrorEntry::from(json!({"phase": phase, "error": message})));
        self
    }

    pub fn output(mut self, phase: Phase, payload: Value) -> Self {
        self.snapshot.outputs.set(phase, payload);
        self
    }

    pub fn build(self) -> RawSnapshot {
        self.snapshot
    }
}

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for snapshots, including malformed fields.
pub mod strategies {
    use crate::{Phase, RawSnapshot, RunStatus, FINALIZED};
    use proptest::prelude::*;
    use serde_json::{json, Value};

    pub fn arb_run_status() -> impl Strategy<Value = RunStatus> {
        prop_oneof![
            Just(RunStatus::Pending),
            Just(RunStatus::Running),
            Just(RunStatus::Completed),
            Just(RunStatus::CompletedWithErrors),
            Just(RunStatus::Failed),
            Just(RunStatus::Unknown),
        ]
    }

    pub fn arb_current_phase() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            Just(Some(FINALIZED.to_string())),
            Just(Some("queued".to_string())),
            proptest::sample::select(Phase::ALL.to_vec()).prop_map(|p| Some(p.as_str().to_string())),
        ]
    }

    pub fn arb_timing_key() -> impl Strategy<Value = String> {
        prop_oneof![
            proptest::sample::select(Phase::ALL.to_vec()).prop_map(|p| p.as_str().to_string()),
            (1u32..5).prop_map(|n| format!("critic_review_{}", n)),
            "[a-z_]{1,12}",
        ]
    }

    pub fn arb_timing_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            (0.0f64..100.0).prop_map(|s| json!(s)),
            Just(json!(0)),
            Just(Value::Null),
            "[0-9.]{1,4}".prop_map(Value::String),
        ]
    }

    fn arb_error_phase() -> impl Strategy<Value = String> {
        prop_oneof![
            proptest::sample::select(Phase::ALL.to_vec()).prop_map(|p| p.as_str().to_string()),
            Just("execution".to_string()),
        ]
    }

    pub fn arb_error_entry() -> impl Strategy<Value = Value> {
        prop_oneof![
            "[a-z ]{0,16}".prop_map(Value::String),
            (arb_error_phase(), "[a-z ]{1,16}").prop_map(|(p, e)| json!({"phase": p, "error": e})),
            "[a-z ]{1,16}".prop_map(|e| json!({"error_message": e})),
            arb_error_phase().prop_map(|p| json!({"phase": p})),
        ]
    }

    pub fn arb_snapshot() -> impl Strategy<Value = RawSnapshot> {
        (
            arb_run_status(),
            arb_current_phase(),
            0u32..4,
            proptest::collection::vec((arb_timing_key(), arb_timing_value()), 0..10),
            proptest::collection::vec(arb_error_entry(), 0..5),
        )
            .prop_map(|(status, current, loops, timings, errors)| {
                let mut timing_map = serde_json::Map::new();
                for (key, value) in timings {
                    timing_map.insert(key, value);
                }
                serde_json::from_value(json!({
                    "run_id": "run-prop",
                    "status": status,
                    "current_phase": current,
                    "loop_count": loops,
                    "phase_timings": timing_map,
                    "errors": errors,
                }))
                .unwrap_or_default()
            })
    }
}
