// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run state projection: raw snapshot in, render-ready timeline out.
//!
//! [`project`] is a pure function of its input. It keeps no state between
//! calls, so each poll's snapshot is interpreted on its own and a late or
//! out-of-order response still produces a self-consistent view.
//!
//! Per call, a phase moves through `pending → running → completed`. A
//! completed phase shows `will_rerun` while the orchestrator is re-executing
//! an earlier phase after a critic loop-back, and any phase shows `error`
//! once an error entry names it.

use crate::phase::{CurrentPhase, Phase};
use crate::snapshot::RawSnapshot;
use crate::timing::TimingLog;
use crate::view::{PhaseStatus, PhaseView, RunView};

/// Project one snapshot into a [`RunView`]. Total over all inputs.
pub fn project(raw: &RawSnapshot) -> RunView {
    let timings = TimingLog::from_raw(&raw.phase_timings);
    let current = CurrentPhase::parse(raw.current_phase.as_deref());
    let cursor = Cursor {
        running: raw.status.is_running(),
        looping: raw.status.is_running() && raw.loop_count > 0 && !current.is_finalized(),
        current: &current,
    };

    let mut phases: Vec<PhaseView> = Phase::ALL
        .into_iter()
        .map(|phase| {
            let duration = timings.duration(phase);
            PhaseView {
                phase,
                status: cursor.classify(phase, duration),
                duration_seconds: duration,
                count: phase.is_reenterable().then(|| timings.count(phase)),
                error: None,
                has_output: raw.has_output(phase),
            }
        })
        .collect();

    // Errors are applied after classification and always win.
    let mut errors = Vec::with_capacity(raw.errors.len());
    for entry in &raw.errors {
        if let Some(phase) = entry.phase() {
            let view = &mut phases[phase.index()];
            view.status = PhaseStatus::Error;
            view.error = Some(entry.message());
        }
        errors.push(entry.render());
    }

    RunView {
        run_id: raw.run_id.clone(),
        status: raw.status,
        current_phase: current,
        loop_count: raw.loop_count,
        objectives: raw.objectives.clone(),
        phases,
        errors,
        token_usage: raw.token_usage,
    }
}

struct Cursor<'a> {
    running: bool,
    looping: bool,
    current: &'a CurrentPhase,
}

impl Cursor<'_> {
    fn classify(&self, phase: Phase, duration: Option<f64>) -> PhaseStatus {
        if self.running && self.current.phase() == Some(phase) {
            return PhaseStatus::Running;
        }

        // Only a strictly positive duration counts as evidence of execution.
        // The critic's final review may finish without a fresh timing.
        let has_run = duration.is_some_and(|d| d > 0.0)
            || (phase.is_reenterable() && self.current.is_finalized());
        if !has_run {
            return PhaseStatus::Pending;
        }

        // While looping, phases after the loop target hold stale output. The
        // re-enterable phase triggered the loop and is not invalidated by it.
        let after_current = self.current.index().is_some_and(|idx| phase.index() > idx);
        if self.looping && after_current && !phase.is_reenterable() {
            PhaseStatus::WillRerun
        } else {
            PhaseStatus::Completed
        }
    }
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;
