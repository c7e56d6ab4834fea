// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Text rendering of a projected run.

use crate::color;
use crate::output::pad;
use pw_core::{format_seconds, PhaseStatus, PhaseView, RunView};
use std::fmt::Write;

const LABEL_WIDTH: usize = 21;
const STATUS_WIDTH: usize = 11;

/// Marker drawn in front of each phase.
pub fn marker(status: PhaseStatus) -> &'static str {
    match status {
        PhaseStatus::Pending => "○",
        PhaseStatus::Running => "◐",
        PhaseStatus::Completed => "●",
        PhaseStatus::Error => "✗",
        PhaseStatus::WillRerun => "↻",
    }
}

/// Header line: id, run status, current phase and loop count.
pub fn header(view: &RunView) -> String {
    let mut line = format!(
        "{} {}",
        color::header(&format!("Run {}", view.run_id)),
        color::run_status(view.status, &view.status.to_string())
    );
    if !view.current_phase.as_str().is_empty() {
        let _ = write!(line, "  {}", color::context(&format!("phase: {}", view.current_phase)));
    }
    if view.loop_count > 0 {
        let _ = write!(line, "  {}", color::context(&format!("loops: {}", view.loop_count)));
    }
    line
}

fn phase_line(view: &PhaseView) -> String {
    let meta = view.phase.meta();
    let status = view.status.to_string();
    let mut line = format!(
        "  {} {} {}",
        color::phase_status(view.status, marker(view.status)),
        pad(meta.label, LABEL_WIDTH),
        color::phase_status(view.status, &pad(&status, STATUS_WIDTH)),
    );
    if let Some(secs) = view.duration_seconds {
        let _ = write!(line, " {}", pad(&format_seconds(secs), 8));
    }
    if let Some(count) = view.count.filter(|n| *n > 1) {
        let _ = write!(line, " {}", color::muted(&format!("×{count}")));
    }
    if let Some(error) = &view.error {
        let _ = write!(line, " {}", color::phase_status(PhaseStatus::Error, error));
    }
    line.trim_end().to_string()
}

/// Full timeline: header, one line per phase, then the error list.
pub fn render(view: &RunView) -> String {
    let mut out = header(view);
    out.push('\n');
    if !view.objectives.is_empty() {
        let _ = writeln!(out, "{}", color::muted(&view.objectives));
    }
    for phase in &view.phases {
        out.push_str(&phase_line(phase));
        out.push('\n');
    }
    if !view.errors.is_empty() {
        let _ = writeln!(out, "{}", color::header("Errors:"));
        for error in &view.errors {
            let _ = writeln!(out, "  {error}");
        }
    }
    if let Some(tokens) = view.token_usage.filter(|t| t.llm_calls > 0) {
        let _ = writeln!(
            out,
            "{}",
            color::muted(&format!(
                "{} LLM calls, {} tokens ({} in / {} out)",
                tokens.llm_calls, tokens.total_tokens, tokens.input_tokens, tokens.output_tokens
            ))
        );
    }
    out
}

#[cfg(test)]
#[path = "timeline_tests.rs"]
mod tests;
