// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::builder::styling::{Ansi256Color, Color, Style, Styles};
use pw_core::{PhaseStatus, RunStatus};
use std::io::IsTerminal;

pub mod codes {
    /// Section headers: pastel cyan / steel blue
    pub const HEADER: u8 = 74;
    /// Commands and literals: light grey
    pub const LITERAL: u8 = 250;
    /// Descriptions and context: medium grey
    pub const CONTEXT: u8 = 245;
    /// Muted / secondary text: darker grey
    pub const MUTED: u8 = 240;
    /// Completed work: sage green
    pub const GOOD: u8 = 108;
    /// Stale or partial results: amber
    pub const WARN: u8 = 179;
    /// Failures: muted red
    pub const BAD: u8 = 167;
}

/// Determine if color output should be enabled.
///
/// Priority: `NO_COLOR=1` disables, then `COLOR=1` forces, then TTY check.
pub fn should_colorize() -> bool {
    if std::env::var("NO_COLOR").is_ok_and(|v| v == "1") {
        return false;
    }
    if std::env::var("COLOR").is_ok_and(|v| v == "1") {
        return true;
    }
    std::io::stdout().is_terminal()
}

/// Build clap `Styles` using the project palette.
pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    Styles::styled()
        .header(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::HEADER)))))
        .literal(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::LITERAL)))))
        .placeholder(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::CONTEXT)))))
}

fn fg256(code: u8) -> String {
    format!("\x1b[38;5;{code}m")
}

const RESET: &str = "\x1b[0m";

fn paint(code: u8, text: &str) -> String {
    if should_colorize() {
        format!("{}{}{}", fg256(code), text, RESET)
    } else {
        text.to_string()
    }
}

/// Format text with the header color (steel blue).
pub fn header(text: &str) -> String {
    paint(codes::HEADER, text)
}

/// Format text with the literal color (light grey).
pub fn literal(text: &str) -> String {
    paint(codes::LITERAL, text)
}

/// Format text with the context color (medium grey).
pub fn context(text: &str) -> String {
    paint(codes::CONTEXT, text)
}

/// Format text with the muted color (darker grey).
pub fn muted(text: &str) -> String {
    paint(codes::MUTED, text)
}

/// Color `text` by phase status.
pub fn phase_status(status: PhaseStatus, text: &str) -> String {
    match status {
        PhaseStatus::Pending => muted(text),
        PhaseStatus::Running => header(text),
        PhaseStatus::Completed => paint(codes::GOOD, text),
        PhaseStatus::WillRerun => paint(codes::WARN, text),
        PhaseStatus::Error => paint(codes::BAD, text),
    }
}

/// Color `text` by run status.
pub fn run_status(status: RunStatus, text: &str) -> String {
    match status {
        RunStatus::Completed => paint(codes::GOOD, text),
        RunStatus::CompletedWithErrors => paint(codes::WARN, text),
        RunStatus::Failed => paint(codes::BAD, text),
        RunStatus::Running => header(text),
        RunStatus::Pending | RunStatus::Unknown => context(text),
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
