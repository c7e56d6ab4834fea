// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Phase timing log.
//!
//! The orchestrator reports timings as a flat map. Most phases use their
//! canonical name as the key; each critic review adds `critic_review_<n>`
//! (1-based), and the bare `critic_review` key may also appear as an
//! aggregate. Any other key under the `critic_review_` prefix still counts
//! toward the critic's total. [`TimingLog`] unpacks that map into an ordered sequence of
//! `(phase, occurrence, seconds)` entries and folds them back into per-phase
//! durations.

use crate::phase::Phase;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Which key of a phase an entry came from.
///
/// Orders bare first, then numbered occurrences ascending, then any other
/// suffix by name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Occurrence {
    /// `<phase>`
    Bare,
    /// `<phase>_<n>`
    Numbered(u32),
    /// `<phase>_<anything else>`
    Named(String),
}

/// One recorded execution (or aggregate) of a phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingEntry {
    pub phase: Phase,
    pub occurrence: Occurrence,
    pub seconds: f64,
}

impl TimingEntry {
    /// The timing-map key this entry was read from.
    pub fn key(&self) -> String {
        match &self.occurrence {
            Occurrence::Bare => self.phase.as_str().to_string(),
            Occurrence::Numbered(n) => format!("{}_{}", self.phase.as_str(), n),
            Occurrence::Named(suffix) => format!("{}_{}", self.phase.as_str(), suffix),
        }
    }
}

/// Ordered timing entries: canonical phase order, bare entry first, then
/// composite entries by ascending occurrence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimingLog {
    entries: Vec<TimingEntry>,
}

impl TimingLog {
    /// Build the log from a raw timing map.
    ///
    /// Keys that name no canonical phase, composite keys of phases that do not
    /// re-enter, and non-numeric or non-finite values are skipped.
    pub fn from_raw(raw: &IndexMap<String, Value>) -> TimingLog {
        let mut entries: Vec<TimingEntry> = raw
            .iter()
            .filter_map(|(key, value)| {
                let seconds = value.as_f64().filter(|s| s.is_finite())?;
                let (phase, occurrence) = parse_key(key)?;
                Some(TimingEntry { phase, occurrence, seconds })
            })
            .collect();
        entries.sort_by(|a, b| {
            (a.phase.index(), &a.occurrence).cmp(&(b.phase.index(), &b.occurrence))
        });
        TimingLog { entries }
    }

    pub fn entries(&self) -> &[TimingEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries recorded for one phase, in occurrence order.
    pub fn occurrences(&self, phase: Phase) -> impl Iterator<Item = &TimingEntry> {
        self.entries.iter().filter(move |e| e.phase == phase)
    }

    /// Displayed duration of a phase, or `None` when nothing was recorded.
    ///
    /// Re-enterable phases sum the bare entry and every composite entry;
    /// other phases use the bare entry only.
    pub fn duration(&self, phase: Phase) -> Option<f64> {
        let mut found = false;
        let mut total = 0.0;
        for entry in self.occurrences(phase) {
            found = true;
            total += entry.seconds;
        }
        found.then_some(total)
    }

    /// Number of recorded entries for a phase.
    pub fn count(&self, phase: Phase) -> u32 {
        self.occurrences(phase).count() as u32
    }
}

fn parse_key(key: &str) -> Option<(Phase, Occurrence)> {
    if let Some(phase) = Phase::parse(key) {
        return Some((phase, Occurrence::Bare));
    }
    Phase::ALL.into_iter().filter(|p| p.is_reenterable()).find_map(|phase| {
        let suffix = key.strip_prefix(phase.as_str())?.strip_prefix('_')?;
        let occurrence = match suffix.parse::<u32>() {
            Ok(n) => Occurrence::Numbered(n),
            Err(_) => Occurrence::Named(suffix.to_string()),
        };
        Some((phase, occurrence))
    })
}

#[cfg(test)]
#[path = "timing_tests.rs"]
mod tests;
