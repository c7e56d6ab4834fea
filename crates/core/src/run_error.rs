// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error entries reported by the orchestrator.

use crate::phase::Phase;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of a snapshot's `errors` list.
///
/// Deserializes from any JSON value and never fails: strings become
/// [`ErrorEntry::Message`], everything else [`ErrorEntry::Structured`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum ErrorEntry {
    /// Bare message with no phase attribution.
    Message(String),
    /// Structured entry, optionally tagged with the phase that raised it.
    Structured {
        phase: Option<String>,
        message: Option<String>,
        /// The entry as received, used for the fallback rendering.
        raw: Value,
    },
}

impl ErrorEntry {
    /// The message text alone, without any phase prefix.
    ///
    /// Structured entries without a message fall back to their JSON form.
    pub fn message(&self) -> String {
        match self {
            ErrorEntry::Message(message) => message.clone(),
            ErrorEntry::Structured { message: Some(m), .. } => m.clone(),
            ErrorEntry::Structured { message: None, raw, .. } => raw.to_string(),
        }
    }

    /// Human-readable line for the flattened error list.
    pub fn render(&self) -> String {
        match self {
            ErrorEntry::Structured { phase: Some(p), .. } => format!("[{}] {}", p, self.message()),
            _ => self.message(),
        }
    }

    /// Canonical phase named by the entry's phase tag.
    ///
    /// Tags that are not canonical phases (e.g. `execution` for executor-level
    /// failures) stay run-level.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            ErrorEntry::Structured { phase: Some(p), .. } => Phase::parse(p),
            _ => None,
        }
    }
}

impl From<Value> for ErrorEntry {
    fn from(value: Value) -> Self {
        match value {
            Value::String(message) => ErrorEntry::Message(message),
            Value::Object(ref map) => {
                let phase = non_empty_str(map.get("phase"));
                let message =
                    non_empty_str(map.get("error")).or_else(|| non_empty_str(map.get("error_message")));
                ErrorEntry::Structured { phase, message, raw: value }
            }
            other => ErrorEntry::Structured { phase: None, message: None, raw: other },
        }
    }
}

impl From<ErrorEntry> for Value {
    fn from(entry: ErrorEntry) -> Self {
        match entry {
            ErrorEntry::Message(message) => Value::String(message),
            ErrorEntry::Structured { raw, .. } => raw,
        }
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty()).map(str::to_string)
}
