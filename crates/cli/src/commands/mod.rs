// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod artifact;
pub mod graph;
pub mod health;
pub mod list;
pub mod phases;
pub mod run;
pub mod status;
pub mod watch;

use anyhow::{Context as _, Result};
use pw_adapters::{BackendError, HttpBackend};
use pw_engine::{RetryPolicy, WatchConfig};

use crate::config::Config;
use crate::output::OutputFormat;

/// Resolved settings shared by commands that talk to the orchestrator.
pub struct Context {
    pub config: Config,
    pub format: OutputFormat,
}

impl Context {
    pub fn backend(&self) -> Result<HttpBackend> {
        HttpBackend::new(&self.config.url, self.config.request_timeout())
            .with_context(|| format!("cannot create HTTP client for {}", self.config.url))
    }

    pub fn watch_config(&self) -> WatchConfig {
        WatchConfig { poll_interval: self.config.poll_interval(), ..WatchConfig::default() }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::with_delay(self.config.artifact_retry())
    }
}

/// Attach a hint to backend errors the user can act on.
pub fn explain(err: BackendError) -> anyhow::Error {
    let hint = match &err {
        BackendError::Transport(_) => Some("is the orchestrator running? (set --url or PW_URL)"),
        BackendError::Decode(_) => Some("the server at this URL does not look like the orchestrator"),
        _ => None,
    };
    match hint {
        Some(hint) => anyhow::Error::new(err).context(hint),
        None => anyhow::Error::new(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_get_a_hint() {
        let err = explain(BackendError::Transport("connection refused".into()));
        let text = format!("{err:#}");
        assert!(text.starts_with("is the orchestrator running?"), "{text}");
        assert!(text.ends_with("request failed: connection refused"), "{text}");
    }

    #[test]
    fn not_found_passes_through() {
        let err = explain(BackendError::NotFound("Pipeline not found: x".into()));
        assert_eq!(format!("{err:#}"), "not found: Pipeline not found: x");
    }

    #[test]
    fn context_uses_configured_cadence() {
        let config = Config { poll_interval_ms: 250, artifact_retry_ms: 40, ..Config::default() };
        let ctx = Context { config, format: OutputFormat::Text };
        assert_eq!(ctx.watch_config().poll_interval.as_millis(), 250);
        assert_eq!(ctx.retry_policy().delay.as_millis(), 40);
        assert_eq!(ctx.retry_policy().attempts, 3);
        assert_eq!(ctx.backend().unwrap().base_url(), "http://localhost:8000");
    }
}
