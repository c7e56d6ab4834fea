// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Layered client configuration.
//!
//! Built-in defaults, then the TOML file, then `PW_*` environment variables.
//! Command-line flags are applied last by the caller.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_URL: &str = "http://localhost:8000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value for {var}: {value:?}")]
    Env { var: &'static str, value: String },
}

/// Effective configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Orchestrator base URL (scheme, host and port).
    pub url: String,
    pub poll_interval_ms: u64,
    pub request_timeout_ms: u64,
    pub artifact_retry_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            poll_interval_ms: 2000,
            request_timeout_ms: 10_000,
            artifact_retry_ms: 1500,
        }
    }
}

/// On-disk form; every key optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    url: Option<String>,
    poll_interval_ms: Option<u64>,
    request_timeout_ms: Option<u64>,
    artifact_retry_ms: Option<u64>,
}

impl Config {
    /// Load defaults < config file < environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        match explicit_path() {
            Some(path) => config.merge_file(&path, true)?,
            None => {
                if let Some(path) = default_path() {
                    config.merge_file(&path, false)?;
                }
            }
        }
        config.merge_env()?;
        Ok(config)
    }

    /// Overlay keys from a TOML file. A missing file is an error only when
    /// `required`.
    pub fn merge_file(&mut self, path: &Path, required: bool) -> Result<(), ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
                tracing::debug!(path = %path.display(), "no config file");
                return Ok(());
            }
            Err(source) => return Err(ConfigError::Read { path: path.to_path_buf(), source }),
        };
        let file: FileConfig = toml::from_str(&text)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        tracing::debug!(path = %path.display(), "loaded config file");

        if let Some(url) = file.url {
            self.url = url;
        }
        if let Some(ms) = file.poll_interval_ms {
            self.poll_interval_ms = ms;
        }
        if let Some(ms) = file.request_timeout_ms {
            self.request_timeout_ms = ms;
        }
        if let Some(ms) = file.artifact_retry_ms {
            self.artifact_retry_ms = ms;
        }
        Ok(())
    }

    /// Overlay `PW_*` environment variables. Empty values are ignored.
    pub fn merge_env(&mut self) -> Result<(), ConfigError> {
        if let Some(url) = env_var("PW_URL") {
            self.url = url;
        }
        if let Some(ms) = env_millis("PW_POLL_MS")? {
            self.poll_interval_ms = ms;
        }
        if let Some(ms) = env_millis("PW_TIMEOUT_MS")? {
            self.request_timeout_ms = ms;
        }
        if let Some(ms) = env_millis("PW_ARTIFACT_RETRY_MS")? {
            self.artifact_retry_ms = ms;
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn artifact_retry(&self) -> Duration {
        Duration::from_millis(self.artifact_retry_ms)
    }
}

/// Config file named by `PW_CONFIG`.
fn explicit_path() -> Option<PathBuf> {
    env_var("PW_CONFIG").map(PathBuf::from)
}

/// `<config_dir>/pipewatch/config.toml`
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pipewatch").join("config.toml"))
}

fn env_var(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|s| !s.is_empty())
}

fn env_millis(var: &'static str) -> Result<Option<u64>, ConfigError> {
    match env_var(var) {
        None => Ok(None),
        Some(value) => match value.parse::<u64>() {
            Ok(ms) => Ok(Some(ms)),
            Err(_) => Err(ConfigError::Env { var, value }),
        },
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
