// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Artifact retrieval with not-ready retry.
//!
//! Artifacts are written some time after their phase finishes, so a 404 right
//! after completion is expected. Only `NotFound` is retried; every other
//! failure is returned as-is.

use pw_adapters::{Backend, BackendError};
use pw_core::RunId;
use pw_wire::ArtifactList;
use std::future::Future;
use std::time::Duration;

/// How often, and how far apart, a not-ready artifact is re-requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { attempts: 3, delay: Duration::from_millis(1500) }
    }
}

impl RetryPolicy {
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay, ..Self::default() }
    }
}

async fn retry_not_ready<T, F, Fut>(
    policy: RetryPolicy,
    what: &str,
    mut op: F,
) -> Result<T, BackendError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, BackendError>>,
{
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;
    loop {
        match op().await {
            Err(e) if e.is_not_ready() && attempt < attempts => {
                tracing::info!(
                    %what,
                    attempt,
                    attempts,
                    delay_ms = policy.delay.as_millis() as u64,
                    "artifact not ready, retrying"
                );
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            result => return result,
        }
    }
}

/// Download an artifact, waiting for it to appear.
pub async fn fetch_artifact_when_ready<B: Backend>(
    backend: &B,
    run_id: &RunId,
    name: &str,
    policy: RetryPolicy,
) -> Result<Vec<u8>, BackendError> {
    retry_not_ready(policy, name, || backend.fetch_artifact(run_id, name)).await
}

/// List a run's artifacts, waiting for the listing to become available.
pub async fn list_artifacts_when_ready<B: Backend>(
    backend: &B,
    run_id: &RunId,
    policy: RetryPolicy,
) -> Result<ArtifactList, BackendError> {
    retry_not_ready(policy, run_id.as_str(), || backend.list_artifacts(run_id)).await
}

#[cfg(test)]
#[path = "artifacts_tests.rs"]
mod tests;
