// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Orchestrator backend adapter.

use async_trait::async_trait;
use pw_core::{RawSnapshot, RunId};
use pw_wire::{ArtifactList, CreateRunRequest, Health, PlotEntry, RunCreated, RunSummary};
use thiserror::Error;

/// Errors from backend operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("server returned {code}: {detail}")]
    Status { code: u16, detail: String },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error(transparent)]
    InvalidName(#[from] pw_wire::NameError),
}

impl BackendError {
    /// The resource does not exist yet. Artifacts are written some time after
    /// the phase that produces them finishes, so a miss may be transient.
    pub fn is_not_ready(&self) -> bool {
        matches!(self, BackendError::NotFound(_))
    }
}

/// Client side of the orchestrator's `/api/v1` surface.
#[async_trait]
pub trait Backend: Clone + Send + Sync + 'static {
    async fn health(&self) -> Result<Health, BackendError>;

    /// Start a run. The orchestrator answers immediately; the run proceeds
    /// in the background.
    async fn create_run(&self, request: &CreateRunRequest) -> Result<RunCreated, BackendError>;

    async fn list_runs(&self) -> Result<Vec<RunSummary>, BackendError>;

    /// Fetch the current status body of a run.
    async fn fetch_snapshot(&self, run_id: &RunId) -> Result<RawSnapshot, BackendError>;

    async fn list_artifacts(&self, run_id: &RunId) -> Result<ArtifactList, BackendError>;

    async fn list_plots(&self, run_id: &RunId) -> Result<Vec<PlotEntry>, BackendError>;

    /// Download one artifact by bare filename.
    async fn fetch_artifact(&self, run_id: &RunId, name: &str) -> Result<Vec<u8>, BackendError>;

    /// Pipeline topology as Mermaid source.
    async fn graph(&self) -> Result<String, BackendError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{Backend, BackendError};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use pw_core::{RawSnapshot, RunId};
    use pw_wire::{
        ArtifactList, CreateRunRequest, Health, PlotEntry, RunCreated, RunSummary,
    };
    use std::collections::{HashMap, VecDeque};
    use std::sync::Arc;
    use std::time::Duration;

    /// Recorded backend call
    #[derive(Debug, Clone, PartialEq)]
    pub enum BackendCall {
        Health,
        CreateRun(CreateRunRequest),
        ListRuns,
        FetchSnapshot(RunId),
        ListArtifacts(RunId),
        ListPlots(RunId),
        FetchArtifact(RunId, String),
        Graph,
    }

    #[derive(Default)]
    struct FakeBackendState {
        calls: Vec<BackendCall>,
        /// Scripted snapshot responses; the last one repeats once drained.
        script: VecDeque<Result<RawSnapshot, BackendError>>,
        last: Option<Result<RawSnapshot, BackendError>>,
        fetch_delay: Option<Duration>,
        runs: Vec<RunSummary>,
        artifacts: HashMap<String, Vec<u8>>,
        plots: Vec<PlotEntry>,
        /// Number of artifact requests answered with 404 before artifacts appear.
        missing_for: u32,
        graph: Option<String>,
    }

    /// Fake backend for testing
    #[derive(Clone, Default)]
    pub struct FakeBackend {
        inner: Arc<Mutex<FakeBackendState>>,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a snapshot to be returned by the next `fetch_snapshot`.
        pub fn push_snapshot(&self, snapshot: RawSnapshot) {
            self.inner.lock().script.push_back(Ok(snapshot));
        }

        /// Queue a failure to be returned by the next `fetch_snapshot`.
        pub fn push_error(&self, error: BackendError) {
            self.inner.lock().script.push_back(Err(error));
        }

        /// Delay every `fetch_snapshot` response.
        pub fn set_fetch_delay(&self, delay: Duration) {
            self.inner.lock().fetch_delay = Some(delay);
        }

        pub fn add_run(&self, summary: RunSummary) {
            self.inner.lock().runs.push(summary);
        }

        pub fn add_artifact(&self, name: &str, bytes: &[u8]) {
            self.inner.lock().artifacts.insert(name.to_string(), bytes.to_vec());
        }

        pub fn add_plot(&self, entry: PlotEntry) {
            self.inner.lock().plots.push(entry);
        }

        /// Serve `source` from `graph`; without it, `graph` answers `NotFound`.
        pub fn set_graph(&self, source: &str) {
            self.inner.lock().graph = Some(source.to_string());
        }

        /// Answer the next `n` artifact requests with `NotFound`.
        pub fn set_artifacts_missing_for(&self, n: u32) {
            self.inner.lock().missing_for = n;
        }

        /// Get all recorded calls
        pub fn calls(&self) -> Vec<BackendCall> {
            self.inner.lock().calls.clone()
        }

        pub fn snapshot_fetches(&self) -> usize {
            self.inner
                .lock()
                .calls
                .iter()
                .filter(|c| matches!(c, BackendCall::FetchSnapshot(_)))
                .count()
        }

        fn record(&self, call: BackendCall) {
            self.inner.lock().calls.push(call);
        }

        fn artifact_gate(&self, what: &str) -> Result<(), BackendError> {
            let mut state = self.inner.lock();
            if state.missing_for > 0 {
                state.missing_for -= 1;
                return Err(BackendError::NotFound(what.to_string()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl Backend for FakeBackend {
        async fn health(&self) -> Result<Health, BackendError> {
            self.record(BackendCall::Health);
            Ok(Health {
                status: "healthy".to_string(),
                version: "0.0.0-fake".to_string(),
                llm_provider: "fake".to_string(),
                sandbox_type: "none".to_string(),
            })
        }

        async fn create_run(&self, request: &CreateRunRequest) -> Result<RunCreated, BackendError> {
            self.record(BackendCall::CreateRun(request.clone()));
            let mut state = self.inner.lock();
            let run_id = RunId::new(format!("fake-{}", state.runs.len() + 1));
            state.runs.push(RunSummary {
                run_id: run_id.clone(),
                status: "running".to_string(),
                current_phase: "queued".to_string(),
                objectives: request.objectives.clone().unwrap_or_default(),
            });
            Ok(RunCreated {
                message: format!("Pipeline {run_id} started."),
                run_id,
                status: "accepted".to_string(),
            })
        }

        async fn list_runs(&self) -> Result<Vec<RunSummary>, BackendError> {
            self.record(BackendCall::ListRuns);
            Ok(self.inner.lock().runs.clone())
        }

        async fn fetch_snapshot(&self, run_id: &RunId) -> Result<RawSnapshot, BackendError> {
            self.record(BackendCall::FetchSnapshot(run_id.clone()));
            let delay = self.inner.lock().fetch_delay;
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }

            let mut state = self.inner.lock();
            match state.script.pop_front() {
                Some(next) => {
                    state.last = Some(next.clone());
                    next
                }
                None => state
                    .last
                    .clone()
                    .unwrap_or_else(|| Err(BackendError::NotFound(run_id.to_string()))),
            }
        }

        async fn list_artifacts(&self, run_id: &RunId) -> Result<ArtifactList, BackendError> {
            self.record(BackendCall::ListArtifacts(run_id.clone()));
            self.artifact_gate(run_id.as_str())?;
            // The orchestrator lists full server-side paths, not download names.
            let mut artifacts: Vec<String> = self
                .inner
                .lock()
                .artifacts
                .keys()
                .map(|name| format!("/tmp/ml-pipeline/artifacts/{run_id}/{name}"))
                .collect();
            artifacts.sort();
            Ok(ArtifactList { run_id: run_id.clone(), artifacts })
        }

        async fn list_plots(&self, run_id: &RunId) -> Result<Vec<PlotEntry>, BackendError> {
            self.record(BackendCall::ListPlots(run_id.clone()));
            Ok(self.inner.lock().plots.clone())
        }

        async fn fetch_artifact(
            &self,
            run_id: &RunId,
            name: &str,
        ) -> Result<Vec<u8>, BackendError> {
            self.record(BackendCall::FetchArtifact(run_id.clone(), name.to_string()));
            pw_wire::validate_artifact_name(name)?;
            self.artifact_gate(name)?;
            self.inner
                .lock()
                .artifacts
                .get(name)
                .cloned()
                .ok_or_else(|| BackendError::NotFound(name.to_string()))
        }

        async fn graph(&self) -> Result<String, BackendError> {
            self.record(BackendCall::Graph);
            self.inner.lock().graph.clone().ok_or_else(|| BackendError::NotFound("graph".to_string()))
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{BackendCall, FakeBackend};

#[cfg(test)]
#[path = "backend_tests.rs"]
mod tests;
