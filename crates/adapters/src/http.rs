// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP backend over the orchestrator's JSON API.

use crate::backend::{Backend, BackendError};
use async_trait::async_trait;
use pw_core::{RawSnapshot, RunId};
use pw_wire::{
    routes, ApiError, ArtifactList, CreateRunRequest, Health, PlotEntry, RunCreated, RunSummary,
};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Talks to a running orchestrator at `base_url` (scheme, host and port).
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pw/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: String) -> Result<Response, BackendError> {
        tracing::debug!(%path, "GET");
        let response = self
            .client
            .get(self.url(&path))
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        check(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: String) -> Result<T, BackendError> {
        let response = self.get(path).await?;
        response.json::<T>().await.map_err(|e| BackendError::Decode(e.to_string()))
    }
}

/// Map non-2xx responses to errors, carrying the server's `detail` text.
async fn check(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = match serde_json::from_str::<ApiError>(&body) {
        Ok(err) => err.message(),
        Err(_) if body.is_empty() => status.canonical_reason().unwrap_or("").to_string(),
        Err(_) => body,
    };
    tracing::debug!(code = status.as_u16(), %detail, "request rejected");

    if status == StatusCode::NOT_FOUND {
        Err(BackendError::NotFound(detail))
    } else {
        Err(BackendError::Status { code: status.as_u16(), detail })
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn health(&self) -> Result<Health, BackendError> {
        self.get_json(routes::health()).await
    }

    async fn create_run(&self, request: &CreateRunRequest) -> Result<RunCreated, BackendError> {
        let path = routes::runs();
        tracing::debug!(%path, "POST");
        let response = self
            .client
            .post(self.url(&path))
            .json(request)
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        check(response).await?.json().await.map_err(|e| BackendError::Decode(e.to_string()))
    }

    async fn list_runs(&self) -> Result<Vec<RunSummary>, BackendError> {
        self.get_json(routes::runs()).await
    }

    async fn fetch_snapshot(&self, run_id: &RunId) -> Result<RawSnapshot, BackendError> {
        // Any JSON body is a snapshot; field-level problems degrade to defaults.
        let value: serde_json::Value = self.get_json(routes::run(run_id)).await?;
        Ok(RawSnapshot::from(value))
    }

    async fn list_artifacts(&self, run_id: &RunId) -> Result<ArtifactList, BackendError> {
        self.get_json(routes::artifacts(run_id)).await
    }

    async fn list_plots(&self, run_id: &RunId) -> Result<Vec<PlotEntry>, BackendError> {
        self.get_json(routes::plots(run_id)).await
    }

    async fn fetch_artifact(&self, run_id: &RunId, name: &str) -> Result<Vec<u8>, BackendError> {
        let name = pw_wire::validate_artifact_name(name)?;
        let response = self.get(routes::plot(run_id, name)).await?;
        let bytes = response.bytes().await.map_err(|e| BackendError::Transport(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    async fn graph(&self) -> Result<String, BackendError> {
        let response = self.get(routes::graph_mermaid()).await?;
        response.text().await.map_err(|e| BackendError::Decode(e.to_string()))
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
