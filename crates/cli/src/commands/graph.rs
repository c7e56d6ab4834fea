// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pw graph`: the orchestrator's pipeline topology as Mermaid source.

use anyhow::Result;
use pw_adapters::Backend;
use serde::Serialize;

use super::explain;
use crate::output::{format_or_json, OutputFormat};

#[derive(Debug, Serialize)]
struct Graph<'a> {
    mermaid: &'a str,
}

pub async fn handle<B: Backend>(backend: &B, format: OutputFormat) -> Result<()> {
    let source = backend.graph().await.map_err(explain)?;
    let source = source.trim_end();
    format_or_json(format, &Graph { mermaid: source }, || println!("{source}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pw_adapters::{BackendCall, FakeBackend};

    #[tokio::test]
    async fn prints_backend_graph() {
        let backend = FakeBackend::new();
        backend.set_graph("graph TD\n  critic_review -.-> feature_engineering\n");

        handle(&backend, OutputFormat::Json).await.unwrap();

        assert_eq!(backend.calls(), vec![BackendCall::Graph]);
    }

    #[tokio::test]
    async fn missing_graph_is_an_error() {
        let err = handle(&FakeBackend::new(), OutputFormat::Text).await.unwrap_err();
        assert!(format!("{err:#}").contains("not found"), "{err:#}");
    }
}
