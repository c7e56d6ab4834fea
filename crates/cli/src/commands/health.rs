// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pw health`

use anyhow::Result;
use pw_adapters::Backend;
use pw_wire::Health;

use super::explain;
use crate::color;
use crate::exit_error::ExitError;
use crate::output::{format_or_json, OutputFormat};

pub async fn handle<B: Backend>(backend: &B, format: OutputFormat) -> Result<()> {
    let health = backend.health().await.map_err(explain)?;
    format_or_json(format, &health, || println!("{}", describe(&health)))?;
    if !health.is_healthy() {
        return Err(ExitError::silent(1).into());
    }
    Ok(())
}

fn describe(health: &Health) -> String {
    let status = if health.is_healthy() {
        color::phase_status(pw_core::PhaseStatus::Completed, &health.status)
    } else {
        color::phase_status(pw_core::PhaseStatus::Error, &health.status)
    };
    format!(
        "{}  {} {}  {} {}  {} {}",
        status,
        color::context("version"),
        health.version,
        color::context("llm"),
        health.llm_provider,
        color::context("sandbox"),
        health.sandbox_type
    )
}
