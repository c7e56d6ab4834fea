// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Orchestrator HTTP API types.
//!
//! Request and response bodies for the `/api/v1` control plane. The run
//! status body itself is [`pw_core::RawSnapshot`].

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod request;
mod response;
pub mod routes;

pub use request::{CreateRunRequest, DatasetFormat};
pub use response::{ApiError, ArtifactList, Health, PlotEntry, RunCreated, RunSummary};
pub use routes::{validate_artifact_name, NameError};

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
