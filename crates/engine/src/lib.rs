// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! pw-engine: live run watching and artifact retrieval

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod artifacts;
pub mod watcher;

pub use artifacts::{fetch_artifact_when_ready, list_artifacts_when_ready, RetryPolicy};
pub use watcher::{RunWatcher, WatchConfig, WatchEvent, WatchHandle, EVENT_BUFFER};
