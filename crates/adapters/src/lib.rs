// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapters for the outside world: the orchestrator's HTTP API and desktop
//! notifications.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod backend;
mod http;
pub mod notify;

pub use backend::{Backend, BackendError};
pub use http::HttpBackend;
pub use notify::{DesktopNotifyAdapter, Notice, NotifyAdapter, NotifyError};

#[cfg(any(test, feature = "test-support"))]
pub use backend::{BackendCall, FakeBackend};
#[cfg(any(test, feature = "test-support"))]
pub use notify::{FakeNotifyAdapter, NotifyCall};
