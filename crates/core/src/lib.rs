// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pw-core: run snapshot model and the run state projector for pipewatch

pub mod macros;

pub mod clock;
pub mod id;
pub mod phase;
pub mod project;
pub mod run_error;
pub mod snapshot;
pub mod status;
pub mod time_fmt;
pub mod timing;
pub mod view;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use id::{short, RunId};
pub use phase::{CurrentPhase, Phase, PhaseMeta, FINALIZED, PHASE_TABLE};
pub use project::project;
pub use run_error::ErrorEntry;
pub use snapshot::{PhaseOutputs, RawSnapshot, TokenUsage};
pub use status::RunStatus;
pub use time_fmt::{format_elapsed, format_seconds};
pub use timing::{Occurrence, TimingEntry, TimingLog};
pub use view::{PhaseStatus, PhaseView, RunView};
