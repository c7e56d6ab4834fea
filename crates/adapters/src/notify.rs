// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Desktop notifications for run outcomes.

use async_trait::async_trait;
use pw_core::{format_seconds, RunStatus, RunView};
use thiserror::Error;

/// Errors from notify operations
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("send failed: {0}")]
    SendFailed(String),
}

/// Title and body of one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    /// Summary of a run that reached a terminal status.
    pub fn run_finished(view: &RunView) -> Self {
        let outcome = match view.status {
            RunStatus::Completed => "completed",
            RunStatus::CompletedWithErrors => "completed with errors",
            RunStatus::Failed => "failed",
            _ => "stopped",
        };
        let title = format!("Pipeline {} {}", view.run_id.short(8), outcome);

        let mut message = format!(
            "{}/{} phases in {}",
            view.completed_count(),
            view.phases.len(),
            format_seconds(view.total_seconds())
        );
        if view.loop_count > 0 {
            message.push_str(&format!(", {} loop(s)", view.loop_count));
        }
        if let Some(last) = view.errors.last() {
            message.push_str(&format!("\n{last}"));
        }
        Self { title, message }
    }
}

/// Adapter for sending notifications
#[async_trait]
pub trait NotifyAdapter: Clone + Send + Sync + 'static {
    /// Send a notification with a title and message body
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError>;

    async fn send(&self, notice: &Notice) -> Result<(), NotifyError> {
        self.notify(&notice.title, &notice.message).await
    }
}

/// Desktop notification adapter using notify-rust.
///
/// On macOS the first notification looks up a bundle identifier through
/// AppleScript, which can hang without Automation permissions. The identifier
/// is set up front to skip the lookup.
#[derive(Clone, Copy, Debug, Default)]
pub struct DesktopNotifyAdapter;

impl DesktopNotifyAdapter {
    pub fn new() -> Self {
        #[cfg(target_os = "macos")]
        {
            let _ = mac_notification_sys::set_application("com.apple.Terminal");
        }
        Self
    }
}

#[async_trait]
impl NotifyAdapter for DesktopNotifyAdapter {
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        let title = title.to_string();
        let message = message.to_string();
        // show() blocks on some platforms; the CLI waits for it before exiting.
        let shown = tokio::task::spawn_blocking(move || {
            tracing::debug!(%title, "sending desktop notification");
            notify_rust::Notification::new()
                .appname("pw")
                .summary(&title)
                .body(&message)
                .show()
                .map(|_| ())
                .map_err(|e| NotifyError::SendFailed(e.to_string()))
        })
        .await
        .map_err(|e| NotifyError::SendFailed(e.to_string()))?;

        if let Err(e) = &shown {
            tracing::warn!(error = %e, "desktop notification failed");
        }
        shown
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{NotifyAdapter, NotifyError};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Recorded notification
    #[derive(Debug, Clone)]
    pub struct NotifyCall {
        pub title: String,
        pub message: String,
    }

    /// Fake notification adapter for testing
    #[derive(Clone, Default)]
    pub struct FakeNotifyAdapter {
        calls: Arc<Mutex<Vec<NotifyCall>>>,
    }

    impl FakeNotifyAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        /// Get all recorded notifications
        pub fn calls(&self) -> Vec<NotifyCall> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl NotifyAdapter for FakeNotifyAdapter {
        async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
            self.calls
                .lock()
                .push(NotifyCall { title: title.to_string(), message: message.to_string() });
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeNotifyAdapter, NotifyCall};

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;
