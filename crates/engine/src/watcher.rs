// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Live run watcher.
//!
//! Two tasks run under one cancellation scope: a status poller that fetches
//! and projects a snapshot every `poll_interval`, and an elapsed-time ticker.
//! A terminal status or [`WatchHandle::cancel`] tears both down. A response
//! that arrives after cancellation is dropped without being projected.
//!
//! Events go through a bounded queue. Poll results wait for room; ticks are
//! dropped once the queue is half full, so a stalled consumer sees at most
//! [`EVENT_BUFFER`] queued events.

use pw_adapters::{Backend, BackendError};
use pw_core::{project, Clock, RunId, RunView};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Capacity of the event queue between the watch tasks and the consumer.
pub const EVENT_BUFFER: usize = 32;

/// Watch cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchConfig {
    pub poll_interval: Duration,
    pub tick_interval: Duration,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { poll_interval: Duration::from_secs(2), tick_interval: Duration::from_secs(1) }
    }
}

/// Event delivered to the watch consumer.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchEvent {
    /// Projection of a non-terminal snapshot.
    Snapshot(RunView),
    /// Projection of the first terminal snapshot. No events follow.
    Finished(RunView),
    /// A fetch failed; polling continues on the next interval.
    PollFailed(BackendError),
    /// Time since the watch started.
    Tick { elapsed: Duration },
}

/// Spawns watch tasks for one run.
pub struct RunWatcher;

impl RunWatcher {
    /// Start watching `run_id`. Must be called within a tokio runtime.
    pub fn spawn<B, C>(backend: B, clock: C, run_id: RunId, config: WatchConfig) -> WatchHandle
    where
        B: Backend,
        C: Clock,
    {
        let scope = CancellationToken::new();
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        tracing::info!(run_id = %run_id, poll_ms = config.poll_interval.as_millis() as u64, "watch started");

        let poller = tokio::spawn(poll_loop(
            backend,
            run_id,
            config.poll_interval,
            scope.clone(),
            tx.clone(),
        ));
        let ticker = tokio::spawn(tick_loop(clock, config.tick_interval, scope.child_token(), tx));

        WatchHandle { events: rx, scope, tasks: vec![poller, ticker] }
    }
}

/// Consumer side of a running watch. Dropping it cancels the watch.
pub struct WatchHandle {
    events: mpsc::Receiver<WatchEvent>,
    scope: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl WatchHandle {
    /// Next event, or `None` once both tasks have stopped and the queue is drained.
    pub async fn next(&mut self) -> Option<WatchEvent> {
        self.events.recv().await
    }

    pub fn cancel(&self) {
        self.scope.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.scope.is_cancelled()
    }

    /// Wait for both tasks to stop.
    pub async fn join(mut self) {
        for task in std::mem::take(&mut self.tasks) {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "watch task ended abnormally");
            }
        }
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}

async fn poll_loop<B: Backend>(
    backend: B,
    run_id: RunId,
    every: Duration,
    scope: CancellationToken,
    tx: mpsc::Sender<WatchEvent>,
) {
    let token = scope.child_token();
    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = interval.tick() => {}
        }

        let result = tokio::select! {
            biased;
            _ = token.cancelled() => break,
            result = backend.fetch_snapshot(&run_id) => result,
        };
        if token.is_cancelled() {
            tracing::debug!(run_id = %run_id, "discarding snapshot fetched after cancellation");
            break;
        }

        let event = match result {
            Ok(raw) => {
                let view = project(&raw);
                tracing::debug!(
                    run_id = %run_id,
                    status = %view.status,
                    current_phase = %view.current_phase,
                    loop_count = view.loop_count,
                    "snapshot"
                );
                if view.is_terminal() {
                    tracing::info!(run_id = %run_id, status = %view.status, "run finished");
                    let _ = tx.send(WatchEvent::Finished(view)).await;
                    scope.cancel();
                    break;
                }
                WatchEvent::Snapshot(view)
            }
            Err(e) => {
                tracing::warn!(run_id = %run_id, error = %e, "status poll failed");
                WatchEvent::PollFailed(e)
            }
        };

        let sent = tokio::select! {
            biased;
            _ = token.cancelled() => break,
            sent = tx.send(event) => sent,
        };
        if sent.is_err() {
            scope.cancel();
            break;
        }
    }
}

async fn tick_loop<C: Clock>(
    clock: C,
    every: Duration,
    token: CancellationToken,
    tx: mpsc::Sender<WatchEvent>,
) {
    let start = clock.now();
    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = interval.tick() => {
                // Leave room for poll results; a later tick supersedes this one.
                if tx.capacity() <= EVENT_BUFFER / 2 {
                    continue;
                }
                let elapsed = clock.elapsed_since(start);
                match tx.try_send(WatchEvent::Tick { elapsed }) {
                    Ok(()) | Err(TrySendError::Full(_)) => {}
                    Err(TrySendError::Closed(_)) => break,
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "watcher_tests.rs"]
mod tests;
