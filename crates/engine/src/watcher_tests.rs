// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use pw_adapters::FakeBackend;
use pw_core::test_support::SnapshotBuilder;
use pw_core::{FakeClock, Phase, PhaseStatus, RunStatus};

fn config() -> WatchConfig {
    WatchConfig { poll_interval: Duration::from_secs(2), tick_interval: Duration::from_secs(1) }
}

fn running(last: Phase) -> pw_core::RawSnapshot {
    SnapshotBuilder::new()
        .status(RunStatus::Running)
        .current(Phase::ALL[(last.index() + 1).min(5)].as_str())
        .ran_through(last)
        .build()
}

fn finished(status: RunStatus) -> pw_core::RawSnapshot {
    SnapshotBuilder::new()
        .status(status)
        .current("finalized")
        .ran_through(Phase::CriticReview)
        .build()
}

fn spawn(backend: &FakeBackend) -> WatchHandle {
    RunWatcher::spawn(backend.clone(), FakeClock::new(), RunId::new("run-test"), config())
}

/// Drain the watch, dropping tick events.
async fn drain(handle: &mut WatchHandle) -> Vec<WatchEvent> {
    let mut events = Vec::new();
    while let Some(event) = handle.next().await {
        if !matches!(event, WatchEvent::Tick { .. }) {
            events.push(event);
        }
    }
    events
}

#[tokio::test(start_paused = true)]
async fn terminal_status_finishes_the_watch() {
    let backend = FakeBackend::new();
    backend.push_snapshot(running(Phase::DataProfiling));
    backend.push_snapshot(running(Phase::Visualization));
    backend.push_snapshot(finished(RunStatus::Completed));

    let mut handle = spawn(&backend);
    let events = drain(&mut handle).await;

    assert_eq!(events.len(), 3);
    assert!(matches!(&events[0], WatchEvent::Snapshot(v) if v.phases[1].status == PhaseStatus::Running));
    assert!(matches!(&events[1], WatchEvent::Snapshot(v) if v.phases[3].status == PhaseStatus::Running));
    match &events[2] {
        WatchEvent::Finished(view) => assert_eq!(view.status, RunStatus::Completed),
        other => panic!("expected Finished, got {other:?}"),
    }
    assert!(handle.is_cancelled());
    assert_eq!(backend.snapshot_fetches(), 3);
}

#[yare::parameterized(
    completed_with_errors = { RunStatus::CompletedWithErrors },
    failed                = { RunStatus::Failed },
)]
fn every_terminal_status_finishes(status: RunStatus) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .start_paused(true)
        .build()
        .unwrap();
    rt.block_on(async {
        let backend = FakeBackend::new();
        backend.push_snapshot(finished(status));

        let mut handle = spawn(&backend);
        let events = drain(&mut handle).await;

        assert!(matches!(&events[..], [WatchEvent::Finished(v)] if v.status == status));
    });
}

#[tokio::test(start_paused = true)]
async fn poll_failures_do_not_stop_the_watch() {
    let backend = FakeBackend::new();
    backend.push_error(BackendError::Transport("connection refused".into()));
    backend.push_error(BackendError::Status { code: 502, detail: "bad gateway".into() });
    backend.push_snapshot(finished(RunStatus::Completed));

    let mut handle = spawn(&backend);
    let events = drain(&mut handle).await;

    assert_eq!(events.len(), 3);
    assert!(matches!(events[0], WatchEvent::PollFailed(BackendError::Transport(_))));
    assert!(matches!(events[1], WatchEvent::PollFailed(BackendError::Status { code: 502, .. })));
    assert!(matches!(events[2], WatchEvent::Finished(_)));
}

#[tokio::test(start_paused = true)]
async fn polls_on_the_configured_interval() {
    let backend = FakeBackend::new();
    backend.push_snapshot(running(Phase::DataProfiling));

    let _handle = spawn(&backend);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(backend.snapshot_fetches(), 1);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(backend.snapshot_fetches(), 2);

    tokio::time::sleep(Duration::from_secs(4)).await;
    assert_eq!(backend.snapshot_fetches(), 4);
}

#[tokio::test(start_paused = true)]
async fn cancel_stops_polling() {
    let backend = FakeBackend::new();
    backend.push_snapshot(running(Phase::DataProfiling));

    let mut handle = spawn(&backend);
    assert!(matches!(handle.next().await, Some(WatchEvent::Snapshot(_)) | Some(WatchEvent::Tick { .. })));

    handle.cancel();
    drain(&mut handle).await;
    let fetches = backend.snapshot_fetches();

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(backend.snapshot_fetches(), fetches);
}

#[tokio::test(start_paused = true)]
async fn response_after_cancellation_is_discarded() {
    let backend = FakeBackend::new();
    backend.set_fetch_delay(Duration::from_secs(5));
    backend.push_snapshot(finished(RunStatus::Completed));

    let mut handle = spawn(&backend);
    tokio::time::sleep(Duration::from_secs(1)).await;
    handle.cancel();

    let events = drain(&mut handle).await;
    assert!(events.is_empty(), "expected no projected events, got {events:?}");
    assert_eq!(backend.snapshot_fetches(), 1);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_handle_cancels() {
    let backend = FakeBackend::new();
    backend.push_snapshot(running(Phase::DataProfiling));

    let handle = spawn(&backend);
    tokio::time::sleep(Duration::from_secs(3)).await;
    drop(handle);

    tokio::time::sleep(Duration::from_secs(1)).await;
    let fetches = backend.snapshot_fetches();
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(backend.snapshot_fetches(), fetches);
}

#[tokio::test(start_paused = true)]
async fn ticks_report_clock_elapsed() {
    let backend = FakeBackend::new();
    backend.push_snapshot(running(Phase::DataProfiling));
    let clock = FakeClock::new();

    let mut handle =
        RunWatcher::spawn(backend.clone(), clock.clone(), RunId::new("run-test"), config());

    let mut ticks = Vec::new();
    while ticks.len() < 2 {
        if let Some(WatchEvent::Tick { elapsed }) = handle.next().await {
            ticks.push(elapsed);
            clock.advance(Duration::from_secs(3));
        }
    }
    assert_eq!(ticks, vec![Duration::ZERO, Duration::from_secs(3)]);
}

#[tokio::test(start_paused = true)]
async fn join_returns_after_finish() {
    let backend = FakeBackend::new();
    backend.push_snapshot(finished(RunStatus::Failed));

    let mut handle = spawn(&backend);
    while handle.next().await.is_some() {}
    handle.join().await;
    assert_eq!(backend.snapshot_fetches(), 1);
}

#[tokio::test(start_paused = true)]
async fn stalled_consumer_queue_stays_bounded() {
    let backend = FakeBackend::new();
    backend.push_snapshot(running(Phase::DataProfiling));

    let mut handle = spawn(&backend);
    tokio::time::sleep(Duration::from_secs(300)).await;
    handle.cancel();

    let mut ticks = 0;
    let mut snapshots = 0;
    while let Some(event) = handle.next().await {
        match event {
            WatchEvent::Tick { .. } => ticks += 1,
            WatchEvent::Snapshot(_) => snapshots += 1,
            other => panic!("unexpected {other:?}"),
        }
    }
    assert!(ticks + snapshots <= EVENT_BUFFER, "{ticks} ticks, {snapshots} snapshots");
    assert!(ticks <= EVENT_BUFFER / 2);
    assert!(snapshots > 0);
}
