// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pw watch`: follow a run until it reaches a terminal status.

use anyhow::Result;
use clap::Args;
use pw_adapters::{Backend, BackendError, DesktopNotifyAdapter, Notice, NotifyAdapter};
use pw_core::{format_elapsed, RunId, RunStatus, RunView, SystemClock};
use pw_engine::{RunWatcher, WatchConfig, WatchEvent, WatchHandle};
use std::future::Future;
use std::io::Write;
use std::time::Duration;

use super::Context;
use crate::color;
use crate::exit_error::ExitError;
use crate::output::OutputFormat;
use crate::timeline;

#[derive(Args, Debug)]
pub struct WatchArgs {
    pub run_id: String,

    /// Poll interval in milliseconds (overrides PW_POLL_MS)
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Send a desktop notification when the run finishes
    #[arg(long)]
    pub notify: bool,
}

/// How a watch ended.
#[derive(Debug)]
pub enum Outcome {
    Finished(RunView),
    Interrupted,
}

pub async fn handle(ctx: &Context, args: WatchArgs) -> Result<()> {
    let mut config = ctx.watch_config();
    if let Some(ms) = args.interval_ms {
        config.poll_interval = Duration::from_millis(ms.max(1));
    }
    let notifier = args.notify.then(DesktopNotifyAdapter::new);
    watch_run(ctx.backend()?, notifier, RunId::new(args.run_id), config, ctx.format).await
}

/// Watch `run_id` until it finishes or Ctrl-C. A failed run exits with code 1.
pub async fn watch_run<B, N>(
    backend: B,
    notifier: Option<N>,
    run_id: RunId,
    config: WatchConfig,
    format: OutputFormat,
) -> Result<()>
where
    B: Backend,
    N: NotifyAdapter,
{
    let mut handle = RunWatcher::spawn(backend, SystemClock, run_id.clone(), config);
    let mut stdout = std::io::stdout();
    let outcome = follow(&mut handle, format, &mut stdout, tokio::signal::ctrl_c()).await;
    handle.cancel();

    match outcome? {
        Outcome::Interrupted => {
            eprintln!("Stopped watching {run_id}");
            Ok(())
        }
        Outcome::Finished(view) => {
            if let Some(notifier) = notifier {
                if let Err(e) = notifier.send(&Notice::run_finished(&view)).await {
                    tracing::warn!(error = %e, "could not send notification");
                }
            }
            if view.status == RunStatus::Failed {
                return Err(ExitError::silent(1).into());
            }
            Ok(())
        }
    }
}

/// Render watch events to `out` until the run finishes or `interrupt` resolves.
///
/// Text output redraws the timeline whenever the projection changes. JSON
/// output writes one compact view per line.
pub async fn follow<W, F>(
    handle: &mut WatchHandle,
    format: OutputFormat,
    out: &mut W,
    interrupt: F,
) -> Result<Outcome>
where
    W: Write,
    F: Future,
{
    tokio::pin!(interrupt);
    let mut last: Option<RunView> = None;
    let mut elapsed = Duration::ZERO;

    loop {
        let next = tokio::select! {
            event = handle.next() => Some(event),
            _ = &mut interrupt => None,
        };
        let Some(event) = next else {
            handle.cancel();
            return Ok(Outcome::Interrupted);
        };

        match event {
            Some(WatchEvent::Tick { elapsed: e }) => elapsed = e,
            Some(WatchEvent::Snapshot(view)) => {
                if last.as_ref() != Some(&view) {
                    emit(out, format, &view, elapsed)?;
                    last = Some(view);
                }
            }
            Some(WatchEvent::Finished(view)) => {
                emit(out, format, &view, elapsed)?;
                return Ok(Outcome::Finished(view));
            }
            Some(WatchEvent::PollFailed(err)) => {
                // A 404 before any snapshot means the id is wrong, not that
                // the run is slow to appear.
                if last.is_none() && matches!(err, BackendError::NotFound(_)) {
                    handle.cancel();
                    return Err(super::explain(err));
                }
            }
            None => anyhow::bail!("watch stopped before the run finished"),
        }
    }
}

fn emit<W: Write>(out: &mut W, format: OutputFormat, view: &RunView, elapsed: Duration) -> Result<()> {
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(view)?)?,
        OutputFormat::Text => {
            write!(out, "{}", timeline::render(view))?;
            writeln!(out, "{}\n", color::muted(&format!("watching {}", format_elapsed(elapsed.as_secs()))))?;
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
