// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pw artifact`: list and download run outputs.

use anyhow::{Context as _, Result};
use clap::Subcommand;
use pw_adapters::{Backend, BackendError};
use pw_core::RunId;
use pw_engine::{fetch_artifact_when_ready, list_artifacts_when_ready, RetryPolicy};
use pw_wire::ArtifactList;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{explain, Context};
use crate::color;
use crate::output::{format_or_json, handle_list, pad, OutputFormat};

#[derive(Subcommand, Debug)]
pub enum ArtifactCommand {
    /// List a run's artifacts
    List {
        run_id: String,
        /// List generated plots with their titles instead
        #[arg(long)]
        plots: bool,
    },
    /// Download one plot
    Get {
        run_id: String,
        /// Plot file name, as shown by `pw artifact list --plots`
        name: String,
        /// Destination path (`-` for stdout); defaults to NAME in the current directory
        #[arg(short = 'o', long = "out", value_name = "PATH")]
        out: Option<PathBuf>,
    },
}

/// One listed artifact: the name `get` takes, and where the server keeps it.
#[derive(Debug, Serialize)]
struct Listed<'a> {
    name: &'a str,
    path: &'a str,
}

#[derive(Debug, Serialize)]
struct Saved<'a> {
    name: &'a str,
    path: String,
    bytes: usize,
}

pub async fn handle(ctx: &Context, command: ArtifactCommand) -> Result<()> {
    let backend = ctx.backend()?;
    match command {
        ArtifactCommand::List { run_id, plots: false } => {
            list(&backend, &RunId::new(run_id), ctx.retry_policy(), ctx.format).await
        }
        ArtifactCommand::List { run_id, plots: true } => {
            list_plots(&backend, &RunId::new(run_id), ctx.format).await
        }
        ArtifactCommand::Get { run_id, name, out } => {
            get(&backend, &RunId::new(run_id), &name, out.as_deref(), ctx.retry_policy(), ctx.format)
                .await
        }
    }
}

async fn list<B: Backend>(
    backend: &B,
    run_id: &RunId,
    policy: RetryPolicy,
    format: OutputFormat,
) -> Result<()> {
    let listing = list_artifacts_when_ready(backend, run_id, policy)
        .await
        .map_err(|e| not_ready(e, format!("artifacts not available yet for run {run_id}")))?;
    let items = listed(&listing);
    handle_list(format, &items, "No artifacts", |items, out| {
        for item in items {
            let _ = writeln!(out, "{} {}", pad(item.name, 32), color::muted(item.path));
        }
    })
}

fn listed(listing: &ArtifactList) -> Vec<Listed<'_>> {
    listing
        .artifacts
        .iter()
        .zip(listing.file_names())
        .map(|(path, name)| Listed { name, path })
        .collect()
}

async fn list_plots<B: Backend>(backend: &B, run_id: &RunId, format: OutputFormat) -> Result<()> {
    let plots = backend.list_plots(run_id).await.map_err(explain)?;
    handle_list(format, &plots, "No plots", |items, out| {
        for plot in items {
            let _ = writeln!(out, "{} {}", pad(&plot.filename, 32), color::context(&plot.title));
        }
    })
}

async fn get<B: Backend>(
    backend: &B,
    run_id: &RunId,
    name: &str,
    out: Option<&Path>,
    policy: RetryPolicy,
    format: OutputFormat,
) -> Result<()> {
    let bytes = fetch_artifact_when_ready(backend, run_id, name, policy).await.map_err(|e| {
        not_ready(
            e,
            format!(
                "{name} not found for run {run_id}: only plots can be downloaded \
                 (see `pw artifact list --plots`), or the run has not written it yet"
            ),
        )
    })?;

    let dest = out.unwrap_or(Path::new(name));
    if dest == Path::new("-") {
        let mut stdout = std::io::stdout();
        stdout.write_all(&bytes)?;
        stdout.flush()?;
        return Ok(());
    }

    std::fs::write(dest, &bytes).with_context(|| format!("failed to write {}", dest.display()))?;
    tracing::info!(%name, path = %dest.display(), bytes = bytes.len(), "artifact saved");

    let saved = Saved { name, path: dest.display().to_string(), bytes: bytes.len() };
    format_or_json(format, &saved, || {
        println!("Saved {} ({} bytes) to {}", color::header(name), saved.bytes, saved.path);
    })
}

fn not_ready(err: BackendError, context: String) -> anyhow::Error {
    if err.is_not_ready() {
        anyhow::Error::new(err).context(context)
    } else {
        explain(err)
    }
}
