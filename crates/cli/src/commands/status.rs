// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pw status`

use anyhow::{Context as _, Result};
use clap::{ArgGroup, Args};
use pw_adapters::Backend;
use pw_core::{project, RawSnapshot, RunId, RunView};
use std::io::Read;
use std::path::{Path, PathBuf};

use super::{explain, Context};
use crate::output::{format_or_json, OutputFormat};
use crate::timeline;

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["run_id", "file"])))]
pub struct StatusArgs {
    /// Run to fetch from the orchestrator
    pub run_id: Option<String>,

    /// Read a saved status response instead (`-` for stdin)
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

pub async fn handle(ctx: &Context, args: &StatusArgs) -> Result<()> {
    let run_id = RunId::new(args.run_id.as_deref().unwrap_or_default());
    let raw = ctx.backend()?.fetch_snapshot(&run_id).await.map_err(explain)?;
    print_view(&project(&raw), ctx.format)
}

pub fn handle_file(args: &StatusArgs, format: OutputFormat) -> Result<()> {
    let path = args.file.as_deref().unwrap_or(Path::new("-"));
    let raw = load_snapshot(path)?;
    print_view(&project(&raw), format)
}

fn print_view(view: &RunView, format: OutputFormat) -> Result<()> {
    format_or_json(format, view, || print!("{}", timeline::render(view)))
}

/// Read a status response body from a file or stdin.
pub fn load_snapshot(path: &Path) -> Result<RawSnapshot> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).context("failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    Ok(RawSnapshot::from(value))
}
