// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pw list`

use anyhow::Result;
use pw_adapters::Backend;
use pw_core::{short, RunStatus};
use pw_wire::RunSummary;
use std::io::Write;

use super::explain;
use crate::color;
use crate::output::{handle_list, pad, OutputFormat};

pub async fn handle<B: Backend>(backend: &B, format: OutputFormat) -> Result<()> {
    let runs = backend.list_runs().await.map_err(explain)?;
    handle_list(format, &runs, "No runs", |items, out| {
        let _ = writeln!(out, "{}", color::header(&table_header()));
        for run in items {
            let _ = writeln!(out, "{}", row(run));
        }
    })
}

fn table_header() -> String {
    format!("{} {} {} {}", pad("ID", 10), pad("STATUS", 22), pad("PHASE", 20), "OBJECTIVES")
}

fn row(run: &RunSummary) -> String {
    let parsed = RunStatus::parse(&run.status);
    let objectives = match run.objectives.char_indices().nth(48) {
        Some(_) => format!("{}…", short(&run.objectives, 47)),
        None => run.objectives.clone(),
    };
    format!(
        "{} {} {} {}",
        color::literal(&pad(short(&run.run_id, 8), 10)),
        color::run_status(parsed, &pad(&run.status, 22)),
        pad(&run.current_phase, 20),
        color::muted(&objectives)
    )
    .trim_end()
    .to_string()
}
