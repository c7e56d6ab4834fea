// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pw phases`

use anyhow::Result;
use pw_core::{PhaseMeta, PHASE_TABLE};
use std::io::Write;

use crate::color;
use crate::output::{handle_list, pad, OutputFormat};

pub fn handle(format: OutputFormat) -> Result<()> {
    handle_list(format, &PHASE_TABLE, "No phases", |items, out| {
        for (idx, meta) in items.iter().enumerate() {
            let _ = writeln!(out, "{}", line(idx, meta));
        }
    })
}

fn line(idx: usize, meta: &PhaseMeta) -> String {
    let mut line = format!(
        "{}. {} {}",
        idx + 1,
        color::header(&pad(meta.label, 21)),
        color::context(meta.description)
    );
    if meta.phase.is_reenterable() {
        line.push_str(&color::muted(" (may repeat)"));
    }
    line
}
