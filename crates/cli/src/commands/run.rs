// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pw run`

use anyhow::Result;
use clap::{Args, ValueEnum};
use pw_adapters::{Backend, DesktopNotifyAdapter};
use pw_wire::{CreateRunRequest, DatasetFormat};

use super::{explain, watch, Context};
use crate::color;
use crate::output::format_or_json;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Dataset path as seen by the orchestrator
    #[arg(long, value_name = "PATH")]
    pub dataset: Option<String>,

    /// What the run should optimize for, in plain language
    #[arg(long)]
    pub objectives: Option<String>,

    /// Dataset file format
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Critic loop budget
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub max_loops: Option<u8>,

    /// LLM provider used by the orchestrator's agents
    #[arg(long, value_enum)]
    pub llm_provider: Option<ProviderArg>,

    /// Follow the run after starting it
    #[arg(long)]
    pub watch: bool,

    /// Send a desktop notification when the watched run finishes
    #[arg(long, requires = "watch")]
    pub notify: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Parquet,
    Json,
}

impl From<FormatArg> for DatasetFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => DatasetFormat::Csv,
            FormatArg::Parquet => DatasetFormat::Parquet,
            FormatArg::Json => DatasetFormat::Json,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum ProviderArg {
    Anthropic,
    Openai,
}

impl ProviderArg {
    fn as_str(self) -> &'static str {
        match self {
            ProviderArg::Anthropic => "anthropic",
            ProviderArg::Openai => "openai",
        }
    }
}

impl RunArgs {
    pub fn request(&self) -> CreateRunRequest {
        let mut request = CreateRunRequest::new();
        if let Some(path) = &self.dataset {
            request = request.dataset_path(path.as_str());
        }
        if let Some(objectives) = &self.objectives {
            request = request.objectives(objectives.as_str());
        }
        if let Some(format) = self.format {
            request = request.dataset_format(format);
        }
        if let Some(n) = self.max_loops {
            request = request.max_loops(n);
        }
        if let Some(provider) = self.llm_provider {
            request = request.llm_provider(provider.as_str());
        }
        request
    }
}

pub async fn handle(ctx: &Context, args: RunArgs) -> Result<()> {
    let backend = ctx.backend()?;
    let created = backend.create_run(&args.request()).await.map_err(explain)?;
    tracing::info!(run_id = %created.run_id, "run created");

    if args.watch {
        // Keep stdout a single stream of timelines (or JSON lines) while watching.
        eprintln!("Started run {}", created.run_id);
        let notifier = args.notify.then(DesktopNotifyAdapter::new);
        return watch::watch_run(backend, notifier, created.run_id, ctx.watch_config(), ctx.format)
            .await;
    }

    format_or_json(ctx.format, &created, || {
        println!("Started run {}", color::header(&created.run_id));
        println!("{}", color::context(&format!("Follow it with: pw watch {}", created.run_id)));
    })
}
