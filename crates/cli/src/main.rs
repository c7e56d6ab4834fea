// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! pw: watch and drive ML pipeline runs from the terminal

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod color;
mod commands;
mod config;
mod exit_error;
mod logging;
mod output;
mod timeline;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use crate::commands::{artifact, graph, health, list, phases, run, status, watch, Context};
use crate::config::Config;
use crate::exit_error::ExitError;
use crate::output::OutputFormat;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("PW_BUILD_REV"), ")");

#[derive(Parser)]
#[command(name = "pw", version = VERSION, styles = color::styles())]
#[command(about = "Watch and drive ML pipeline runs")]
struct Cli {
    /// Orchestrator base URL (overrides PW_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    url: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t)]
    output: OutputFormat,

    /// More diagnostics on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the orchestrator is reachable
    Health,
    /// Start a new pipeline run
    Run(run::RunArgs),
    /// List runs known to the orchestrator
    List,
    /// Show the timeline of a run once
    Status(status::StatusArgs),
    /// Follow a run until it finishes
    Watch(watch::WatchArgs),
    /// List or download run artifacts
    Artifact {
        #[command(subcommand)]
        command: artifact::ArtifactCommand,
    },
    /// Show the pipeline phases
    Phases,
    /// Print the orchestrator's pipeline graph as Mermaid source
    Graph,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = dispatch(cli).await {
        let code = match err.downcast_ref::<ExitError>() {
            Some(exit) => {
                if !exit.message.is_empty() {
                    eprintln!("{}", exit.message);
                }
                exit.code
            }
            None => {
                eprintln!("error: {err:#}");
                1
            }
        };
        std::process::exit(code);
    }
}

async fn dispatch(cli: Cli) -> Result<()> {
    let format = cli.output;
    // Commands that never talk to the orchestrator skip config loading.
    match cli.command {
        Commands::Phases => return phases::handle(format),
        Commands::Status(args) if args.file.is_some() => {
            return status::handle_file(&args, format);
        }
        command => {
            let mut config = Config::load()?;
            if let Some(url) = cli.url {
                config.url = url;
            }
            tracing::debug!(url = %config.url, "using orchestrator");
            let ctx = Context { config, format };

            match command {
                Commands::Health => health::handle(&ctx.backend()?, format).await,
                Commands::Run(args) => run::handle(&ctx, args).await,
                Commands::List => list::handle(&ctx.backend()?, format).await,
                Commands::Status(args) => status::handle(&ctx, &args).await,
                Commands::Watch(args) => watch::handle(&ctx, args).await,
                Commands::Artifact { command } => artifact::handle(&ctx, command).await,
                Commands::Graph => graph::handle(&ctx.backend()?, format).await,
                Commands::Phases => phases::handle(format),
            }
        }
    }
}
