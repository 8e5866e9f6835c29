#![forbid(unsafe_code)]

mod cmd;
mod jira;

use anyhow::Result;
use clap::{Parser, Subcommand};
use slate_core::config::Config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "slate: local scheduling overlays and timeline export for tracker issues",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file (defaults to ./slate.toml).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Fetch issues, merge overlays, and export a timeline view",
        after_help = "EXAMPLES:\n    # Timeline for the configured projects, grouped hierarchically\n    slate export --format html --out timeline.html\n\n    # One month of two projects, grouped by assignee\n    slate export --projects SR,OPS --group-by assignee \\\n        --from 2024-03-01 --to 2024-03-31"
    )]
    Export(cmd::export::ExportArgs),

    #[command(about = "Inspect and mutate the local overlay store")]
    Overlay(cmd::overlay::OverlayArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("SLATE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "slate=debug,info"
        } else {
            "slate=info,warn"
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    match &cli.command {
        Commands::Export(args) => cmd::export::run_export(args, &config),
        Commands::Overlay(args) => cmd::overlay::run_overlay(args, &config),
    }
}
