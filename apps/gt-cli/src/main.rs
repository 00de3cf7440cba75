//! # gt-cli
//!
//! Command-line interface for Goal Tracker.
//!
//! Records employee performance goals and reads them back:
//! - `gt goal add/list/show/update/delete/export` — manage the goal table
//! - `gt report ...` — counts, group statistics and highlight lists
//! - `gt diagnose goal/org/individual` — rule-based diagnoses

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::TrackerConfig;

const DEFAULT_LOG_DIRECTIVES: &str = "gt_goal=info,gt_diagnosis=info,gt=info";

/// Goal Tracker CLI — record, report on and diagnose employee goals.
#[derive(Parser)]
#[command(name = "gt", version, about)]
struct Cli {
    /// Project root directory (defaults to current directory).
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage goal records.
    Goal {
        #[command(subcommand)]
        command: commands::goal::GoalCommands,
    },
    /// Summaries and group statistics over the goal table.
    Report {
        #[command(subcommand)]
        command: commands::report::ReportCommands,
    },
    /// Run one of the diagnostic evaluators.
    Diagnose {
        #[command(subcommand)]
        command: commands::diagnose::DiagnoseCommands,
    },
}

fn main() -> anyhow::Result<()> {
    // RUST_LOG, when set, replaces the defaults entirely.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVES));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let project_root = cli.project_root.canonicalize().unwrap_or(cli.project_root);
    let config = TrackerConfig::load(&project_root)?;

    match &cli.command {
        Commands::Goal { command } => commands::goal::execute(command, &config),
        Commands::Report { command } => commands::report::execute(command, &config),
        Commands::Diagnose { command } => commands::diagnose::execute(command, &config),
    }
}
