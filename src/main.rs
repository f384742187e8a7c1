mod analysis;
mod config;
mod data;
mod manager;
mod model;
mod plot;
mod report;
mod stats;

use crate::manager::Manager;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    /// Directory where results and charts are written.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Optional TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fit zero-, first- and second-order kinetics to a time/absorbance table.
    Analyze {
        #[arg(long)]
        input: PathBuf,
    },

    /// Remove results and charts from the output directory.
    Clean,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    let mgr = Manager::new(&args.out_dir, args.config.as_deref()).context("failed to construct mgr")?;

    match args.command {
        Command::Analyze { input } => mgr.run_analysis(input)?,
        Command::Clean => mgr.clean_outputs()?,
    }

    Ok(())
}
