//! qa-catalog - maintenance tools for the QA scenario catalogue
//!
//! Seed parsing, jargon rewriting, migration output and the tester guide,
//! behind one command-line interface.

use clap::Parser;
use qa_catalog::common::{config::Config, logging};
use qa_catalog::{cli, commands::Commands};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "qa-catalog", about = "QA scenario catalogue maintenance")]
#[command(version, long_about = None)]
struct Cli {
    /// Configuration file (default: platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    logging::init_cli();

    let cli = Cli::parse();

    let result = match Config::load(cli.config.as_deref()) {
        Ok(config) => cli::dispatch(cli.command, &config).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
