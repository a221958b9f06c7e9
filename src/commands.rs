//! CLI command definitions
//!
//! Defines the clap commands for the qa-catalog CLI.

use clap::Subcommand;
use std::path::PathBuf;

use crate::rewrite::Field;
use crate::seed::SeedLayout;

#[derive(Subcommand)]
pub enum Commands {
    /// List the scenarios found in seed files
    Extract {
        /// Seed SQL files (default: seeds.files from the config)
        files: Vec<PathBuf>,

        /// How scenario boundaries are marked
        #[arg(long, value_enum)]
        layout: Option<SeedLayout>,

        /// Print scenarios as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Preview the rewrite of one step field value
    Rewrite {
        /// Text to rewrite
        text: String,

        /// Which field the text belongs to
        #[arg(long, value_enum, default_value = "outcome")]
        field: Field,
    },

    /// Rewrite seed steps and write the UPDATE migration
    Migrate {
        /// Seed SQL files (default: seeds.files from the config)
        files: Vec<PathBuf>,

        /// How scenario boundaries are marked
        #[arg(long, value_enum)]
        layout: Option<SeedLayout>,

        /// Migration file to write
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Keep the extracted step text as is
        #[arg(long)]
        no_rewrite: bool,
    },

    /// Fetch the live catalogue and write the tester guide
    Guide {
        /// Environment file with the Supabase credentials
        #[arg(long)]
        env_file: Option<PathBuf>,

        /// Document to write
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Print the per-role summary only
        #[arg(long)]
        dry_run: bool,
    },
}
