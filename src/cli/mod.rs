//! CLI command handling
//!
//! Runs each subcommand against the library and formats its output.

use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::commands::Commands;
use crate::common::config::Config;
use crate::common::{Error, Result};
use crate::guide::{self, CatalogSummary, GuideOptions};
use crate::migration::{docente_overrides, render_migration, write_migration};
use crate::rewrite::Rewriter;
use crate::seed::{load_seed_files, SeedLayout, SeedScanner, SeedSet};

/// Dispatch a CLI command
pub async fn dispatch(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Extract { files, layout, json } => {
            let set = load_seeds(files, layout, config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&set.scenarios)?);
            } else {
                print_scenarios(&set);
                print_seed_report(&set);
            }
            Ok(())
        }

        Commands::Rewrite { text, field } => {
            let rewriter = Rewriter::new()?;
            println!("{}", rewriter.rewrite(field, &text));
            Ok(())
        }

        Commands::Migrate {
            files,
            layout,
            output,
            no_rewrite,
        } => {
            let mut set = load_seeds(files, layout, config)?;
            print_seed_report(&set);

            if no_rewrite {
                println!("  {}", "Rewrite skipped (--no-rewrite)".dimmed());
            } else {
                let stats = Rewriter::new()?.rewrite_scenarios(&mut set.scenarios);
                println!(
                    "  Rewrote {} of {} step fields",
                    stats.fields_changed,
                    stats.steps * 2
                );
            }

            let sources: Vec<PathBuf> = set.files.iter().map(|f| f.path.clone()).collect();
            let sql = render_migration(&set.scenarios, &sources)?;
            let output = output.unwrap_or_else(|| config.migration.output.clone());
            write_migration(&output, &sql)?;

            println!(
                "\n{} Wrote {} UPDATE statements to {}",
                "✓".green(),
                set.scenarios.len() + docente_overrides().len(),
                output.display()
            );
            Ok(())
        }

        Commands::Guide {
            env_file,
            output,
            dry_run,
        } => {
            let options = GuideOptions {
                env_file: env_file.unwrap_or_else(|| config.guide.env_file.clone()),
                output: output.unwrap_or_else(|| config.guide.output.clone()),
                page_size: config.guide.page_size,
                dry_run,
            };
            run_guide(&options).await
        }
    }
}

/// Parse the given seed files, or the configured ones when none are given
fn load_seeds(files: Vec<PathBuf>, layout: Option<SeedLayout>, config: &Config) -> Result<SeedSet> {
    let files = if files.is_empty() {
        config.seeds.files.clone()
    } else {
        files
    };
    if files.is_empty() {
        return Err(Error::NoSeedFiles);
    }

    let scanner = SeedScanner::new()?;
    let set = load_seed_files(&scanner, &files, layout.unwrap_or(config.seeds.layout))?;
    for path in &set.missing {
        eprintln!("{} {} not found, skipping", "Warning:".yellow(), path.display());
    }
    Ok(set)
}

fn print_scenarios(set: &SeedSet) {
    for scenario in &set.scenarios {
        println!(
            "{:<18} {} {}",
            scenario.role.as_str().cyan(),
            scenario.name,
            format!("({} steps)", scenario.steps.len()).dimmed()
        );
    }
    if !set.scenarios.is_empty() {
        println!();
    }
}

fn print_seed_report(set: &SeedSet) {
    for file in &set.files {
        let skipped = if file.skipped > 0 {
            format!(", {} skipped", file.skipped).yellow().to_string()
        } else {
            String::new()
        };
        println!(
            "  {} {} scenarios [{}]{}",
            display_name(&file.path).bold(),
            file.extracted,
            file.layout,
            skipped
        );
    }
    println!(
        "  Total: {} scenarios from {} file(s), {} block(s) skipped",
        set.scenarios.len(),
        set.files.len(),
        set.skipped()
    );
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

async fn run_guide(options: &GuideOptions) -> Result<()> {
    println!("{}", "GENERA QA Guide Generator".bold());
    println!("{}", "=".repeat(50));
    println!("Fetching scenarios from Supabase...");

    let summary = guide::fetch_summary(options).await?;
    print_summary(&summary);

    if options.dry_run {
        return Ok(());
    }

    println!("Generating DOCX...");
    guide::write_guide(&summary, &options.output, |section| {
        println!("  {section}");
    })?;

    println!();
    println!("{} Document saved to {}", "✓".green(), options.output.display());
    Ok(())
}

fn print_summary(summary: &CatalogSummary) {
    for role in &summary.roles {
        println!("  {}: {} scenarios", role.role.display_name(), role.count());
    }
    if summary.unknown > 0 {
        println!(
            "  {} {} scenario(s) with an unknown role were skipped",
            "Warning:".yellow(),
            summary.unknown
        );
    }
    println!("Total: {} scenarios", summary.total().to_string().bold());
    println!();
}
