mod config;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use env_logger::{Builder, Env, Target};

use series_rename::flat_rename::plan_flat_folder;
use series_rename::preview::{build_tree, empty_plan_notice, print_flat, print_tree};
use series_rename::tui::{SessionOutcome, run_tui};
use series_rename::{ChangeExecutor, ConfigBuilder, RenameEngine, RenameOperation};

use config::{Args, Config, Presentation};

fn main() -> Result<()> {
    let config = Config::from_args(Args::parse());
    init_logger(&config);

    let (root, series_name, operations) = plan(&config)?;

    if let Some(notice) = empty_plan_notice(&operations) {
        println!("{notice}");
        return Ok(());
    }

    let executor = ChangeExecutor::new(config.dry_run);
    match config.presentation {
        Presentation::Json => {
            let json = serde_json::to_string_pretty(&operations).context("Failed to serialize plan")?;
            println!("{json}");
            Ok(())
        }
        Presentation::Tui => {
            let outcome = run_tui(root, series_name, operations, executor)
                .context("Terminal interface failed")?;
            report_session(&outcome, config.dry_run)
        }
        Presentation::Flat | Presentation::Tree => {
            if config.presentation == Presentation::Tree {
                print_tree(&build_tree(&root, &operations));
            } else {
                print_flat(&root, &operations);
            }
            if !config.assume_yes && !confirm(operations.len())? {
                println!("Cancelled, nothing renamed.");
                return Ok(());
            }
            apply(&executor, &operations)
        }
    }
}

fn init_logger(config: &Config) {
    Builder::from_env(Env::default().default_filter_or(config.log_level.as_str()))
        .target(Target::Stderr)
        .format_timestamp(None)
        .init();
}

/// Root, display name and operations for the selected mode.
fn plan(config: &Config) -> Result<(PathBuf, String, Vec<RenameOperation>)> {
    if config.flat_mode {
        let folder = config.path.clone();
        let name = folder_label(&folder);
        let operations = plan_flat_folder(&folder)
            .with_context(|| format!("Failed to plan renames in {}", folder.display()))?;
        return Ok((folder, name, operations));
    }

    let series = ConfigBuilder::new()
        .root(&config.path)
        .series_name(config.series_name.clone())
        .build()?;
    let engine = RenameEngine::new(series);
    let operations = engine.plan()?;
    let series = engine.config().clone();
    Ok((series.root, series.series_name, operations))
}

fn folder_label(folder: &Path) -> String {
    series_rename::rename_engine::derive_series_name(folder)
        .unwrap_or_else(|_| folder.display().to_string())
}

fn confirm(count: usize) -> Result<bool> {
    print!("Apply {count} renames? [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn apply(executor: &ChangeExecutor, operations: &[RenameOperation]) -> Result<()> {
    let report = executor.execute(operations)?;
    let verb = if report.dry_run { "Would rename" } else { "Renamed" };
    println!(
        "{}",
        format!("{verb} {} entries ({} unchanged)", report.renamed, report.skipped).green()
    );
    Ok(())
}

fn report_session(outcome: &SessionOutcome, dry_run: bool) -> Result<()> {
    match outcome {
        SessionOutcome::Cancelled => println!("Cancelled, nothing renamed."),
        SessionOutcome::Completed { renamed, skipped } => {
            let verb = if dry_run { "Would rename" } else { "Renamed" };
            println!(
                "{}",
                format!("{verb} {renamed} entries ({skipped} unchanged)").green()
            );
        }
        SessionOutcome::Halted {
            applied,
            total,
            message,
        } => {
            anyhow::bail!("{message} ({applied} of {total} operations applied)");
        }
    }
    Ok(())
}
