use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    name = env!("CARGO_BIN_NAME"),
    about = "Rename a TV series folder into Series_S##_E## form"
)]
pub struct Args {
    /// Series root folder (or the folder to number with --flat)
    #[arg(value_hint = clap::ValueHint::DirPath)]
    path: Option<PathBuf>,

    /// Series name used in new names [default: name of the root folder]
    #[arg(short, long)]
    name: Option<String>,

    /// Print the plan and confirm on stdin instead of opening the TUI
    #[arg(short, long)]
    print: bool,

    /// Show the plan as a directory tree (with --print)
    #[arg(short, long, requires = "print")]
    tree: bool,

    /// Print the plan as JSON and exit without renaming
    #[arg(short, long, conflicts_with_all = ["print", "yes"])]
    json: bool,

    /// Rename without asking for confirmation
    #[arg(short, long)]
    yes: bool,

    /// Go through the plan without renaming anything
    #[arg(short, long)]
    dry_run: bool,

    /// Number every entry of a single folder as E01, E02, ...
    #[arg(short, long, conflicts_with = "name")]
    flat: bool,

    /// Print verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    Tui,
    Flat,
    Tree,
    Json,
}

/// Final config created from CLI arguments.
#[derive(Debug)]
pub struct Config {
    pub(crate) path: PathBuf,
    pub(crate) series_name: Option<String>,
    pub(crate) presentation: Presentation,
    pub(crate) assume_yes: bool,
    pub(crate) dry_run: bool,
    pub(crate) flat_mode: bool,
    pub(crate) log_level: LevelFilter,
}

impl Config {
    pub fn from_args(args: Args) -> Self {
        let presentation = if args.json {
            Presentation::Json
        } else if args.tree {
            Presentation::Tree
        } else if args.print || args.yes {
            Presentation::Flat
        } else {
            Presentation::Tui
        };

        Self {
            path: args.path.unwrap_or_else(|| PathBuf::from(".")),
            series_name: args.name,
            presentation,
            assume_yes: args.yes,
            dry_run: args.dry_run,
            flat_mode: args.flat,
            log_level: if args.verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Warn
            },
        }
    }
}
