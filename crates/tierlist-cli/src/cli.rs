//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "tierlist",
    version,
    about = "Edit operator tier lists stored as JSON snapshots",
    long_about = "Inspect, check and edit operator tier lists.\n\n\
                  Tier lists live in a store directory as <slug>.json files.\n\
                  Edits are applied through the same engine the editor uses and\n\
                  saved by reconciling the store with the resulting payload."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Editor configuration file (default: the platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show a tier list, or list the stored tier lists when no slug is given.
    Show(ShowArgs),

    /// Verify the ordering invariants of a stored tier list.
    Check(SlugArgs),

    /// Apply an edit script to a tier list and save the result.
    Edit(EditArgs),

    /// Print the changes a save payload would make to a stored tier list.
    Plan(PlanArgs),

    /// List operators that can still be added to a tier list.
    Candidates(CandidatesArgs),
}

#[derive(Args)]
pub struct StoreArgs {
    /// Directory holding the <slug>.json tier lists.
    #[arg(long = "store", value_name = "DIR", default_value = ".")]
    pub store: PathBuf,
}

#[derive(Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    #[arg(value_name = "SLUG")]
    pub slug: Option<String>,

    /// Operator catalog (JSON array) used to show names instead of ids.
    #[arg(long = "operators", value_name = "FILE")]
    pub operators: Option<PathBuf>,
}

#[derive(Args)]
pub struct SlugArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    #[arg(value_name = "SLUG")]
    pub slug: String,
}

#[derive(Args)]
pub struct EditArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    #[arg(value_name = "SLUG")]
    pub slug: String,

    /// Edit script (JSON list of steps).
    #[arg(long = "script", value_name = "FILE")]
    pub script: PathBuf,

    /// Operator catalog; when given, unknown operators are refused.
    #[arg(long = "operators", value_name = "FILE")]
    pub operators: Option<PathBuf>,

    /// Apply the script and print the payload without saving.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    #[arg(value_name = "SLUG")]
    pub slug: String,

    /// Save payload (JSON) to plan against the stored tier list.
    #[arg(long = "payload", value_name = "FILE")]
    pub payload: PathBuf,
}

#[derive(Args)]
pub struct CandidatesArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    #[arg(value_name = "SLUG")]
    pub slug: String,

    /// Operator catalog (JSON array).
    #[arg(long = "operators", value_name = "FILE")]
    pub operators: PathBuf,

    /// Case-insensitive name filter.
    #[arg(long = "search", default_value = "")]
    pub search: String,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
