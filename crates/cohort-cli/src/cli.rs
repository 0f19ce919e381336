//! CLI argument definitions for the cohort consolidator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "cohort",
    version,
    about = "Cohort consolidator - reconcile per-person attributes across sources",
    long_about = "Reconcile per-person socio-demographic attributes recorded\n\
                  redundantly across the household surveys and the status\n\
                  registry, producing one canonical record per person."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Consolidate the source tables of a data folder.
    Run(RunArgs),

    /// List the expected source tables and their columns.
    Sources,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Path to the folder containing the source CSV files.
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Output file for the canonical table
    /// (default: <DATA_DIR>/canonical_records.csv).
    #[arg(long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write a JSON run report with per-attribute fill statistics.
    #[arg(long = "report", value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Consolidate and report without writing the canonical table.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
