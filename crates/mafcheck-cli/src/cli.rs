//! CLI argument definitions using clap.

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// mafcheck: consistency validator for mutation annotation files
#[derive(Parser)]
#[command(name = "mafcheck")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(long, global = true, default_value = "pretty")]
    pub log_format: LogFormatChoice,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a mutation file
    Validate(ValidateArgs),

    /// List every rule the validator can report
    Rules {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Path to the mutation file (MAF)
    #[arg(value_name = "MAF")]
    pub file: PathBuf,

    /// Gene reference table (TSV with symbol, Entrez id and aliases)
    #[arg(short, long, value_name = "TSV")]
    pub genes: Option<PathBuf>,

    /// Clinical sample file or list of sample ids
    #[arg(short, long, value_name = "FILE")]
    pub samples: Option<PathBuf>,

    /// Validator configuration (JSON)
    #[arg(short, long, value_name = "JSON")]
    pub config: Option<PathBuf>,

    /// Write the report to this path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report format (prints the report to stdout when no output path is given)
    #[arg(short, long)]
    pub format: Option<ReportFormat>,

    /// Validate records on a single thread
    #[arg(long)]
    pub no_parallel: bool,

    /// Reject records whose validation-status rules fail instead of warning
    #[arg(long)]
    pub reject_on_validation_status: bool,

    /// Declare a column namespace (e.g. ascn)
    #[arg(long = "namespace", value_name = "NAME")]
    pub namespaces: Vec<String>,

    /// Validate without a gene reference table
    #[arg(long)]
    pub allow_missing_genes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Json,
    Tsv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatChoice {
    Pretty,
    Compact,
    Json,
}
