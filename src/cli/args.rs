use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Arguments shared by encode and decode
#[derive(Args, Debug)]
pub struct TransformArgs {
    /// Algorithm to use (default: settings.default_algorithm)
    pub algorithm: Option<String>,

    /// Input file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Output file (writes to stdout if not provided)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Print the result as a JSON object
    #[arg(long)]
    pub json: bool,

    /// Append a successful transform to this JSON-lines log
    #[arg(long, value_name = "FILE")]
    pub history: Option<PathBuf>,

    /// Report input/output sizes on stderr
    #[arg(long)]
    pub stats: bool,
}

/// Config subcommand actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// List available algorithms
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration as TOML
    Show,
}

/// Arguments for reading a history log
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// History file written with --history
    pub file: PathBuf,

    /// Number of most recent entries to show
    #[arg(short = 'n', long, default_value = "10")]
    pub limit: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
