//! CLI argument definitions using clap
//!
//! Commands:
//! - semmelweis analyze [--config <path>] [--yearly <csv>] [--monthly <csv>]
//!   [--format json|text] [--charts <path>]

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Semmelweis - the 1840s Vienna handwashing analysis
#[derive(Parser, Debug)]
#[command(name = "semmelweis")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the analysis and print the report
    Analyze {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Yearly per-clinic CSV, overrides the configured path
        #[arg(long)]
        yearly: Option<PathBuf>,

        /// Monthly CSV, overrides the configured path
        #[arg(long)]
        monthly: Option<PathBuf>,

        /// Report format on stdout
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Write chart specs here, one JSON object per line
        #[arg(long)]
        charts: Option<PathBuf>,
    },
}

/// Report rendering on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
