//! CLI module
//!
//! Provides command-line interface for:
//! - analyze: run the analysis, print the report, optionally emit charts

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, OutputFormat};
pub use commands::{analyze, resolve_config, run_command};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_json_report, write_text_report};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args().command)
}
