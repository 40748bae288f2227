//! Report output for the CLI
//!
//! - The report goes to stdout, UTF-8
//! - JSON is one object; undefined numbers are `null`
//! - Logs never go to stdout

use std::io::{self, Write};

use super::errors::CliResult;
use crate::config::FormatConfig;
use crate::report::{render_text, AnalysisReport};

/// Write the report as pretty JSON
pub fn write_json_report<W: Write>(out: &mut W, report: &AnalysisReport) -> CliResult<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Write the narrative lines
pub fn write_text_report<W: Write>(
    out: &mut W,
    report: &AnalysisReport,
    format: &FormatConfig,
) -> CliResult<()> {
    out.write_all(render_text(report, format).as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Locked stdout
pub fn stdout() -> io::StdoutLock<'static> {
    io::stdout().lock()
}
