//! CLI command implementations

use std::path::{Path, PathBuf};

use crate::charts::{charts_for, emit_all, JsonLinesSink};
use crate::config::AnalysisConfig;
use crate::observability::{log_event_with_fields, Event};
use crate::pipeline::run_analysis;

use super::args::{Command, OutputFormat};
use super::errors::{CliError, CliResult};
use super::io::{stdout, write_json_report, write_text_report};

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Analyze {
            config,
            yearly,
            monthly,
            format,
            charts,
        } => {
            let config = resolve_config(config.as_deref(), yearly, monthly)?;
            analyze(&config, format, charts.as_deref())
        }
    }
}

/// Configuration file (or defaults) with command-line path overrides applied
pub fn resolve_config(
    path: Option<&Path>,
    yearly: Option<PathBuf>,
    monthly: Option<PathBuf>,
) -> CliResult<AnalysisConfig> {
    let mut config = match path {
        Some(p) => AnalysisConfig::load(p)?,
        None => AnalysisConfig::default(),
    };

    if yearly.is_some() {
        config.yearly_path = yearly;
    }
    if monthly.is_some() {
        config.monthly_path = monthly;
    }
    config.validate()?;

    if config.yearly_path.is_none() || config.monthly_path.is_none() {
        return Err(CliError::config_error(
            "both --yearly and --monthly (or yearly_path and monthly_path) are required",
        ));
    }

    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            (
                "source",
                &path.map_or_else(|| "defaults".to_string(), |p| p.display().to_string()),
            ),
            ("significance_level", &config.significance_level.to_string()),
        ],
    );

    Ok(config)
}

/// Run the analysis, print the report, and optionally write chart specs
pub fn analyze(
    config: &AnalysisConfig,
    format: OutputFormat,
    charts_path: Option<&Path>,
) -> CliResult<()> {
    let report = run_analysis(config)?;

    if let Some(path) = charts_path {
        let charts = charts_for(&report);
        let mut sink = JsonLinesSink::create(path).map_err(|e| {
            CliError::io_error(format!("cannot create {}: {}", path.display(), e))
        })?;
        emit_all(&charts, &mut sink)?;
        log_event_with_fields(
            Event::ChartsEmitted,
            &[
                ("charts", &charts.len().to_string()),
                ("path", &path.display().to_string()),
            ],
        );
    }

    let mut out = stdout();
    match format {
        OutputFormat::Json => write_json_report(&mut out, &report),
        OutputFormat::Text => write_text_report(&mut out, &report, &config.format),
    }
}
