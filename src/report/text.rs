//! Human-readable narrative of a report

use super::format;
use super::{AnalysisReport, SignificanceOutcome};
use crate::config::FormatConfig;

/// Render the report as narrative lines, one finding per line
pub fn render_text(report: &AnalysisReport, config: &FormatConfig) -> String {
    let mut lines = Vec::new();
    let yearly = &report.yearly;
    let monthly = &report.monthly;

    lines.push(format!(
        "Chances of dying from childbirth in the 1840s in Vienna: {}",
        format::percent(yearly.overall_rate, config)
    ));
    for year in &yearly.by_year {
        lines.push(format!(
            "Chances of dying from childbirth in {} in Vienna: {}",
            year.year,
            format::percent(year.pct_deaths, config)
        ));
    }
    for clinic in &yearly.clinics {
        lines.push(format!(
            "Average death rate in {} is {}.",
            clinic.clinic,
            format::percent(clinic.pooled_rate, config)
        ));
        if let Some(peak) = clinic.peak_deaths {
            lines.push(format!(
                "Highest yearly deaths in {}: {} in {}",
                clinic.clinic,
                format::number(peak.deaths as f64, config),
                peak.year
            ));
        }
    }

    let cmp = &monthly.comparison;
    lines.push(format!(
        "The average monthly death rate before handwashing was: {}",
        format::optional_percent(cmp.mean_before, config)
    ));
    lines.push(format!(
        "The average monthly death rate after handwashing was: {}",
        format::optional_percent(cmp.mean_after, config)
    ));
    lines.push(format!(
        "Handwashing reduced the average monthly death rate by: {}",
        format::optional_percent(cmp.difference, config)
    ));
    lines.push(format!(
        "{} times lower chances",
        format::optional(cmp.ratio, config)
    ));

    match &monthly.significance {
        SignificanceOutcome::Computed {
            result,
            alpha,
            significant,
        } => {
            lines.push(format!(
                "p-value is {}",
                format::p_value(result.p_value, config)
            ));
            lines.push(format!(
                "t-statistic is {}",
                format::number(result.t_statistic, config)
            ));
            lines.push(format!(
                "The difference is {}significant at alpha = {}",
                if *significant { "" } else { "not " },
                alpha
            ));
        }
        SignificanceOutcome::Failed { code, message } => {
            lines.push(format!("t-test not computed: {}: {}", code, message));
        }
    }

    if !monthly.undefined_rate_rows.is_empty() {
        lines.push(format!(
            "Months with undefined death rate (no births): {}",
            monthly.undefined_rate_rows.len()
        ));
    }
    if !report.quality.yearly.is_clean() || !report.quality.monthly.is_clean() {
        lines.push("Data quality findings recorded; see report.quality".to_string());
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
