//! The analysis pipeline
//!
//! load -> quality -> rates -> regimes -> aggregates -> significance
//!
//! Every stage is a pure function of its inputs. A missing or malformed
//! table aborts the run. An undefined rate or a test that cannot be
//! computed is recorded in the report and the run continues.

use thiserror::Error;

use crate::config::AnalysisConfig;
use crate::observability::{log_event, log_event_with_fields, Event, ObservationScope, Severity};
use crate::quality::{MonthlyQuality, TableQuality};
use crate::rates::{derive_rates, rate_column, undefined_rows, Rated};
use crate::regime::{
    handwashing_start, label_regimes, rolling_series, split_at_cutoff, Regime, RegimeComparison,
    ROLLING_WINDOW,
};
use crate::report::{
    AnalysisReport, LabelledMonth, MonthlyReport, QualityReport, RegimeReport, SignificanceOutcome,
};
use crate::stats::{clipped_density, two_sample_t_test, DensityEstimate, Summary, UNIT_INTERVAL};
use crate::table::{self, MonthlyObservation, Table, TableError};
use crate::yearly::analyze_yearly;

/// Result type for a run
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors that abort a run
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error("No path configured for the {0} table")]
    MissingInput(&'static str),
}

impl AnalysisError {
    pub fn code(&self) -> &'static str {
        match self {
            AnalysisError::Table(e) => e.code().code(),
            AnalysisError::MissingInput(_) => "SEMMELWEIS_MISSING_INPUT",
        }
    }

    /// Every run-aborting error is FATAL
    pub fn severity(&self) -> Severity {
        Severity::Fatal
    }
}

/// Load both tables named by `config` and analyze them
pub fn run_analysis(config: &AnalysisConfig) -> AnalysisResult<AnalysisReport> {
    let yearly_path = config
        .yearly_path
        .as_deref()
        .ok_or(AnalysisError::MissingInput("yearly"))?;
    let monthly_path = config
        .monthly_path
        .as_deref()
        .ok_or(AnalysisError::MissingInput("monthly"))?;

    let yearly = table::load(yearly_path).map_err(abort)?;
    let monthly = table::load(monthly_path).map_err(abort)?;
    analyze(&yearly, &monthly, config)
}

/// Analyze two already-read tables
pub fn analyze(
    yearly_table: &Table,
    monthly_table: &Table,
    config: &AnalysisConfig,
) -> AnalysisResult<AnalysisReport> {
    log_event_with_fields(
        Event::AnalysisStart,
        &[
            ("monthly", monthly_table.name()),
            ("yearly", yearly_table.name()),
        ],
    );

    let yearly_rows = table::yearly_from_table(yearly_table).map_err(abort)?;
    let monthly_rows = table::monthly_from_table(monthly_table).map_err(abort)?;

    let quality = QualityReport {
        yearly: TableQuality::check(yearly_table, &yearly_rows),
        monthly: MonthlyQuality::check(monthly_table, &monthly_rows),
    };

    let yearly = analyze_yearly(&yearly_rows);
    let monthly = analyze_monthly(&monthly_rows, config);

    log_event_with_fields(
        Event::AnalysisComplete,
        &[
            ("months", &monthly.months.len().to_string()),
            ("undefined_rates", &monthly.undefined_rate_rows.len().to_string()),
        ],
    );

    Ok(AnalysisReport {
        quality,
        yearly,
        monthly,
    })
}

/// Rates, regimes, aggregates and the significance test over monthly rows
pub fn analyze_monthly(rows: &[MonthlyObservation], config: &AnalysisConfig) -> MonthlyReport {
    let cutoff = handwashing_start();

    let rated = derive_rates(rows);
    let labels = label_regimes(&rated, cutoff);
    let months = rated
        .iter()
        .zip(&labels)
        .map(|(row, &handwashing)| LabelledMonth {
            date: row.observation.date,
            births: row.observation.births,
            deaths: row.observation.deaths,
            pct_deaths: row.pct_deaths,
            handwashing,
        })
        .collect();

    let split = split_at_cutoff(&rated, cutoff);
    let before_rates = rate_column(&split.before);
    let after_rates = rate_column(&split.after);

    let scope = ObservationScope::new("AGGREGATE");
    let comparison = RegimeComparison::from_samples(&before_rates, &after_rates);
    let rolling_before = rolling_series(&split.before, ROLLING_WINDOW);
    let before = regime_report(Regime::Before, &split.before, config);
    let after = regime_report(Regime::After, &split.after, config);
    log_event_with_fields(
        Event::RegimesAggregated,
        &[
            ("difference", &display_optional(comparison.difference)),
            ("ratio", &display_optional(comparison.ratio)),
        ],
    );
    scope.complete();

    let births: Vec<u64> = rows.iter().map(|r| r.births).collect();
    let deaths: Vec<u64> = rows.iter().map(|r| r.deaths).collect();

    MonthlyReport {
        cutoff,
        months,
        undefined_rate_rows: undefined_rows(&rated),
        births: Summary::of_counts(&births),
        deaths: Summary::of_counts(&deaths),
        pct_deaths: Summary::of(&rate_column(&rated)),
        before,
        after,
        comparison,
        rolling_before,
        significance: significance(&before_rates, &after_rates, config.significance_level),
    }
}

fn regime_report(
    regime: Regime,
    rows: &[Rated<MonthlyObservation>],
    config: &AnalysisConfig,
) -> RegimeReport {
    let rates = rate_column(rows);
    RegimeReport {
        regime,
        months: rows.len(),
        summary: Summary::of(&rates),
        density: density(regime, &rates, config.density_grid_points),
    }
}

fn density(regime: Regime, rates: &[f64], grid_points: usize) -> Option<DensityEstimate> {
    match clipped_density(rates, UNIT_INTERVAL, grid_points) {
        Ok(estimate) => Some(estimate),
        Err(e) => {
            log_event_with_fields(
                Event::DensityUndefined,
                &[
                    ("code", e.code()),
                    ("reason", &e.to_string()),
                    ("regime", regime.as_str()),
                ],
            );
            None
        }
    }
}

fn significance(before: &[f64], after: &[f64], alpha: f64) -> SignificanceOutcome {
    match two_sample_t_test(before, after) {
        Ok(result) => {
            log_event_with_fields(
                Event::SignificanceComputed,
                &[
                    ("p_value", &result.p_value.to_string()),
                    ("t_statistic", &result.t_statistic.to_string()),
                ],
            );
            SignificanceOutcome::computed(result, alpha)
        }
        Err(e) => {
            log_event_with_fields(
                Event::SignificanceFailed,
                &[("code", e.code()), ("reason", &e.to_string())],
            );
            SignificanceOutcome::failed(&e)
        }
    }
}

fn abort(e: TableError) -> AnalysisError {
    log_event(Event::AnalysisAborted);
    AnalysisError::Table(e)
}

fn display_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "null".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn yearly_table() -> Table {
        let csv = "year,births,deaths,clinic\n\
                   1841,3036,237,clinic 1\n\
                   1842,3287,518,clinic 1\n\
                   1841,2442,86,clinic 2\n\
                   1842,2659,202,clinic 2\n";
        Table::from_reader("annual_deaths_by_clinic", csv.as_bytes()).unwrap()
    }

    fn month(y: i32, m: u32, births: u64, deaths: u64) -> MonthlyObservation {
        MonthlyObservation {
            date: NaiveDate::from_ymd_opt(y, m, 1).unwrap(),
            births,
            deaths,
        }
    }

    #[test]
    fn test_analyze_monthly_splits_at_cutoff() {
        let rows = vec![
            month(1847, 3, 100, 10),
            month(1847, 4, 100, 12),
            month(1847, 5, 100, 8),
            month(1847, 6, 100, 2),
            month(1847, 7, 100, 3),
            month(1847, 8, 100, 1),
        ];
        let report = analyze_monthly(&rows, &AnalysisConfig::default());

        assert_eq!(report.before.months, 3);
        assert_eq!(report.after.months, 3);
        assert_eq!(report.months[3].handwashing, Regime::After);
        assert_eq!(report.rolling_before.len(), 3);
        assert!(report.rolling_before.iter().all(|p| p.rolling_mean.is_none()));
        assert!(report.significance.result().is_some());
    }

    #[test]
    fn test_tiny_after_regime_records_failure() {
        let rows = vec![
            month(1847, 4, 100, 12),
            month(1847, 5, 100, 8),
            month(1847, 6, 100, 2),
        ];
        let report = analyze_monthly(&rows, &AnalysisConfig::default());

        match &report.significance {
            SignificanceOutcome::Failed { code, .. } => {
                assert_eq!(code, "SEMMELWEIS_INSUFFICIENT_DATA")
            }
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(report.after.density.is_none());
    }

    #[test]
    fn test_missing_monthly_column_aborts() {
        let monthly =
            Table::from_reader("monthly_deaths", "date,births\n1847-01-01,311\n".as_bytes())
                .unwrap();
        let err = analyze(&yearly_table(), &monthly, &AnalysisConfig::default()).unwrap_err();

        assert_eq!(err.code(), "SEMMELWEIS_MISSING_DATA");
        assert_eq!(err.severity(), Severity::Fatal);
    }

    #[test]
    fn test_run_requires_configured_paths() {
        let err = run_analysis(&AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::MissingInput("yearly")));
    }
}
