//! The analysis report
//!
//! `AnalysisReport` is the complete, serializable result of one run. The
//! text renderer turns it into the narrative lines under a `FormatConfig`.

pub mod format;
mod text;

use chrono::NaiveDate;
use serde::Serialize;

use crate::quality::{MonthlyQuality, TableQuality};
use crate::regime::{Regime, RegimeComparison, RollingPoint};
use crate::stats::{DensityEstimate, StatsError, Summary, TTestResult};
use crate::yearly::YearlyAnalysis;

pub use text::render_text;

/// Everything one run produces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub quality: QualityReport,
    pub yearly: YearlyAnalysis,
    pub monthly: MonthlyReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityReport {
    pub yearly: TableQuality,
    pub monthly: MonthlyQuality,
}

/// One month with its rate and regime label
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelledMonth {
    pub date: NaiveDate,
    pub births: u64,
    pub deaths: u64,
    pub pct_deaths: f64,
    pub handwashing: Regime,
}

/// Statistics of one regime
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegimeReport {
    pub regime: Regime,
    pub months: usize,
    /// Box-plot statistics of `pct_deaths`
    pub summary: Summary,
    /// Clipped density of `pct_deaths`, absent when it cannot be estimated
    pub density: Option<DensityEstimate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyReport {
    pub cutoff: NaiveDate,
    pub months: Vec<LabelledMonth>,
    /// 1-based rows whose rate is undefined (births = 0)
    pub undefined_rate_rows: Vec<usize>,
    pub births: Summary,
    pub deaths: Summary,
    pub pct_deaths: Summary,
    pub before: RegimeReport,
    pub after: RegimeReport,
    pub comparison: RegimeComparison,
    /// 6-month trailing mean over the `before` regime
    pub rolling_before: Vec<RollingPoint>,
    pub significance: SignificanceOutcome,
}

/// Result of the two-sample test, or why it could not be computed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SignificanceOutcome {
    Computed {
        #[serde(flatten)]
        result: TTestResult,
        alpha: f64,
        significant: bool,
    },
    Failed {
        code: String,
        message: String,
    },
}

impl SignificanceOutcome {
    pub fn computed(result: TTestResult, alpha: f64) -> Self {
        SignificanceOutcome::Computed {
            result,
            alpha,
            significant: result.is_significant(alpha),
        }
    }

    pub fn failed(error: &StatsError) -> Self {
        SignificanceOutcome::Failed {
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }

    /// The test result, if it was computed
    pub fn result(&self) -> Option<&TTestResult> {
        match self {
            SignificanceOutcome::Computed { result, .. } => Some(result),
            SignificanceOutcome::Failed { .. } => None,
        }
    }
}
