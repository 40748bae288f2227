//! Observable events of an analysis run
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events in the analysis pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Analysis run begins
    AnalysisStart,
    /// Analysis run complete, report produced
    AnalysisComplete,
    /// Analysis aborted (FATAL)
    AnalysisAborted,

    // Configuration
    /// Configuration loaded
    ConfigLoaded,

    // Loading
    /// A table was read from disk
    TableLoaded,
    /// A required column is absent (FATAL)
    MissingData,
    /// Data-quality findings for a table
    QualityChecked,

    // Rates
    /// Death rates attached to a table
    RatesDerived,
    /// births = 0 on a row, rate is undefined
    DivisionUndefined,

    // Regimes
    /// Monthly rows partitioned around the cutoff
    RegimesSplit,
    /// Regime means and rolling mean computed
    RegimesAggregated,

    // Significance
    /// Two-sample test computed
    SignificanceComputed,
    /// Two-sample test could not be computed
    SignificanceFailed,
    /// Density of one regime could not be estimated
    DensityUndefined,

    // Output
    /// Chart specs handed to the plotting sink
    ChartsEmitted,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::AnalysisStart => "ANALYSIS_BEGIN",
            Event::AnalysisComplete => "ANALYSIS_COMPLETE",
            Event::AnalysisAborted => "ANALYSIS_ABORTED",

            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::TableLoaded => "TABLE_LOADED",
            Event::MissingData => "MISSING_DATA",
            Event::QualityChecked => "QUALITY_CHECKED",

            Event::RatesDerived => "RATES_DERIVED",
            Event::DivisionUndefined => "DIVISION_UNDEFINED",

            Event::RegimesSplit => "REGIMES_SPLIT",
            Event::RegimesAggregated => "REGIMES_AGGREGATED",

            Event::SignificanceComputed => "SIGNIFICANCE_COMPUTED",
            Event::SignificanceFailed => "SIGNIFICANCE_FAILED",
            Event::DensityUndefined => "DENSITY_UNDEFINED",

            Event::ChartsEmitted => "CHARTS_EMITTED",
        }
    }

    /// Returns true if this event aborts the run
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::AnalysisAborted | Event::MissingData)
    }

    /// Returns true if this event reports a non-fatal fault
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Event::DivisionUndefined | Event::SignificanceFailed | Event::DensityUndefined
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
