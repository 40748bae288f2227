//! Statistics errors
//!
//! A statistics error is fatal to the computation that raised it, never to
//! the run: callers report it instead of a number.

use thiserror::Error;

use crate::observability::Severity;

/// Result type for statistics operations
pub type StatsResult<T> = Result<T, StatsError>;

/// Statistics errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    #[error("Insufficient data: sample '{sample}' has {actual} defined values, at least {required} required")]
    InsufficientData {
        sample: String,
        required: usize,
        actual: usize,
    },

    #[error("Degenerate variance: {0}")]
    DegenerateVariance(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Distribution error: {0}")]
    Distribution(String),
}

impl StatsError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            StatsError::InsufficientData { .. } => "SEMMELWEIS_INSUFFICIENT_DATA",
            StatsError::DegenerateVariance(_) => "SEMMELWEIS_DEGENERATE_VARIANCE",
            StatsError::InvalidParameter(_) => "SEMMELWEIS_INVALID_PARAMETER",
            StatsError::Distribution(_) => "SEMMELWEIS_DISTRIBUTION",
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::Error
    }

    pub(crate) fn insufficient(sample: &str, required: usize, actual: usize) -> Self {
        StatsError::InsufficientData {
            sample: sample.to_string(),
            required,
            actual,
        }
    }
}
