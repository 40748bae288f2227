//! Regime means, the trailing rolling mean, and the before/after comparison

use chrono::NaiveDate;
use serde::Serialize;

use super::splitter::Dated;
use crate::rates::Rated;

/// Trailing window length of the rolling mean, in months
pub const ROLLING_WINDOW: usize = 6;

/// Arithmetic mean over the non-NaN values; `None` if there are none
pub fn mean_defined(values: &[f64]) -> Option<f64> {
    let (sum, count) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Trailing mean over the most recent `window` values, current included.
///
/// The first `window - 1` positions are `None`, as is any position whose
/// window contains a NaN. Never looks ahead. A zero window yields no values.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| {
            if window == 0 || i + 1 < window {
                return None;
            }
            let slice = &values[i + 1 - window..=i];
            if slice.iter().any(|v| v.is_nan()) {
                return None;
            }
            Some(slice.iter().sum::<f64>() / window as f64)
        })
        .collect()
}

/// One month of the rolling series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RollingPoint {
    pub date: NaiveDate,
    pub pct_deaths: f64,
    pub rolling_mean: Option<f64>,
}

/// Rolling mean of `pct_deaths` over date-ordered rows of one regime
pub fn rolling_series<T: Dated>(rows: &[Rated<T>], window: usize) -> Vec<RollingPoint> {
    let rates: Vec<f64> = rows.iter().map(|r| r.pct_deaths).collect();
    rows.iter()
        .zip(rolling_mean(&rates, window))
        .map(|(row, rolling)| RollingPoint {
            date: row.date(),
            pct_deaths: row.pct_deaths,
            rolling_mean: rolling,
        })
        .collect()
}

/// Before/after regime means and the two derived scalars
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegimeComparison {
    pub mean_before: Option<f64>,
    pub mean_after: Option<f64>,
    /// mean(before) - mean(after)
    pub difference: Option<f64>,
    /// mean(before) / mean(after), `None` when mean(after) is zero
    pub ratio: Option<f64>,
}

impl RegimeComparison {
    pub fn from_means(mean_before: Option<f64>, mean_after: Option<f64>) -> Self {
        let (difference, ratio) = match (mean_before, mean_after) {
            (Some(b), Some(a)) => (Some(b - a), if a == 0.0 { None } else { Some(b / a) }),
            _ => (None, None),
        };

        Self {
            mean_before,
            mean_after,
            difference,
            ratio,
        }
    }

    pub fn from_samples(before: &[f64], after: &[f64]) -> Self {
        Self::from_means(mean_defined(before), mean_defined(after))
    }
}
