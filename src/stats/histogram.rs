//! Equal-width histograms
//!
//! Bins are half-open `[lo, hi)` except the last, which is closed. NaN
//! values are excluded.

use serde::Serialize;

use super::errors::{StatsError, StatsResult};

/// Bin count of the monthly rate histogram
pub const HISTOGRAM_BINS: usize = 30;

/// `bins + 1` equally spaced edges covering every defined value.
///
/// A constant sample gets a unit-wide range centred on its value.
pub fn bin_edges(values: &[f64], bins: usize) -> StatsResult<Vec<f64>> {
    if bins == 0 {
        return Err(StatsError::InvalidParameter(
            "histogram needs at least 1 bin".to_string(),
        ));
    }

    let (min, max) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if min > max {
        return Err(StatsError::insufficient("histogram", 1, 0));
    }

    let (lo, hi) = if min == max {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };
    let width = (hi - lo) / bins as f64;

    Ok((0..=bins)
        .map(|i| if i == bins { hi } else { lo + width * i as f64 })
        .collect())
}

/// Share of one sample falling in each bin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinShares {
    /// Defined values counted
    pub count: usize,
    /// Percent of `count` per bin; sums to 100 unless `count` is 0
    pub percent: Vec<f64>,
}

/// Percent of the defined `values` in each bin of `edges`.
///
/// Values outside the edges are not counted.
pub fn bin_shares(values: &[f64], edges: &[f64]) -> BinShares {
    let bins = edges.len().saturating_sub(1);
    let mut counts = vec![0usize; bins];

    for &v in values.iter().filter(|v| !v.is_nan()) {
        if let Some(bin) = bin_of(v, edges) {
            counts[bin] += 1;
        }
    }

    let count: usize = counts.iter().sum();
    let percent = counts
        .iter()
        .map(|&c| {
            if count == 0 {
                0.0
            } else {
                100.0 * c as f64 / count as f64
            }
        })
        .collect();

    BinShares { count, percent }
}

fn bin_of(value: f64, edges: &[f64]) -> Option<usize> {
    let bins = edges.len().checked_sub(1)?;
    let (first, last) = (*edges.first()?, *edges.last()?);
    if bins == 0 || value < first || value > last {
        return None;
    }
    if value == last {
        return Some(bins - 1);
    }
    // First edge strictly above `value`, minus one
    Some(edges.partition_point(|&e| e <= value) - 1)
}
