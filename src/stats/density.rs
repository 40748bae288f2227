//! Gaussian kernel density estimate, clipped to a bounded support
//!
//! A death rate lives in [0, 1]. The estimate is only ever evaluated inside
//! the clip interval, so no mass is reported at negative rates.

use serde::Serialize;

use super::errors::{StatsError, StatsResult};
use super::ttest::MIN_SAMPLE_SIZE;

/// Support of a rate
pub const UNIT_INTERVAL: (f64, f64) = (0.0, 1.0);

/// Bandwidths past the data extremes covered by the grid
const CUT: f64 = 3.0;

/// One point of an estimated density curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DensityPoint {
    pub x: f64,
    pub density: f64,
}

/// Density curve on an evenly spaced grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityEstimate {
    /// Kernel standard deviation (Scott's rule)
    pub bandwidth: f64,
    pub clip: (f64, f64),
    pub points: Vec<DensityPoint>,
}

/// Estimate the density of `values` on `grid_points` points inside `clip`.
///
/// NaN values are excluded. Bandwidth is `σ · n^(−1/5)`; the grid spans
/// `[min − 3h, max + 3h] ∩ clip`.
pub fn clipped_density(
    values: &[f64],
    clip: (f64, f64),
    grid_points: usize,
) -> StatsResult<DensityEstimate> {
    let (clip_lo, clip_hi) = clip;
    if clip_lo.is_nan() || clip_hi.is_nan() || clip_lo >= clip_hi {
        return Err(StatsError::InvalidParameter(format!(
            "clip interval ({}, {}) is empty",
            clip_lo, clip_hi
        )));
    }
    if grid_points < 2 {
        return Err(StatsError::InvalidParameter(format!(
            "grid needs at least 2 points, got {}",
            grid_points
        )));
    }

    let data: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if data.len() < MIN_SAMPLE_SIZE {
        return Err(StatsError::insufficient("density", MIN_SAMPLE_SIZE, data.len()));
    }

    let (min, max) = data
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if min == max {
        return Err(StatsError::DegenerateVariance(
            "all values are identical".to_string(),
        ));
    }

    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    let sigma = (data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt();
    if sigma <= 0.0 || !sigma.is_finite() {
        return Err(StatsError::DegenerateVariance(
            "all values are identical".to_string(),
        ));
    }
    let bandwidth = sigma * n.powf(-0.2);

    let lo = (min - CUT * bandwidth).max(clip_lo);
    let hi = (max + CUT * bandwidth).min(clip_hi);
    if lo >= hi {
        return Err(StatsError::InvalidParameter(format!(
            "data support [{}, {}] lies outside the clip interval",
            min, max
        )));
    }

    let norm = 1.0 / (n * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    let step = (hi - lo) / (grid_points - 1) as f64;

    let points = (0..grid_points)
        .map(|i| {
            let x = if i == grid_points - 1 {
                hi
            } else {
                lo + step * i as f64
            };
            let density = norm
                * data
                    .iter()
                    .map(|xi| (-0.5 * ((x - xi) / bandwidth).powi(2)).exp())
                    .sum::<f64>();
            DensityPoint { x, density }
        })
        .collect();

    Ok(DensityEstimate {
        bandwidth,
        clip,
        points,
    })
}
