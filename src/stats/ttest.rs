//! Student's two-sample t-test (independent, two-sided, pooled variance)

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

use super::errors::{StatsError, StatsResult};

/// Minimum defined values per sample for a variance to exist
pub const MIN_SAMPLE_SIZE: usize = 2;

/// Outcome of a two-sample t-test
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TTestResult {
    /// (mean₁ − mean₂) / standard error
    pub t_statistic: f64,
    /// Two-tailed probability under equal means, in [0, 1]
    pub p_value: f64,
    /// n₁ + n₂ − 2
    pub degrees_of_freedom: f64,
    /// mean₁ − mean₂
    pub mean_difference: f64,
    pub n_before: usize,
    pub n_after: usize,
}

impl TTestResult {
    /// Whether the difference is significant at level `alpha`
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Compare `before` against `after`.
///
/// NaN values are excluded. Each sample needs at least two defined values,
/// and the pooled variance must be positive.
pub fn two_sample_t_test(before: &[f64], after: &[f64]) -> StatsResult<TTestResult> {
    let a = defined(before);
    let b = defined(after);

    if a.len() < MIN_SAMPLE_SIZE {
        return Err(StatsError::insufficient("before", MIN_SAMPLE_SIZE, a.len()));
    }
    if b.len() < MIN_SAMPLE_SIZE {
        return Err(StatsError::insufficient("after", MIN_SAMPLE_SIZE, b.len()));
    }

    if is_constant(&a) && is_constant(&b) {
        return Err(StatsError::DegenerateVariance(
            "both samples are constant".to_string(),
        ));
    }

    let n1 = a.len() as f64;
    let n2 = b.len() as f64;
    let mean1 = a.iter().sum::<f64>() / n1;
    let mean2 = b.iter().sum::<f64>() / n2;

    let ss1: f64 = a.iter().map(|x| (x - mean1).powi(2)).sum();
    let ss2: f64 = b.iter().map(|x| (x - mean2).powi(2)).sum();

    let df = n1 + n2 - 2.0;
    let pooled_variance = (ss1 + ss2) / df;
    let std_error = (pooled_variance * (1.0 / n1 + 1.0 / n2)).sqrt();

    if !std_error.is_finite() || std_error <= 0.0 {
        return Err(StatsError::DegenerateVariance(format!(
            "pooled variance is {}",
            pooled_variance
        )));
    }

    let mean_difference = mean1 - mean2;
    let t_statistic = mean_difference / std_error;

    let t_dist = StudentsT::new(0.0, 1.0, df).map_err(|e| {
        StatsError::Distribution(format!("Failed to create t-distribution: {}", e))
    })?;
    // Survival function keeps precision far into the tail
    let p_value = (2.0 * t_dist.sf(t_statistic.abs())).clamp(0.0, 1.0);

    Ok(TTestResult {
        t_statistic,
        p_value,
        degrees_of_freedom: df,
        mean_difference,
        n_before: a.len(),
        n_after: b.len(),
    })
}

fn defined(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|v| !v.is_nan()).collect()
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}
