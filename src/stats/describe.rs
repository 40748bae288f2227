//! Descriptive summaries (count, mean, std, min, quartiles, max)
//!
//! NaN values are excluded. `std` is the sample standard deviation (n − 1).
//! Quantiles interpolate linearly between closest ranks.

use serde::Serialize;

/// Summary of one numeric column
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

impl Summary {
    /// Summarize `values`, ignoring NaN
    pub fn of(values: &[f64]) -> Self {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let count = sorted.len();
        if count == 0 {
            return Self::empty();
        }

        let n = count as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let std = if count > 1 {
            let ss: f64 = sorted.iter().map(|x| (x - mean).powi(2)).sum();
            Some((ss / (n - 1.0)).sqrt())
        } else {
            None
        };

        Self {
            count,
            mean: Some(mean),
            std,
            min: sorted.first().copied(),
            q25: Some(quantile_sorted(&sorted, 0.25)),
            median: Some(quantile_sorted(&sorted, 0.5)),
            q75: Some(quantile_sorted(&sorted, 0.75)),
            max: sorted.last().copied(),
        }
    }

    /// Summarize integer counts
    pub fn of_counts(values: &[u64]) -> Self {
        let as_float: Vec<f64> = values.iter().map(|&v| v as f64).collect();
        Self::of(&as_float)
    }

    fn empty() -> Self {
        Self {
            count: 0,
            mean: None,
            std: None,
            min: None,
            q25: None,
            median: None,
            q75: None,
            max: None,
        }
    }
}

/// Linear-interpolated quantile of non-empty ascending data
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_summary_values() {
        let s = Summary::of(&[3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0]);

        assert_eq!(s.count, 8);
        assert_eq!(s.mean, Some(3.875));
        assert!((s.std.unwrap() - 2.748_376_143_938_713).abs() < EPS);
        assert_eq!(s.min, Some(1.0));
        assert_eq!(s.q25, Some(1.75));
        assert_eq!(s.median, Some(3.5));
        assert_eq!(s.q75, Some(5.25));
        assert_eq!(s.max, Some(9.0));
    }

    #[test]
    fn test_single_value_has_no_std() {
        let s = Summary::of(&[0.2]);
        assert_eq!(s.count, 1);
        assert_eq!(s.std, None);
        assert_eq!(s.median, Some(0.2));
    }

    #[test]
    fn test_empty_and_nan_only() {
        assert_eq!(Summary::of(&[]).count, 0);
        let s = Summary::of(&[f64::NAN, f64::NAN]);
        assert_eq!(s.count, 0);
        assert_eq!(s.mean, None);
    }

    #[test]
    fn test_counts() {
        let s = Summary::of_counts(&[254, 239, 277]);
        assert_eq!(s.min, Some(239.0));
        assert_eq!(s.max, Some(277.0));
        assert_eq!(s.median, Some(254.0));
    }
}
