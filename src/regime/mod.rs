//! Handwashing regimes of the monthly series
//!
//! # Flow
//!
//! 1. Label each month `before` or `after` the 1847-06-01 cutoff
//! 2. Split into two order-preserving subsequences
//! 3. Mean `pct_deaths` per regime, then difference and ratio
//! 4. 6-month trailing rolling mean over the `before` regime

mod aggregator;
mod splitter;

pub use aggregator::{
    mean_defined, rolling_mean, rolling_series, RegimeComparison, RollingPoint, ROLLING_WINDOW,
};
pub use splitter::{handwashing_start, label_regimes, split_at_cutoff, Dated, Regime, RegimeSplit};
