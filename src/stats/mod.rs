//! Statistics over rate samples
//!
//! - Student's two-sample t-test (significance of the regime difference)
//! - Descriptive summaries
//! - Equal-width histograms
//! - Clipped kernel density estimates

mod density;
mod describe;
mod errors;
mod histogram;
mod ttest;

pub use density::{clipped_density, DensityEstimate, DensityPoint, UNIT_INTERVAL};
pub use describe::Summary;
pub use errors::{StatsError, StatsResult};
pub use histogram::{bin_edges, bin_shares, BinShares, HISTOGRAM_BINS};
pub use ttest::{two_sample_t_test, TTestResult, MIN_SAMPLE_SIZE};
