//! Rate derivation over birth/death tables

mod deriver;

pub use deriver::{death_rate, derive_rates, pooled_rate, rate_column, undefined_rows, Rated};
