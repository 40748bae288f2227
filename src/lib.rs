//! semmelweis - the 1840s Vienna handwashing analysis
//!
//! Loads the yearly per-clinic and monthly birth/death tables, derives
//! death rates, splits the monthly series at the introduction of
//! handwashing, and tests whether the drop in mortality is significant.

pub mod charts;
pub mod cli;
pub mod config;
pub mod observability;
pub mod pipeline;
pub mod quality;
pub mod rates;
pub mod regime;
pub mod report;
pub mod stats;
pub mod table;
pub mod yearly;
