//! Partition of the monthly series around the handwashing cutoff
//!
//! `before` is the closed-open interval `[.., cutoff)`, `after` is
//! `[cutoff, ..]`. A row dated exactly at the cutoff is `after`.
//! Each side keeps source order, so for date-ordered input `before`
//! followed by `after` reproduces the input exactly.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::observability::{log_event_with_fields, Event};
use crate::rates::Rated;
use crate::table::MonthlyObservation;

/// First month of obligatory chlorine handwashing
pub fn handwashing_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(1847, 6, 1).unwrap_or(NaiveDate::MIN)
}

/// Which side of the cutoff an observation falls on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    Before,
    After,
}

impl Regime {
    /// Both regimes in reporting order
    pub const ALL: [Regime; 2] = [Regime::Before, Regime::After];

    /// Classify a date against `cutoff`
    pub fn classify(date: NaiveDate, cutoff: NaiveDate) -> Self {
        if date < cutoff {
            Regime::Before
        } else {
            Regime::After
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Regime::Before => "before",
            Regime::After => "after",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rows that carry a calendar date
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl Dated for MonthlyObservation {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl<T: Dated> Dated for Rated<T> {
    fn date(&self) -> NaiveDate {
        self.observation.date()
    }
}

/// Two disjoint, order-preserving subsequences of the input
#[derive(Debug, Clone, PartialEq)]
pub struct RegimeSplit<T> {
    pub cutoff: NaiveDate,
    pub before: Vec<T>,
    pub after: Vec<T>,
}

impl<T> RegimeSplit<T> {
    /// Rows of one regime
    pub fn regime(&self, regime: Regime) -> &[T] {
        match regime {
            Regime::Before => &self.before,
            Regime::After => &self.after,
        }
    }

    /// Total rows across both regimes
    pub fn len(&self) -> usize {
        self.before.len() + self.after.len()
    }

    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }

    /// `before` followed by `after`
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.before.iter().chain(self.after.iter())
    }
}

/// Partition `rows` at `cutoff`
pub fn split_at_cutoff<T>(rows: &[T], cutoff: NaiveDate) -> RegimeSplit<T>
where
    T: Dated + Clone,
{
    let (before, after): (Vec<T>, Vec<T>) = rows
        .iter()
        .cloned()
        .partition(|row| Regime::classify(row.date(), cutoff) == Regime::Before);

    log_event_with_fields(
        Event::RegimesSplit,
        &[
            ("after", &after.len().to_string()),
            ("before", &before.len().to_string()),
            ("cutoff", &cutoff.to_string()),
        ],
    );

    RegimeSplit {
        cutoff,
        before,
        after,
    }
}

/// The regime label of every row, in row order
pub fn label_regimes<T: Dated>(rows: &[T], cutoff: NaiveDate) -> Vec<Regime> {
    rows.iter()
        .map(|row| Regime::classify(row.date(), cutoff))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(y: i32, m: u32) -> MonthlyObservation {
        MonthlyObservation {
            date: NaiveDate::from_ymd_opt(y, m, 1).unwrap(),
            births: 100,
            deaths: 10,
        }
    }

    #[test]
    fn test_cutoff_constant() {
        assert_eq!(handwashing_start().to_string(), "1847-06-01");
    }

    #[test]
    fn test_cutoff_row_is_after() {
        let cutoff = handwashing_start();
        assert_eq!(Regime::classify(cutoff, cutoff), Regime::After);
        assert_eq!(
            Regime::classify(cutoff.pred_opt().unwrap(), cutoff),
            Regime::Before
        );
    }

    #[test]
    fn test_partition_law() {
        let rows: Vec<_> = (1..=12).map(|m| month(1847, m)).collect();
        let split = split_at_cutoff(&rows, handwashing_start());

        assert_eq!(split.before.len(), 5);
        assert_eq!(split.after.len(), 7);
        assert_eq!(split.len(), rows.len());

        let rejoined: Vec<_> = split.iter().cloned().collect();
        assert_eq!(rejoined, rows);
    }

    #[test]
    fn test_all_before() {
        let rows: Vec<_> = (1..=3).map(|m| month(1846, m)).collect();
        let split = split_at_cutoff(&rows, handwashing_start());
        assert_eq!(split.regime(Regime::Before).len(), 3);
        assert!(split.regime(Regime::After).is_empty());
    }

    #[test]
    fn test_labels_match_split() {
        let rows: Vec<_> = (4..=8).map(|m| month(1847, m)).collect();
        let labels = label_regimes(&rows, handwashing_start());
        assert_eq!(
            labels,
            vec![
                Regime::Before,
                Regime::Before,
                Regime::After,
                Regime::After,
                Regime::After
            ]
        );
    }

    #[test]
    fn test_regime_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Regime::Before).unwrap(), "\"before\"");
    }
}
