//! Regime partition tests
//!
//! Tests for:
//! - before ++ after reproduces date-ordered input
//! - The cutoff month itself is `after`
//! - Rates are computed per row and keep row order
//! - Rolling windows never look ahead

use chrono::NaiveDate;

use semmelweis::rates::{derive_rates, rate_column};
use semmelweis::regime::{
    handwashing_start, label_regimes, rolling_mean, rolling_series, split_at_cutoff, Regime,
    ROLLING_WINDOW,
};
use semmelweis::table::{monthly_from_table, MonthlyObservation, Table};

// =============================================================================
// Test Utilities
// =============================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Consecutive months from 1846-01, deaths cycling through a pattern
fn months(count: u32) -> Vec<MonthlyObservation> {
    (0..count)
        .map(|i| MonthlyObservation {
            date: date(1846 + (i / 12) as i32, i % 12 + 1, 1),
            births: 300 + u64::from(i % 7),
            deaths: u64::from((i * 13) % 40),
        })
        .collect()
}

// =============================================================================
// Partition
// =============================================================================

#[test]
fn test_concatenation_reproduces_input() {
    let rows = derive_rates(&months(36));
    let split = split_at_cutoff(&rows, handwashing_start());

    let joined: Vec<_> = split.iter().copied().collect();
    assert_eq!(joined, rows);
    assert_eq!(split.len(), rows.len());
}

#[test]
fn test_partition_respects_cutoff() {
    let rows = derive_rates(&months(36));
    let cutoff = handwashing_start();
    let split = split_at_cutoff(&rows, cutoff);

    assert!(split.before.iter().all(|r| r.observation.date < cutoff));
    assert!(split.after.iter().all(|r| r.observation.date >= cutoff));
    // 1846-01 .. 1847-05
    assert_eq!(split.before.len(), 17);
}

#[test]
fn test_cutoff_row_is_after() {
    let rows = vec![
        MonthlyObservation {
            date: date(1847, 5, 31),
            births: 10,
            deaths: 1,
        },
        MonthlyObservation {
            date: date(1847, 6, 1),
            births: 10,
            deaths: 1,
        },
    ];

    assert_eq!(
        label_regimes(&rows, handwashing_start()),
        vec![Regime::Before, Regime::After]
    );
}

#[test]
fn test_empty_side_is_allowed() {
    let rows = derive_rates(&months(12));
    let split = split_at_cutoff(&rows, handwashing_start());

    assert_eq!(split.before.len(), 12);
    assert!(split.regime(Regime::After).is_empty());
}

// =============================================================================
// Rates
// =============================================================================

#[test]
fn test_rate_is_deaths_over_births_per_row() {
    let rows = months(24);
    let rated = derive_rates(&rows);

    for (row, r) in rows.iter().zip(&rated) {
        assert_eq!(r.observation, *row);
        assert_eq!(r.pct_deaths, row.deaths as f64 / row.births as f64);
    }
}

#[test]
fn test_loaded_dates_ignore_time_component() {
    let csv = "date,births,deaths\n1847-06-01 00:00:00,268,6\n1847-07-01T00:00:00,250,3\n";
    let table = Table::from_reader("monthly_deaths", csv.as_bytes()).unwrap();
    let rows = monthly_from_table(&table).unwrap();

    assert_eq!(rows[0].date, date(1847, 6, 1));
    assert_eq!(rows[1].date, date(1847, 7, 1));
}

// =============================================================================
// Rolling mean
// =============================================================================

#[test]
fn test_rolling_mean_never_looks_ahead() {
    let rated = derive_rates(&months(12));
    let rates = rate_column(&rated);
    let full = rolling_mean(&rates, ROLLING_WINDOW);

    // Changing a late value leaves earlier means untouched
    let mut changed = rates.clone();
    changed[10] = 0.9;
    let partial = rolling_mean(&changed, ROLLING_WINDOW);

    for i in 0..10 {
        assert_eq!(
            full[i].map(f64::to_bits),
            partial[i].map(f64::to_bits),
            "position {} changed",
            i
        );
    }
    assert_ne!(full[10], partial[10]);
}

#[test]
fn test_rolling_series_keeps_dates() {
    let rated = derive_rates(&months(8));
    let series = rolling_series(&rated, ROLLING_WINDOW);

    assert_eq!(series.len(), 8);
    assert_eq!(series[7].date, date(1846, 8, 1));
    assert_eq!(series.iter().filter(|p| p.rolling_mean.is_some()).count(), 3);
}
