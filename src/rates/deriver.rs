//! Death-rate derivation
//!
//! `pct_deaths = deaths / births` per row. Row order and every other field
//! are preserved. `births = 0` yields NaN for that row and a
//! `DIVISION_UNDEFINED` warning; the row is kept.

use serde::Serialize;

use crate::observability::{log_event_with_fields, Event};
use crate::table::BirthsAndDeaths;

/// An observation with its death rate attached
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rated<T> {
    #[serde(flatten)]
    pub observation: T,
    /// deaths / births, NaN when births = 0
    pub pct_deaths: f64,
}

impl<T> Rated<T> {
    /// Returns true unless the rate is undefined
    pub fn is_defined(&self) -> bool {
        !self.pct_deaths.is_nan()
    }
}

/// deaths / births, NaN when births = 0.
///
/// `deaths > births` is not rejected; the result is then above 1.
pub fn death_rate(births: u64, deaths: u64) -> f64 {
    if births == 0 {
        return f64::NAN;
    }
    deaths as f64 / births as f64
}

/// Attach `pct_deaths` to every row
pub fn derive_rates<T>(rows: &[T]) -> Vec<Rated<T>>
where
    T: BirthsAndDeaths + Clone,
{
    let rated: Vec<Rated<T>> = rows
        .iter()
        .map(|row| Rated {
            observation: row.clone(),
            pct_deaths: death_rate(row.births(), row.deaths()),
        })
        .collect();

    let undefined = undefined_rows(&rated);
    for row in &undefined {
        log_event_with_fields(
            Event::DivisionUndefined,
            &[("reason", "births = 0"), ("row", &row.to_string())],
        );
    }

    log_event_with_fields(
        Event::RatesDerived,
        &[
            ("rows", &rated.len().to_string()),
            ("undefined", &undefined.len().to_string()),
        ],
    );

    rated
}

/// 1-based positions of rows whose rate is undefined
pub fn undefined_rows<T>(rows: &[Rated<T>]) -> Vec<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, r)| !r.is_defined())
        .map(|(i, _)| i + 1)
        .collect()
}

/// The `pct_deaths` column in row order, NaN included
pub fn rate_column<T>(rows: &[Rated<T>]) -> Vec<f64> {
    rows.iter().map(|r| r.pct_deaths).collect()
}

/// Σdeaths / Σbirths over `rows`, NaN when no births
pub fn pooled_rate<'a, T, I>(rows: I) -> f64
where
    T: BirthsAndDeaths + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let (births, deaths) = rows
        .into_iter()
        .fold((0u64, 0u64), |(b, d), row| (b + row.births(), d + row.deaths()));
    death_rate(births, deaths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Clinic, YearlyObservation};

    fn year(clinic: Clinic, year: i32, births: u64, deaths: u64) -> YearlyObservation {
        YearlyObservation {
            clinic,
            year,
            births,
            deaths,
        }
    }

    #[test]
    fn test_rate_per_row_preserves_order() {
        let rows = vec![
            year(Clinic::Clinic1, 1841, 3036, 237),
            year(Clinic::Clinic2, 1841, 2442, 86),
        ];
        let rated = derive_rates(&rows);

        assert_eq!(rated.len(), 2);
        assert_eq!(rated[0].observation, rows[0]);
        assert_eq!(rated[1].observation, rows[1]);
        assert!((rated[0].pct_deaths - 237.0 / 3036.0).abs() < 1e-15);
    }

    #[test]
    fn test_zero_births_is_nan_not_dropped() {
        let rows = vec![
            year(Clinic::Clinic1, 1841, 0, 0),
            year(Clinic::Clinic1, 1842, 10, 1),
        ];
        let rated = derive_rates(&rows);

        assert_eq!(rated.len(), 2);
        assert!(rated[0].pct_deaths.is_nan());
        assert!(!rated[0].is_defined());
        assert_eq!(undefined_rows(&rated), vec![1]);
    }

    #[test]
    fn test_zero_births_with_deaths_is_nan_not_infinite() {
        assert!(death_rate(0, 4).is_nan());
    }

    #[test]
    fn test_rate_in_unit_interval_when_deaths_le_births() {
        for (births, deaths) in [(1, 0), (1, 1), (300, 299), (5000, 17)] {
            let rate = death_rate(births, deaths);
            assert!((0.0..=1.0).contains(&rate));
        }
    }

    #[test]
    fn test_deaths_above_births_not_rejected() {
        assert_eq!(death_rate(2, 3), 1.5);
    }

    #[test]
    fn test_pooled_rate() {
        let rows = vec![
            year(Clinic::Clinic1, 1841, 100, 10),
            year(Clinic::Clinic1, 1842, 300, 10),
        ];
        assert_eq!(pooled_rate(&rows), 20.0 / 400.0);
        assert!(pooled_rate::<YearlyObservation, _>(&[]).is_nan());
    }

    #[test]
    fn test_rated_serializes_flat_with_null_for_nan() {
        let rated = derive_rates(&[year(Clinic::Clinic2, 1843, 0, 0)]);
        let json = serde_json::to_value(&rated[0]).unwrap();
        assert_eq!(json["clinic"], "clinic 2");
        assert_eq!(json["year"], 1843);
        assert!(json["pct_deaths"].is_null());
    }
}
