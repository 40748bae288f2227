//! Yearly per-clinic analysis
//!
//! Rows are grouped by (clinic, year); a repeated pair is summed. Each
//! clinic's series is ordered by year.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::rates::{death_rate, derive_rates, pooled_rate, rate_column, Rated};
use crate::stats::Summary;
use crate::table::{Clinic, YearlyObservation};

/// One clinic's yearly series and aggregates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClinicSeries {
    pub clinic: Clinic,
    pub years: Vec<Rated<YearlyObservation>>,
    /// Σdeaths / Σbirths over all years
    pub pooled_rate: f64,
    /// Year with the most deaths
    pub peak_deaths: Option<YearlyObservation>,
    /// Summary of the yearly `pct_deaths`
    pub rate_summary: Summary,
}

/// Both clinics combined for one year
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearRate {
    pub year: i32,
    pub births: u64,
    pub deaths: u64,
    pub pct_deaths: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyAnalysis {
    pub clinics: Vec<ClinicSeries>,
    pub by_year: Vec<YearRate>,
    /// Σdeaths / Σbirths over every clinic and year
    pub overall_rate: f64,
}

impl YearlyAnalysis {
    pub fn clinic(&self, clinic: Clinic) -> Option<&ClinicSeries> {
        self.clinics.iter().find(|c| c.clinic == clinic)
    }

    pub fn year(&self, year: i32) -> Option<&YearRate> {
        self.by_year.iter().find(|y| y.year == year)
    }
}

/// Group, rate, and aggregate the yearly table
pub fn analyze_yearly(rows: &[YearlyObservation]) -> YearlyAnalysis {
    let mut grouped: BTreeMap<(Clinic, i32), (u64, u64)> = BTreeMap::new();
    for row in rows {
        let entry = grouped.entry((row.clinic, row.year)).or_insert((0, 0));
        entry.0 += row.births;
        entry.1 += row.deaths;
    }

    let clinics = Clinic::ALL
        .iter()
        .filter_map(|&clinic| {
            let series: Vec<YearlyObservation> = grouped
                .iter()
                .filter(|((c, _), _)| *c == clinic)
                .map(|(&(clinic, year), &(births, deaths))| YearlyObservation {
                    clinic,
                    year,
                    births,
                    deaths,
                })
                .collect();

            if series.is_empty() {
                return None;
            }

            let years = derive_rates(&series);
            Some(ClinicSeries {
                clinic,
                pooled_rate: pooled_rate(&series),
                peak_deaths: series.iter().copied().max_by_key(|r| r.deaths),
                rate_summary: Summary::of(&rate_column(&years)),
                years,
            })
        })
        .collect();

    let mut per_year: BTreeMap<i32, (u64, u64)> = BTreeMap::new();
    for (&(_, year), &(births, deaths)) in &grouped {
        let entry = per_year.entry(year).or_insert((0, 0));
        entry.0 += births;
        entry.1 += deaths;
    }
    let by_year = per_year
        .into_iter()
        .map(|(year, (births, deaths))| YearRate {
            year,
            births,
            deaths,
            pct_deaths: death_rate(births, deaths),
        })
        .collect();

    YearlyAnalysis {
        clinics,
        by_year,
        overall_rate: pooled_rate(rows),
    }
}
