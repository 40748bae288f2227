//! Typed loading of the yearly and monthly source tables
//!
//! - Columns are located by header name, in any order
//! - An absent column is FATAL (`SEMMELWEIS_MISSING_DATA`)
//! - An unparseable cell is FATAL and names its row and column
//!
//! Value-level invariants (`deaths <= births`, increasing dates) are data
//! quality findings, not load errors.

use std::path::Path;

use chrono::NaiveDate;

use super::errors::{TableError, TableResult};
use super::frame::Table;
use super::types::{Clinic, MonthlyObservation, YearlyObservation};
use crate::observability::{log_event_with_fields, Event};

pub const COL_YEAR: &str = "year";
pub const COL_CLINIC: &str = "clinic";
pub const COL_DATE: &str = "date";
pub const COL_BIRTHS: &str = "births";
pub const COL_DEATHS: &str = "deaths";

/// Load a table from disk, logging its shape
pub fn load(path: &Path) -> TableResult<Table> {
    let table = Table::load(path)?;

    let (rows, columns) = table.shape();
    log_event_with_fields(
        Event::TableLoaded,
        &[
            ("columns", &columns.to_string()),
            ("path", &path.display().to_string()),
            ("rows", &rows.to_string()),
        ],
    );

    Ok(table)
}

/// Read `year`, `births`, `deaths`, `clinic` rows
pub fn yearly_from_table(table: &Table) -> TableResult<Vec<YearlyObservation>> {
    let years: Vec<i32> = required(table, COL_YEAR)?;
    let births: Vec<u64> = required(table, COL_BIRTHS)?;
    let deaths: Vec<u64> = required(table, COL_DEATHS)?;
    let clinics: Vec<Clinic> = required(table, COL_CLINIC)?;

    Ok(years
        .into_iter()
        .zip(births)
        .zip(deaths)
        .zip(clinics)
        .map(|(((year, births), deaths), clinic)| YearlyObservation {
            clinic,
            year,
            births,
            deaths,
        })
        .collect())
}

/// Read `date`, `births`, `deaths` rows
pub fn monthly_from_table(table: &Table) -> TableResult<Vec<MonthlyObservation>> {
    let dates = table
        .column(COL_DATE)
        .map_err(log_missing)?
        .parse_with(parse_month_date)?;
    let births: Vec<u64> = required(table, COL_BIRTHS)?;
    let deaths: Vec<u64> = required(table, COL_DEATHS)?;

    Ok(dates
        .into_iter()
        .zip(births)
        .zip(deaths)
        .map(|((date, births), deaths)| MonthlyObservation {
            date,
            births,
            deaths,
        })
        .collect())
}

/// Load and type the yearly per-clinic table
pub fn load_yearly(path: &Path) -> TableResult<Vec<YearlyObservation>> {
    yearly_from_table(&load(path)?)
}

/// Load and type the monthly table
pub fn load_monthly(path: &Path) -> TableResult<Vec<MonthlyObservation>> {
    monthly_from_table(&load(path)?)
}

fn required<T>(table: &Table, name: &str) -> TableResult<Vec<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    table.column(name).map_err(log_missing)?.parse()
}

fn log_missing(e: TableError) -> TableError {
    log_event_with_fields(
        Event::MissingData,
        &[("column", e.column().unwrap_or("")), ("reason", e.message())],
    );
    e
}

/// `YYYY-MM-DD`, with any trailing time component ignored
fn parse_month_date(cell: &str) -> Result<NaiveDate, String> {
    let date_part = cell.split([' ', 'T']).next().unwrap_or(cell);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|e| format!("cannot parse date '{}': {}", cell, e))
}
