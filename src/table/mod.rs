//! Tabular data for the analysis
//!
//! Two read-only sources:
//! - `annual_deaths_by_clinic`: year, births, deaths, clinic
//! - `monthly_deaths`: date, births, deaths
//!
//! `Table` is the untyped collaborator (`load`, `column`); the loader turns
//! it into typed observations.

mod errors;
mod frame;
mod loader;
mod types;

pub use errors::{TableError, TableErrorCode, TableResult};
pub use frame::{Column, Table};
pub use loader::{
    load, load_monthly, load_yearly, monthly_from_table, yearly_from_table, COL_BIRTHS,
    COL_CLINIC, COL_DATE, COL_DEATHS, COL_YEAR,
};
pub use types::{BirthsAndDeaths, Clinic, MonthlyObservation, YearlyObservation};
