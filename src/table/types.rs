//! Typed observations read from the two source tables

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One of the two maternity clinics of the Vienna General Hospital
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Clinic {
    /// Staffed by doctors and medical students
    #[serde(rename = "clinic 1")]
    Clinic1,
    /// Staffed by midwives
    #[serde(rename = "clinic 2")]
    Clinic2,
}

impl Clinic {
    /// Both clinics in display order
    pub const ALL: [Clinic; 2] = [Clinic::Clinic1, Clinic::Clinic2];

    /// Label as it appears in the source table
    pub fn as_str(&self) -> &'static str {
        match self {
            Clinic::Clinic1 => "clinic 1",
            Clinic::Clinic2 => "clinic 2",
        }
    }
}

impl fmt::Display for Clinic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Clinic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', " ").as_str() {
            "clinic 1" => Ok(Clinic::Clinic1),
            "clinic 2" => Ok(Clinic::Clinic2),
            other => Err(format!("unknown clinic '{}'", other)),
        }
    }
}

/// Anything that carries a birth count and a death count
pub trait BirthsAndDeaths {
    /// Births in the period
    fn births(&self) -> u64;
    /// Deaths in the period
    fn deaths(&self) -> u64;
}

/// One clinic's totals for one year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyObservation {
    pub clinic: Clinic,
    pub year: i32,
    pub births: u64,
    pub deaths: u64,
}

impl BirthsAndDeaths for YearlyObservation {
    fn births(&self) -> u64 {
        self.births
    }

    fn deaths(&self) -> u64 {
        self.deaths
    }
}

/// Hospital-wide totals for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyObservation {
    /// First day of the month
    pub date: NaiveDate,
    pub births: u64,
    pub deaths: u64,
}

impl BirthsAndDeaths for MonthlyObservation {
    fn births(&self) -> u64 {
        self.births
    }

    fn deaths(&self) -> u64 {
        self.deaths
    }
}
