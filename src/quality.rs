//! Data-quality checks over the source tables
//!
//! Checks report; they never reject. A row violating `deaths <= births`
//! or an out-of-order month is counted, logged, and kept.

use std::collections::HashSet;

use chrono::Datelike;
use serde::Serialize;

use crate::observability::{log_event_with_fields, Event};
use crate::table::{BirthsAndDeaths, MonthlyObservation, Table};

/// Findings for one table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableQuality {
    pub rows: usize,
    pub columns: usize,
    /// Cells that are empty after trimming, in any column. Required columns
    /// reject empty cells at load time, so only extra columns count here.
    pub empty_cells: usize,
    /// Rows identical to an earlier row
    pub duplicate_rows: usize,
    /// Rows with deaths > births
    pub deaths_exceed_births: usize,
}

/// Findings for the monthly table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyQuality {
    #[serde(flatten)]
    pub table: TableQuality,
    /// Rows dated on or before their predecessor
    pub non_increasing_dates: usize,
    /// Missing calendar months between consecutive rows
    pub missing_months: usize,
}

impl TableQuality {
    /// Structural checks on the raw table plus the births/deaths invariant
    pub fn check<T: BirthsAndDeaths>(table: &Table, rows: &[T]) -> Self {
        let (n_rows, columns) = table.shape();

        let empty_cells = table
            .rows()
            .iter()
            .flatten()
            .filter(|cell| cell.is_empty())
            .count();

        let mut seen: HashSet<&[String]> = HashSet::new();
        let mut duplicate_rows = 0;
        for row in table.rows() {
            if !seen.insert(row.as_slice()) {
                duplicate_rows += 1;
            }
        }

        let deaths_exceed_births = rows.iter().filter(|r| r.deaths() > r.births()).count();

        let quality = Self {
            rows: n_rows,
            columns,
            empty_cells,
            duplicate_rows,
            deaths_exceed_births,
        };
        quality.log(table.name());
        quality
    }

    /// Returns true if no finding was recorded
    pub fn is_clean(&self) -> bool {
        self.empty_cells == 0 && self.duplicate_rows == 0 && self.deaths_exceed_births == 0
    }

    fn log(&self, name: &str) {
        log_event_with_fields(
            Event::QualityChecked,
            &[
                ("deaths_exceed_births", &self.deaths_exceed_births.to_string()),
                ("duplicate_rows", &self.duplicate_rows.to_string()),
                ("empty_cells", &self.empty_cells.to_string()),
                ("table", name),
            ],
        );
    }
}

impl MonthlyQuality {
    pub fn check(table: &Table, rows: &[MonthlyObservation]) -> Self {
        let mut non_increasing_dates = 0;
        let mut missing_months = 0;

        for pair in rows.windows(2) {
            let step = month_index(&pair[1]) - month_index(&pair[0]);
            if pair[1].date <= pair[0].date {
                non_increasing_dates += 1;
            } else if step > 1 {
                missing_months += (step - 1) as usize;
            }
        }

        Self {
            table: TableQuality::check(table, rows),
            non_increasing_dates,
            missing_months,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.table.is_clean() && self.non_increasing_dates == 0 && self.missing_months == 0
    }
}

fn month_index(row: &MonthlyObservation) -> i64 {
    i64::from(row.date.year()) * 12 + i64::from(row.date.month0())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::monthly_from_table;

    fn monthly(csv: &str) -> (Table, Vec<MonthlyObservation>) {
        let table = Table::from_reader("monthly_deaths", csv.as_bytes()).unwrap();
        let rows = monthly_from_table(&table).unwrap();
        (table, rows)
    }

    #[test]
    fn test_clean_table() {
        let (table, rows) = monthly(
            "date,births,deaths\n1846-11-01,310,11\n1846-12-01,373,8\n1847-01-01,311,10\n",
        );
        let quality = MonthlyQuality::check(&table, &rows);
        assert!(quality.is_clean());
        assert_eq!(quality.table.rows, 3);
        assert_eq!(quality.table.columns, 3);
    }

    #[test]
    fn test_duplicates_and_invariant_violations_counted() {
        let (table, rows) = monthly(
            "date,births,deaths\n1841-01-01,10,20\n1841-01-01,10,20\n1841-02-01,10,1\n",
        );
        let quality = MonthlyQuality::check(&table, &rows);

        assert_eq!(quality.table.duplicate_rows, 1);
        assert_eq!(quality.table.deaths_exceed_births, 2);
        assert_eq!(quality.non_increasing_dates, 1);
    }

    #[test]
    fn test_missing_months_counted() {
        let (table, rows) = monthly("date,births,deaths\n1841-01-01,10,1\n1841-04-01,10,1\n");
        let quality = MonthlyQuality::check(&table, &rows);
        assert_eq!(quality.missing_months, 2);
        assert!(!quality.is_clean());
    }

    #[test]
    fn test_empty_cells_counted_on_raw_table() {
        let table = Table::from_reader("t", "year,births\n1841,\n1842,10\n".as_bytes()).unwrap();
        let quality = TableQuality::check::<MonthlyObservation>(&table, &[]);
        assert_eq!(quality.empty_cells, 1);
    }
}
