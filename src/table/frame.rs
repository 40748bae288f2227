//! In-memory table: named columns over string cells
//!
//! Cells stay as text until a caller asks a column for a typed view.

use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use super::errors::{TableError, TableResult};

/// A delimited table held in memory, rows in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from headers and rows.
    ///
    /// Every row must have exactly one cell per header.
    pub fn new(
        name: impl Into<String>,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> TableResult<Self> {
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != headers.len())
        {
            return Err(TableError::malformed_table(format!(
                "Row {} has {} cells, expected {}",
                i + 1,
                row.len(),
                headers.len()
            )));
        }

        Ok(Self {
            name: name.into(),
            headers,
            rows,
        })
    }

    /// Load a comma-delimited file with a header row
    pub fn load(path: &Path) -> TableResult<Self> {
        let file = std::fs::File::open(path)
            .map_err(|e| TableError::io(&path.display().to_string(), e.to_string()))?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self::from_reader(name, file)
    }

    /// Parse comma-delimited content with a header row
    pub fn from_reader<R: Read>(name: impl Into<String>, reader: R) -> TableResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Self::new(name, headers, rows)
    }

    /// Table name (file stem when loaded from disk)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column names in source order
    pub fn column_names(&self) -> &[String] {
        &self.headers
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.headers.len())
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Raw rows in source order
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Look up a column by name.
    ///
    /// An absent column is a `SEMMELWEIS_MISSING_DATA` error.
    pub fn column(&self, name: &str) -> TableResult<Column<'_>> {
        let index = self
            .headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| TableError::missing_column(&self.name, name))?;

        Ok(Column {
            table: self,
            index,
        })
    }
}

/// A borrowed view of one table column
#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    table: &'a Table,
    index: usize,
}

impl<'a> Column<'a> {
    /// Column name
    pub fn name(&self) -> &'a str {
        &self.table.headers[self.index]
    }

    /// Raw cell values in row order
    pub fn values(&self) -> impl Iterator<Item = &'a str> + 'a {
        let table = self.table;
        let index = self.index;
        table.rows.iter().map(move |row| row[index].as_str())
    }

    /// Parse every cell with `parse`, naming the 1-based row on failure
    pub fn parse_with<T, F>(&self, mut parse: F) -> TableResult<Vec<T>>
    where
        F: FnMut(&str) -> Result<T, String>,
    {
        self.values()
            .enumerate()
            .map(|(i, cell)| {
                parse(cell).map_err(|reason| TableError::malformed_cell(i + 1, self.name(), reason))
            })
            .collect()
    }

    /// Parse every cell via `FromStr`
    pub fn parse<T>(&self) -> TableResult<Vec<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.parse_with(|cell| {
            cell.parse::<T>()
                .map_err(|e| format!("cannot parse '{}': {}", cell, e))
        })
    }
}
