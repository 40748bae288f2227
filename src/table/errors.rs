//! Table error types
//!
//! Error codes:
//! - SEMMELWEIS_MISSING_DATA (FATAL)
//! - SEMMELWEIS_MALFORMED_TABLE (FATAL)
//! - SEMMELWEIS_TABLE_IO (FATAL)

use std::fmt;

use crate::observability::Severity;

/// Table error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableErrorCode {
    /// A required column is absent
    MissingData,
    /// A cell or record could not be parsed
    MalformedTable,
    /// The source could not be read
    TableIo,
}

impl TableErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            TableErrorCode::MissingData => "SEMMELWEIS_MISSING_DATA",
            TableErrorCode::MalformedTable => "SEMMELWEIS_MALFORMED_TABLE",
            TableErrorCode::TableIo => "SEMMELWEIS_TABLE_IO",
        }
    }

    /// Every table error aborts the run
    pub fn severity(&self) -> Severity {
        Severity::Fatal
    }
}

impl fmt::Display for TableErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Table error with context
#[derive(Debug)]
pub struct TableError {
    code: TableErrorCode,
    message: String,
    /// Column involved, if any
    column: Option<String>,
    /// 1-based data row, if any
    row: Option<usize>,
}

impl TableError {
    /// A required column is absent from `table`
    pub fn missing_column(table: &str, column: &str) -> Self {
        Self {
            code: TableErrorCode::MissingData,
            message: format!("Table '{}' has no column '{}'", table, column),
            column: Some(column.to_string()),
            row: None,
        }
    }

    /// A cell could not be parsed as the column's type
    pub fn malformed_cell(row: usize, column: &str, reason: impl Into<String>) -> Self {
        Self {
            code: TableErrorCode::MalformedTable,
            message: format!("Row {} column '{}': {}", row, column, reason.into()),
            column: Some(column.to_string()),
            row: Some(row),
        }
    }

    /// The record structure itself is broken
    pub fn malformed_table(reason: impl Into<String>) -> Self {
        Self {
            code: TableErrorCode::MalformedTable,
            message: reason.into(),
            column: None,
            row: None,
        }
    }

    /// The source could not be read
    pub fn io(source: &str, reason: impl Into<String>) -> Self {
        Self {
            code: TableErrorCode::TableIo,
            message: format!("Failed to read '{}': {}", source, reason.into()),
            column: None,
            row: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> TableErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the column involved, if any
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    /// Returns the 1-based data row, if any
    pub fn row(&self) -> Option<usize> {
        self.row
    }

    /// Returns whether this is a fatal error
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity(), self.code, self.message)
    }
}

impl std::error::Error for TableError {}

impl From<csv::Error> for TableError {
    fn from(e: csv::Error) -> Self {
        match e.position() {
            Some(pos) => Self::malformed_table(format!("line {}: {}", pos.line(), e)),
            None => Self::malformed_table(e.to_string()),
        }
    }
}

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;
