//! CLI-specific error types
//!
//! All CLI errors are FATAL: the process exits non-zero.

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::pipeline::AnalysisError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdout or chart file)
    IoError,
    /// The analysis aborted
    AnalysisFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "SEMMELWEIS_CLI_CONFIG_ERROR",
            Self::IoError => "SEMMELWEIS_CLI_IO_ERROR",
            Self::AnalysisFailed => "SEMMELWEIS_CLI_ANALYSIS_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Analysis aborted
    pub fn analysis_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::AnalysisFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<AnalysisError> for CliError {
    fn from(e: AnalysisError) -> Self {
        Self::analysis_failed(e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_error_maps_to_analysis_failed() {
        let err: CliError = AnalysisError::MissingInput("monthly").into();
        assert_eq!(err.code(), &CliErrorCode::AnalysisFailed);
        assert!(err.to_string().starts_with("SEMMELWEIS_CLI_ANALYSIS_FAILED: "));
    }

    #[test]
    fn test_config_error_code() {
        let err: CliError = ConfigError::Invalid("bad alpha".to_string()).into();
        assert_eq!(err.code_str(), "SEMMELWEIS_CLI_CONFIG_ERROR");
        assert!(err.message().contains("bad alpha"));
    }
}
