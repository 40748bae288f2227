//! Analysis configuration
//!
//! Every field has a default, so an empty JSON object is a valid config.
//! Presentation settings travel as an explicit `FormatConfig`; nothing here
//! is process-wide state.
//!
//! The cutoff date and the rolling window are fixed constants of the
//! analysis, not configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {reason}")]
    Read { path: String, reason: String },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// How numbers are rendered in the text report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Decimal places for general numbers and percentages
    #[serde(default = "default_decimals")]
    pub decimals: usize,

    /// Group the integer part in thousands with ','
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: bool,

    /// Decimal places for p-values
    #[serde(default = "default_p_value_decimals")]
    pub p_value_decimals: usize,
}

fn default_decimals() -> usize {
    2
}
fn default_thousands_separator() -> bool {
    true
}
fn default_p_value_decimals() -> usize {
    10
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            decimals: default_decimals(),
            thousands_separator: default_thousands_separator(),
            p_value_decimals: default_p_value_decimals(),
        }
    }
}

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Yearly per-clinic CSV (`annual_deaths_by_clinic`)
    #[serde(default)]
    pub yearly_path: Option<PathBuf>,

    /// Monthly CSV (`monthly_deaths`)
    #[serde(default)]
    pub monthly_path: Option<PathBuf>,

    #[serde(default)]
    pub format: FormatConfig,

    /// Alpha for the significance verdict
    #[serde(default = "default_significance_level")]
    pub significance_level: f64,

    /// Grid size of each density curve
    #[serde(default = "default_density_grid_points")]
    pub density_grid_points: usize,
}

fn default_significance_level() -> f64 {
    0.05
}
fn default_density_grid_points() -> usize {
    200
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            yearly_path: None,
            monthly_path: None,
            format: FormatConfig::default(),
            significance_level: default_significance_level(),
            density_grid_points: default_density_grid_points(),
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse and validate configuration JSON
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: AnalysisConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate value ranges
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "significance_level must be in (0, 1), got {}",
                self.significance_level
            )));
        }

        if self.density_grid_points < 2 {
            return Err(ConfigError::Invalid("density_grid_points must be >= 2".to_string()));
        }

        if self.format.decimals > 17 || self.format.p_value_decimals > 17 {
            return Err(ConfigError::Invalid("decimals must be <= 17".to_string()));
        }

        Ok(())
    }
}
