//! Configuration management for stockroom.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::format::NumberFormat;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "stockroom";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "inventory.db";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `STOCKROOM_`)
/// 2. TOML config file at `~/.config/stockroom/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Number and currency display.
    pub display: DisplayConfig,
    /// Chart configuration.
    pub chart: ChartConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/stockroom/inventory.db`
    pub database_path: Option<PathBuf>,
}

/// How numbers and money are written in the table and chart.
///
/// The defaults give en-US style output (`$1,234.50`) regardless of the
/// host locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Symbol placed before currency amounts.
    pub currency_symbol: String,
    /// Separator between groups of three integer digits.
    pub thousands_separator: String,
    /// Separator between the integer and fractional parts.
    pub decimal_separator: String,
}

/// Chart-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Number of character cells used by the longest bar.
    pub width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            thousands_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self { width: 40 }
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed("STOCKROOM_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let display = &self.display;

        if display.decimal_separator.is_empty() {
            return Err(Error::config_validation(
                "decimal_separator cannot be empty",
            ));
        }

        if display.decimal_separator == display.thousands_separator {
            return Err(Error::config_validation(format!(
                "decimal_separator and thousands_separator cannot both be '{}'",
                display.decimal_separator
            )));
        }

        let has_digit = |s: &str| s.chars().any(|c| c.is_ascii_digit());
        if has_digit(&display.decimal_separator) || has_digit(&display.thousands_separator) {
            return Err(Error::config_validation(
                "separators cannot contain digits",
            ));
        }

        if self.chart.width == 0 {
            return Err(Error::config_validation(
                "chart width must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Build the number format described by the display section.
    #[must_use]
    pub fn number_format(&self) -> NumberFormat {
        NumberFormat {
            currency_symbol: self.display.currency_symbol.clone(),
            thousands_separator: self.display.thousands_separator.clone(),
            decimal_separator: self.display.decimal_separator.clone(),
        }
    }
}
