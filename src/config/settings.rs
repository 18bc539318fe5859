//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings. Every
//! section is optional; an empty file yields the built-in defaults.
//!
//! # Example
//!
//! ```no_run
//! use wagerline::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging(0);
//!     Ok(())
//! }
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use crate::domain::clv::ClvThresholds;
use crate::domain::odds::OddsFormat;
use crate::domain::teaser::TeaserTable;
use crate::error::{ConfigError, Result};

/// Display preferences for rendered odds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub odds_format: OddsFormat,
}

/// CLV category boundaries in percentage points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClvConfig {
    pub positive_threshold: Decimal,
    pub negative_threshold: Decimal,
}

impl Default for ClvConfig {
    fn default() -> Self {
        let ClvThresholds { positive, negative } = ClvThresholds::default();
        Self {
            positive_threshold: positive,
            negative_threshold: negative,
        }
    }
}

impl ClvConfig {
    #[must_use]
    pub const fn thresholds(&self) -> ClvThresholds {
        ClvThresholds {
            positive: self.positive_threshold,
            negative: self.negative_threshold,
        }
    }
}

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Odds notation used by the CLI.
    #[serde(default)]
    pub display: DisplayConfig,

    /// CLV category thresholds.
    #[serde(default)]
    pub clv: ClvConfig,

    /// Teaser point menu and fixed per-leg prices.
    ///
    /// A configured `[[teaser.options]]` list replaces the default menu.
    #[serde(default)]
    pub teaser: TeaserTable,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if given, otherwise the file at `default_path` when it
    /// exists, otherwise the built-in defaults.
    ///
    /// An explicitly requested file must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a file that is read fails to parse or validate.
    pub fn load_or_default(path: Option<&Path>, default_path: &Path) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if default_path.is_file() => Self::load(default_path),
            None => Ok(Self::default()),
        }
    }

    /// Render the effective configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self).map_err(ConfigError::Render)?)
    }

    /// Initialize the tracing subscriber from the `[logging]` section,
    /// raised by `verbose` (`-v` count).
    pub fn init_logging(&self, verbose: u8) {
        self.logging.with_verbosity(verbose).init();
    }

    /// Validate configuration values.
    ///
    /// Checks that every value is within its accepted range.
    fn validate(&self) -> Result<()> {
        self.logging.validate()?;

        if self.clv.positive_threshold <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "clv.positive_threshold",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.clv.negative_threshold >= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "clv.negative_threshold",
                reason: "must be less than 0".to_string(),
            }
            .into());
        }

        for option in &self.teaser.options {
            if option.points <= Decimal::ZERO {
                return Err(ConfigError::InvalidValue {
                    field: "teaser.options.points",
                    reason: format!(
                        "must be greater than 0 (got {} for {})",
                        option.points, option.family
                    ),
                }
                .into());
            }
            if option.odds == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "teaser.options.odds",
                    reason: format!(
                        "must be non-zero ({} at {} points)",
                        option.family, option.points
                    ),
                }
                .into());
            }
        }

        Ok(())
    }
}
