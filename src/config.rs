//! Backtest configuration loading and validation.
//!
//! Configuration is a YAML document loaded at startup; validation failures
//! abort before the core ever runs, so the classification engine can assume
//! well-formed input. Example:
//!
//! ```yaml
//! start_date: 2020/01/01
//! end_date: 2020/06/30
//! pairs: [EURUSD]
//! currency: USD
//! start_capital: 10000.0
//! commission: 0.002
//! time_frame: H
//! log_path: log
//! show_output: true
//! ```

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),
}

/// Supported simulation time frames.
const TIME_FRAMES: [&str; 3] = ["M", "H", "D"];
/// Supported account currencies.
const CURRENCIES: [&str; 2] = ["USD", "DKK"];
/// Supported currency pairs.
const PAIRS: [&str; 9] = [
    "EURUSD", "EURCAD", "EURCHF", "EURGBP", "NZDUSD", "USDCHF", "USDJPY", "XAGUSD", "XAUUSD",
];

const DATE_FORMAT: &str = "%Y/%m/%d";

/// Parameters for one backtest, as read from the YAML configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Inclusive start of the simulated period, `YYYY/MM/DD`.
    pub start_date: String,
    /// Inclusive end of the simulated period, `YYYY/MM/DD`.
    pub end_date: String,
    pub pairs: Vec<String>,
    pub currency: String,
    pub start_capital: f64,
    #[serde(default)]
    pub commission: f64,
    pub time_frame: String,
    #[serde(default)]
    pub log_path: Option<PathBuf>,
    #[serde(default)]
    pub show_output: bool,
}

impl BacktestConfig {
    /// Load and validate a configuration file. Any failure aborts startup.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration against the supported time frames, currencies
    /// and pairs, and parse the period bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (start, end) = self.period()?;
        if start > end {
            return Err(ConfigError::Validation(format!(
                "start_date {} is after end_date {}",
                self.start_date, self.end_date
            )));
        }
        if !TIME_FRAMES.contains(&self.time_frame.as_str()) {
            return Err(ConfigError::Validation(format!(
                "unsupported time_frame: {} (expected one of {:?})",
                self.time_frame, TIME_FRAMES
            )));
        }
        if !CURRENCIES.contains(&self.currency.as_str()) {
            return Err(ConfigError::Validation(format!(
                "unsupported currency: {} (expected one of {:?})",
                self.currency, CURRENCIES
            )));
        }
        if self.pairs.is_empty() {
            return Err(ConfigError::Validation("no currency pairs given".into()));
        }
        for pair in &self.pairs {
            if !PAIRS.contains(&pair.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "unsupported pair: {pair}"
                )));
            }
        }
        if !self.start_capital.is_finite() || self.start_capital <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "start_capital must be positive, got {}",
                self.start_capital
            )));
        }
        Ok(())
    }

    /// Parsed period bounds.
    pub fn period(&self) -> Result<(NaiveDate, NaiveDate), ConfigError> {
        let parse = |field: &str, value: &str| {
            NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
                ConfigError::Validation(format!("{field} {value:?} is not YYYY/MM/DD: {e}"))
            })
        };
        Ok((
            parse("start_date", &self.start_date)?,
            parse("end_date", &self.end_date)?,
        ))
    }
}

// ============================================================
// TESTS
// ============================================================
