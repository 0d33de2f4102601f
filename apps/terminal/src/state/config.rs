//! # Configuration State
//!
//! Application configuration loaded once at startup.
//!
//! ## Configuration Sources (later overrides earlier)
//! 1. Defaults (this file)
//! 2. Config file (`brew.toml`, or `--config <PATH>`)
//! 3. Environment variables (`BREW_*`)
//! 4. Command-line flags (`--db`, `--memory`), applied by the caller
//!
//! ## Example Config File
//! ```toml
//! store_name = "Corner Coffee"
//! currency_symbol = "€"
//! database_path = "/var/lib/brew/brew.db"
//! low_stock_threshold = 15
//! top_products_limit = 5
//! stock_warning_level = 10
//! stock_policy = "allow_negative"
//! log_filter = "info,brew=debug,sqlx=warn"
//! ```
//!
//! Read-only after initialization.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info, warn};

use brew_core::{
    Money, DEFAULT_LOW_STOCK_THRESHOLD, DEFAULT_STOCK_WARNING_LEVEL, DEFAULT_TOP_PRODUCTS,
};

/// Default tracing filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,brew=debug,sqlx=warn";

/// Configuration loading failures. Fatal at startup only.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// =============================================================================
// Stock Policy
// =============================================================================

/// What checkout does when a line asks for more units than are in stock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockPolicy {
    /// Reject the checkout with `InsufficientStock`.
    #[default]
    Enforce,

    /// Sell anyway; stock goes negative (backorder).
    AllowNegative,
}

impl fmt::Display for StockPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockPolicy::Enforce => write!(f, "enforce"),
            StockPolicy::AllowNegative => write!(f, "allow_negative"),
        }
    }
}

impl FromStr for StockPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "enforce" | "strict" => Ok(StockPolicy::Enforce),
            "allow_negative" | "backorder" => Ok(StockPolicy::AllowNegative),
            other => Err(ConfigError::Invalid(format!(
                "unknown stock policy '{}' (expected enforce or allow_negative)",
                other
            ))),
        }
    }
}

// =============================================================================
// ConfigState
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Shown in the prompt banner and on the reports screen.
    pub store_name: String,

    /// Prefix for every money amount shown.
    pub currency_symbol: String,

    /// SQLite file. `None` uses the platform data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Reports list products with stock below this.
    pub low_stock_threshold: i64,

    /// Best sellers shown on the reports screen.
    pub top_products_limit: usize,

    /// The product list flags items with stock below this.
    pub stock_warning_level: i64,

    pub stock_policy: StockPolicy,

    /// Tracing filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            store_name: "Brew POS Coffee Bar".to_string(),
            currency_symbol: "$".to_string(),
            database_path: None,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            top_products_limit: DEFAULT_TOP_PRODUCTS,
            stock_warning_level: DEFAULT_STOCK_WARNING_LEVEL,
            stock_policy: StockPolicy::Enforce,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ConfigState {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// An explicit `config_path` must exist; the default path is optional.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => {
                info!(?path, "Loading config from file");
                Self::from_toml(&std::fs::read_to_string(&path)?)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => {
                    info!(?path, "Loading config from file");
                    Self::from_toml(&std::fs::read_to_string(&path)?)?
                }
                path => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML document. Missing keys keep their defaults.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Rejects values the rest of the app cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.currency_symbol.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "currency_symbol must not be empty".into(),
            ));
        }

        if self.top_products_limit == 0 {
            return Err(ConfigError::Invalid(
                "top_products_limit must be greater than 0".into(),
            ));
        }

        if self.low_stock_threshold < 0 || self.stock_warning_level < 0 {
            return Err(ConfigError::Invalid(
                "stock thresholds must not be negative".into(),
            ));
        }

        Ok(())
    }

    /// Applies `BREW_*` environment overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup`, which maps a variable name to its
    /// value. Unparseable values are logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("BREW_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(symbol) = lookup("BREW_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(path) = lookup("BREW_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database_path = Some(PathBuf::from(path));
        }

        if let Some(threshold) = lookup("BREW_LOW_STOCK_THRESHOLD") {
            match threshold.parse::<i64>() {
                Ok(t) => self.low_stock_threshold = t,
                Err(_) => warn!(value = %threshold, "Ignoring invalid BREW_LOW_STOCK_THRESHOLD"),
            }
        }

        if let Some(policy) = lookup("BREW_STOCK_POLICY") {
            match policy.parse() {
                Ok(p) => self.stock_policy = p,
                Err(e) => warn!(error = %e, "Ignoring invalid BREW_STOCK_POLICY"),
            }
        }
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "brewpos", "brew-pos")
    }

    /// `brew.toml` in the platform config directory.
    pub fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("brew.toml"))
    }

    /// The configured database file, or `brew.db` in the platform data
    /// directory (falling back to the working directory).
    pub fn resolve_database_path(&self) -> PathBuf {
        if let Some(path) = &self.database_path {
            return path.clone();
        }

        Self::project_dirs()
            .map(|dirs| dirs.data_dir().join("brew.db"))
            .unwrap_or_else(|| PathBuf::from("brew.db"))
    }

    /// Formats a cent amount as a currency string.
    pub fn format_currency(&self, cents: i64) -> String {
        format!(
            "{}{}{}.{:02}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            (cents / 100).abs(),
            (cents % 100).abs()
        )
    }

    pub fn format_money(&self, money: Money) -> String {
        self.format_currency(money.cents())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(1050), "$10.50");
        assert_eq!(config.format_currency(5), "$0.05");
        assert_eq!(config.format_currency(0), "$0.00");
        assert_eq!(config.format_currency(-550), "-$5.50");

        let euro = ConfigState {
            currency_symbol: "€".to_string(),
            ..Default::default()
        };
        assert_eq!(euro.format_money(Money::from_cents(945)), "€9.45");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ConfigState::from_toml(
            r#"
            store_name = "Corner Coffee"
            stock_policy = "allow_negative"
            "#,
        )
        .unwrap();

        assert_eq!(config.store_name, "Corner Coffee");
        assert_eq!(config.stock_policy, StockPolicy::AllowNegative);
        assert_eq!(config.low_stock_threshold, 20);
        assert_eq!(config.top_products_limit, 5);
        assert_eq!(config.currency_symbol, "$");
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            ConfigState::from_toml("stock_policy = 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("BREW_STORE_NAME", "Night Owl"),
            ("BREW_DB_PATH", "/tmp/night.db"),
            ("BREW_LOW_STOCK_THRESHOLD", "7"),
            ("BREW_STOCK_POLICY", "allow-negative"),
        ]
        .into_iter()
        .collect();

        let mut config = ConfigState::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.store_name, "Night Owl");
        assert_eq!(config.resolve_database_path(), PathBuf::from("/tmp/night.db"));
        assert_eq!(config.low_stock_threshold, 7);
        assert_eq!(config.stock_policy, StockPolicy::AllowNegative);
    }

    #[test]
    fn test_invalid_override_is_ignored() {
        let mut config = ConfigState::default();
        config.apply_overrides(|key| match key {
            "BREW_LOW_STOCK_THRESHOLD" => Some("lots".to_string()),
            "BREW_STOCK_POLICY" => Some("whatever".to_string()),
            _ => None,
        });
        assert_eq!(config.low_stock_threshold, 20);
        assert_eq!(config.stock_policy, StockPolicy::Enforce);
    }

    #[test]
    fn test_validation() {
        let mut config = ConfigState::default();
        assert!(config.validate().is_ok());

        config.top_products_limit = 0;
        assert!(config.validate().is_err());

        config.top_products_limit = 5;
        config.currency_symbol = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brew.toml");
        std::fs::write(&path, "low_stock_threshold = 12\ntop_products_limit = 3\n").unwrap();

        let config = ConfigState::load(Some(path)).unwrap();
        assert_eq!(config.low_stock_threshold, 12);
        assert_eq!(config.top_products_limit, 3);

        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            ConfigState::load(Some(missing)),
            Err(ConfigError::Io(_))
        ));
    }
}
