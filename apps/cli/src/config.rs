//! # Application Configuration
//!
//! Where the database lives and how money is displayed.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line (highest priority)                                     │
//! │     --db ./shop.db                                                      │
//! │                                                                         │
//! │  2. Environment Variables                                               │
//! │     STOCKTALLY_DB=./shop.db                                             │
//! │     STOCKTALLY_CURRENCY_SYMBOL=€                                        │
//! │     STOCKTALLY_CURRENCY_DECIMALS=2                                      │
//! │                                                                         │
//! │  3. TOML Config File (--config, or the platform default)                │
//! │     ~/.config/stocktally/stocktally.toml (Linux)                        │
//! │     ~/Library/Application Support/com.stocktally.stocktally/ (macOS)    │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                    │
//! │     "$", 2 decimals, <platform data dir>/stocktally.db                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [database]
//! path = "/home/me/shop/stocktally.db"
//!
//! [currency]
//! symbol = "€"
//! decimals = 2
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use stocktally_core::Money;
use tracing::{debug, info};

use crate::error::ConfigError;

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "stocktally.toml";

/// Database file name inside the platform data directory.
pub const DATABASE_FILE_NAME: &str = "stocktally.db";

/// Largest supported number of currency decimals.
pub const MAX_CURRENCY_DECIMALS: u8 = 4;

// =============================================================================
// Config Sections
// =============================================================================

/// Database settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// Explicit database file. `None` uses the platform data directory.
    pub path: Option<PathBuf>,
}

/// Currency display settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencySection {
    /// Symbol placed before the amount.
    pub symbol: String,

    /// Digits after the decimal point. Amounts are stored in units of
    /// `10^-decimals`.
    pub decimals: u8,
}

impl Default for CurrencySection {
    fn default() -> Self {
        CurrencySection {
            symbol: "$".to_string(),
            decimals: 2,
        }
    }
}

// =============================================================================
// App Config
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseSection,
    pub currency: CurrencySection,
}

impl AppConfig {
    /// Loads configuration from file and environment.
    ///
    /// An explicit `config_path` must exist. The platform default path is
    /// optional: when it is missing, defaults are used.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Reads and parses a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading config from file");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies `STOCKTALLY_*` overrides read through `lookup`.
    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(path) = lookup("STOCKTALLY_DB") {
            debug!(%path, "Overriding database path from environment");
            self.database.path = Some(PathBuf::from(path));
        }

        if let Some(symbol) = lookup("STOCKTALLY_CURRENCY_SYMBOL") {
            self.currency.symbol = symbol;
        }

        if let Some(value) = lookup("STOCKTALLY_CURRENCY_DECIMALS") {
            self.currency.decimals =
                value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidEnv {
                        key: "STOCKTALLY_CURRENCY_DECIMALS",
                        value,
                    })?;
        }

        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.currency.decimals > MAX_CURRENCY_DECIMALS {
            return Err(ConfigError::Invalid(format!(
                "currency.decimals must be at most {MAX_CURRENCY_DECIMALS}, got {}",
                self.currency.decimals
            )));
        }
        Ok(())
    }

    /// Resolves the database file path.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.database.path {
            Some(path) => Ok(path.clone()),
            None => Self::project_dirs()
                .map(|dirs| dirs.data_dir().join(DATABASE_FILE_NAME))
                .ok_or(ConfigError::NoDataDir),
        }
    }

    /// Returns the platform config file path.
    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "stocktally", "stocktally")
    }

    // =========================================================================
    // Currency
    // =========================================================================

    /// Formats an amount as a currency string.
    ///
    /// The sign goes before the symbol.
    ///
    /// ## Example
    /// ```rust
    /// use stocktally_cli::config::AppConfig;
    /// use stocktally_core::Money;
    ///
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// assert_eq!(config.format_currency(Money::from_cents(-1234)), "-$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let units = amount.cents();
        let decimals = u32::from(self.currency.decimals);
        let divisor = 10_i64.pow(decimals);
        let whole = (units / divisor).unsigned_abs();
        let frac = (units % divisor).unsigned_abs();

        let digits = if decimals > 0 {
            format!("{whole}.{frac:0width$}", width = decimals as usize)
        } else {
            whole.to_string()
        };

        format!(
            "{}{}{}",
            if units < 0 { "-" } else { "" },
            self.currency.symbol,
            digits
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_format_currency_positive() {
        let config = AppConfig::default();
        assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_currency(Money::from_cents(100)), "$1.00");
        assert_eq!(config.format_currency(Money::from_cents(1)), "$0.01");
        assert_eq!(config.format_currency(Money::zero()), "$0.00");
    }

    #[test]
    fn test_format_currency_negative() {
        let config = AppConfig::default();
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-$12.34");
        assert_eq!(config.format_currency(Money::from_cents(-5)), "-$0.05");
    }

    #[test]
    fn test_format_currency_other_decimals() {
        let mut config = AppConfig::default();
        config.currency.symbol = "¥".to_string();
        config.currency.decimals = 0;
        assert_eq!(config.format_currency(Money::from_cents(1500)), "¥1500");

        config.currency.symbol = "BD ".to_string();
        config.currency.decimals = 3;
        assert_eq!(config.format_currency(Money::from_cents(12_345)), "BD 12.345");
    }

    #[test]
    fn test_toml_sections_are_optional() {
        let config: AppConfig = toml::from_str("[currency]\nsymbol = \"€\"\n").unwrap();

        assert_eq!(config.currency.symbol, "€");
        assert_eq!(config.currency.decimals, 2);
        assert!(config.database.path.is_none());
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config: AppConfig =
            toml::from_str("[database]\npath = \"/from/file.db\"\n").unwrap();

        config
            .apply_env_overrides(env(&[
                ("STOCKTALLY_DB", "/from/env.db"),
                ("STOCKTALLY_CURRENCY_DECIMALS", " 3 "),
            ]))
            .unwrap();

        assert_eq!(config.database.path, Some(PathBuf::from("/from/env.db")));
        assert_eq!(config.currency.decimals, 3);
        assert_eq!(config.currency.symbol, "$");
    }

    #[test]
    fn test_bad_env_value_is_an_error() {
        let mut config = AppConfig::default();
        let result = config.apply_env_overrides(env(&[("STOCKTALLY_CURRENCY_DECIMALS", "two")]));

        assert!(matches!(result, Err(ConfigError::InvalidEnv { .. })));
    }

    #[test]
    fn test_validate_rejects_large_decimals() {
        let mut config = AppConfig::default();
        config.currency.decimals = 9;

        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_explicit_database_path_wins() {
        let mut config = AppConfig::default();
        config.database.path = Some(PathBuf::from("/tmp/shop.db"));

        assert_eq!(config.database_path().unwrap(), PathBuf::from("/tmp/shop.db"));
    }

    #[test]
    fn test_missing_explicit_config_file_is_an_error() {
        let result = AppConfig::load(Some(PathBuf::from("/definitely/not/here.toml")));

        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
