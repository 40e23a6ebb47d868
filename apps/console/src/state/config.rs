//! # Application Configuration
//!
//! Where the data lives and how the dashboard is shown.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOCKBOOK_DATA_DIR=/srv/boutique                                   │
//! │     STOCKBOOK_TOP_N=10                                                 │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, else $STOCKBOOK_CONFIG, else                      │
//! │     ~/.config/stockbook/stockbook.toml (Linux)                         │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     data/stock_data.xlsx, data/users.csv, FCFA, top 5, 30 days         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [storage]
//! data_dir = "data"
//! ledger_file = "stock_data.xlsx"
//! users_file = "users.csv"
//!
//! [display]
//! currency_symbol = "FCFA"
//! top_n = 5
//! history_days = 30
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use stockbook_core::DEFAULT_TOP_N;
use stockbook_store::config::{DEFAULT_LEDGER_FILE, DEFAULT_USERS_FILE};
use stockbook_store::StoreConfig;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// =============================================================================
// Sections
// =============================================================================

/// `[storage]`: file locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_ledger_file")]
    pub ledger_file: String,

    #[serde(default = "default_users_file")]
    pub users_file: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_ledger_file() -> String {
    DEFAULT_LEDGER_FILE.to_string()
}

fn default_users_file() -> String {
    DEFAULT_USERS_FILE.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            data_dir: default_data_dir(),
            ledger_file: default_ledger_file(),
            users_file: default_users_file(),
        }
    }
}

/// `[display]`: dashboard presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Shown next to money amounts.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Size of the "top products in stock" ranking.
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Default window of the movement history, in days before today.
    #[serde(default = "default_history_days")]
    pub history_days: u32,
}

fn default_currency_symbol() -> String {
    "FCFA".to_string()
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_history_days() -> u32 {
    30
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
            top_n: default_top_n(),
            history_days: default_history_days(),
        }
    }
}

// =============================================================================
// AppConfig
// =============================================================================

/// Complete console configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl AppConfig {
    /// Loads configuration: defaults, then the TOML file, then environment
    /// overrides. A config file that does not exist means defaults.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML document. Missing keys take their defaults.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `STOCKBOOK_*` overrides read through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("STOCKBOOK_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data directory from environment");
            self.storage.data_dir = PathBuf::from(dir);
        }

        if let Some(name) = lookup("STOCKBOOK_LEDGER_FILE") {
            self.storage.ledger_file = name;
        }

        if let Some(name) = lookup("STOCKBOOK_USERS_FILE") {
            self.storage.users_file = name;
        }

        if let Some(symbol) = lookup("STOCKBOOK_CURRENCY") {
            self.display.currency_symbol = symbol;
        }

        if let Some(top_n) = lookup("STOCKBOOK_TOP_N") {
            match top_n.parse::<usize>() {
                Ok(n) => self.display.top_n = n,
                Err(_) => warn!(value = %top_n, "Ignoring non-numeric STOCKBOOK_TOP_N"),
            }
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.top_n == 0 {
            return Err(ConfigError::Invalid("display.top_n must be at least 1".into()));
        }
        if self.storage.ledger_file.trim().is_empty() {
            return Err(ConfigError::Invalid("storage.ledger_file must not be empty".into()));
        }
        if self.storage.users_file.trim().is_empty() {
            return Err(ConfigError::Invalid("storage.users_file must not be empty".into()));
        }
        Ok(())
    }

    /// File locations for the store crate.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(&self.storage.data_dir)
            .ledger_file(&self.storage.ledger_file)
            .users_file(&self.storage.users_file)
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "stockbook", "stockbook")
            .map(|dirs| dirs.config_dir().join("stockbook.toml"))
    }
}
