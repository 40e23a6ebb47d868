//! # Store Configuration
//!
//! Where the ledger workbook and the credential file live.
//!
//! ```text
//! StoreConfig::new("data")
//!     .ledger_file("stock_data.xlsx")   ──► data/stock_data.xlsx
//!     .users_file("users.csv")          ──► data/users.csv
//! ```

use std::path::PathBuf;

/// Default ledger workbook file name.
pub const DEFAULT_LEDGER_FILE: &str = "stock_data.xlsx";

/// Default credential file name.
pub const DEFAULT_USERS_FILE: &str = "users.csv";

/// Storage configuration.
///
/// ## Example
/// ```rust
/// use stockbook_store::StoreConfig;
///
/// let config = StoreConfig::new("/srv/shop").ledger_file("inventaire.xlsx");
/// assert!(config.ledger_path().ends_with("inventaire.xlsx"));
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding both files. Created on first save.
    pub data_dir: PathBuf,

    /// Ledger workbook file name, relative to `data_dir`.
    /// Default: `stock_data.xlsx`
    pub ledger_file: String,

    /// Credential file name, relative to `data_dir`.
    /// Default: `users.csv`
    pub users_file: String,
}

impl StoreConfig {
    /// Creates a configuration rooted at `data_dir` with default file names.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            data_dir: data_dir.into(),
            ledger_file: DEFAULT_LEDGER_FILE.to_string(),
            users_file: DEFAULT_USERS_FILE.to_string(),
        }
    }

    /// Sets the ledger workbook file name.
    pub fn ledger_file(mut self, name: impl Into<String>) -> Self {
        self.ledger_file = name.into();
        self
    }

    /// Sets the credential file name.
    pub fn users_file(mut self, name: impl Into<String>) -> Self {
        self.users_file = name.into();
        self
    }

    /// Full path of the ledger workbook.
    pub fn ledger_path(&self) -> PathBuf {
        self.data_dir.join(&self.ledger_file)
    }

    /// Full path of the credential file.
    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(&self.users_file)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::new("data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_default_paths() {
        let config = StoreConfig::default();
        assert_eq!(config.ledger_path(), Path::new("data").join("stock_data.xlsx"));
        assert_eq!(config.users_path(), Path::new("data").join("users.csv"));
    }

    #[test]
    fn test_config_builder() {
        let config = StoreConfig::new("/tmp/shop")
            .ledger_file("ledger.xlsx")
            .users_file("accounts.csv");

        assert_eq!(config.ledger_path(), Path::new("/tmp/shop/ledger.xlsx"));
        assert_eq!(config.users_path(), Path::new("/tmp/shop/accounts.csv"));
    }
}
