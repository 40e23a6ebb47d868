//! # State Module
//!
//! Everything a command needs, opened once at startup.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  AppConfig::load() ──► AppState::open(config)                          │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────┐          │
//! │  │  AppConfig   │  │  LedgerStore     │  │ CredentialStore  │          │
//! │  │              │  │                  │  │                  │          │
//! │  │  paths       │  │  Products +      │  │  users.csv       │          │
//! │  │  top_n       │  │  Movements       │  │  (seeded on      │          │
//! │  │  currency    │  │  (write-through) │  │   first run)     │          │
//! │  └──────────────┘  └──────────────────┘  └──────────────────┘          │
//! │                                                                         │
//! │  Commands take `&AppState` to read and `&mut AppState` to mutate.      │
//! │  Ledger changes go only through `LedgerStore` methods.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::{AppConfig, ConfigError, DisplaySettings, StorageSettings};
pub use session::Session;

use stockbook_core::Ledger;
use stockbook_store::{CredentialStore, LedgerStore};
use tracing::info;

use crate::error::ApiResult;

/// Application state shared by every command handler.
#[derive(Debug)]
pub struct AppState {
    pub config: AppConfig,
    pub ledger: LedgerStore,
    pub users: CredentialStore,
}

impl AppState {
    /// Opens the credential file (seeding it if needed) and loads the ledger.
    pub fn open(config: AppConfig) -> ApiResult<Self> {
        let paths = config.store_config();
        info!(data_dir = %paths.data_dir.display(), "Opening stores");

        let users = CredentialStore::open(paths.users_path())?;
        let ledger = LedgerStore::open(paths.ledger_path())?;

        Ok(AppState {
            config,
            ledger,
            users,
        })
    }

    /// Current in-memory tables.
    pub fn tables(&self) -> &Ledger {
        self.ledger.ledger()
    }
}
