//! # stockbook-store: Persistence Layer for Stockbook
//!
//! This crate owns every file Stockbook touches: the ledger workbook, the
//! credential file and the exports.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockbook Data Flow                              │
//! │                                                                         │
//! │  Console command (movements record)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  stockbook-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  LedgerStore  │    │CredentialStore│    │    export    │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ clone → apply │    │ seed on first │    │ CSV, XLSX    │  │   │
//! │  │   │ → save → swap │    │ run, lookup   │    │ snapshots    │  │   │
//! │  │   └───────┬───────┘    └───────┬───────┘    └──────┬───────┘  │   │
//! │  │           │ workbook.rs        │ csv               │          │   │
//! │  │           └──────────┬─────────┴───────────────────┘          │   │
//! │  │                      ▼                                         │   │
//! │  │               atomic.rs (temp file + rename)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  data/stock_data.xlsx        data/users.csv                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - File locations
//! - [`ledger_store`] - Write-through ledger handle
//! - [`workbook`] - `.xlsx` encoding of the ledger
//! - [`credentials`] - `users.csv` bootstrap and login
//! - [`export`] - CSV and workbook snapshots
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockbook_store::{CredentialStore, LedgerStore, StoreConfig};
//!
//! let config = StoreConfig::new("data");
//! let users = CredentialStore::open(config.users_path())?;
//! let role = users.authenticate("admin", password);
//!
//! let mut store = LedgerStore::open(config.ledger_path())?;
//! store.add_product(fields, now)?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

mod atomic;
pub mod config;
pub mod credentials;
pub mod error;
pub mod export;
pub mod ledger_store;
pub mod workbook;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::StoreConfig;
pub use credentials::CredentialStore;
pub use error::{StoreError, StoreResult};
pub use ledger_store::LedgerStore;
