//! Common test utilities for stockbook-store integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;

use stockbook_core::ledger::ProductFields;
use stockbook_core::Money;
use stockbook_store::{LedgerStore, StoreConfig};

/// A store rooted in a fresh temporary data directory.
pub struct TestHarness {
    pub store: LedgerStore,
    pub config: StoreConfig,
    /// Kept alive for the test duration.
    pub _temp_dir: TempDir,
}

impl TestHarness {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config = StoreConfig::new(temp_dir.path().join("data"));
        let store = LedgerStore::open(config.ledger_path()).expect("Failed to open store");

        Self {
            store,
            config,
            _temp_dir: temp_dir,
        }
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.config.ledger_path()
    }

    /// Opens a second handle on the same file, as a fresh process would.
    pub fn reopen(&self) -> LedgerStore {
        LedgerStore::open(self.ledger_path()).expect("Failed to reopen store")
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn added_at() -> NaiveDateTime {
    day(2024, 1, 1).and_hms_opt(9, 0, 0).expect("valid time")
}

pub fn riz() -> ProductFields {
    ProductFields::new("Riz", "Céréales", Money::from_units(500), 10, 5)
}
