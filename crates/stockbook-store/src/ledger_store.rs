//! # Ledger Store
//!
//! Owns the in-memory ledger and keeps it in step with the workbook on disk.
//!
//! ## Write-Through Mutation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  store.record_movement(new)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  draft = ledger.clone()                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  draft.record_movement(new) ── Err ──► return Err  (memory + disk as-is)│
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  workbook::save(path, &draft) ── Err ──► return Err (memory + disk as-is)│
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ledger = draft                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The in-memory copy only changes once the file has been replaced, so the
//! two never disagree after a call returns.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use stockbook_core::ledger::{NewMovement, ProductFields};
use stockbook_core::{CoreResult, Ledger, Movement, Product};
use tracing::{info, warn};

use crate::error::StoreResult;
use crate::workbook;

/// The ledger plus the workbook it was loaded from.
///
/// ## Usage
/// ```rust,ignore
/// let mut store = LedgerStore::open(config.ledger_path())?;
/// store.record_movement(NewMovement::new("Riz", MovementType::Outbound, 3, today))?;
/// ```
#[derive(Debug)]
pub struct LedgerStore {
    path: PathBuf,
    ledger: Ledger,
}

impl LedgerStore {
    /// Loads the ledger from `path`. A missing file yields an empty ledger;
    /// nothing is written until the first mutation.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let ledger = workbook::load(&path)?;

        info!(
            path = %path.display(),
            products = ledger.products.len(),
            movements = ledger.movements.len(),
            "Ledger loaded"
        );

        Ok(LedgerStore { path, ledger })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Writes the current ledger to disk.
    pub fn save(&self) -> StoreResult<()> {
        workbook::save(&self.path, &self.ledger)?;
        info!(
            path = %self.path.display(),
            products = self.ledger.products.len(),
            movements = self.ledger.movements.len(),
            "Ledger saved"
        );
        Ok(())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub fn add_product(&mut self, fields: ProductFields, added_at: NaiveDateTime) -> StoreResult<Product> {
        let product = self.mutate(|ledger| ledger.add_product(fields, added_at).cloned())?;
        info!(id = product.id, name = %product.name, "Product added");
        Ok(product)
    }

    pub fn edit_product(&mut self, current_name: &str, fields: ProductFields) -> StoreResult<Product> {
        let product = self.mutate(|ledger| ledger.edit_product(current_name, fields).cloned())?;
        info!(id = product.id, from = %current_name, to = %product.name, "Product edited");
        Ok(product)
    }

    /// Records a movement. Rejections (unknown product, insufficient stock)
    /// leave memory and disk untouched.
    pub fn record_movement(&mut self, new: NewMovement) -> StoreResult<Movement> {
        let product = new.product.clone();
        let result = self.mutate(|ledger| ledger.record_movement(new).cloned());

        match &result {
            Ok(m) => info!(
                id = m.id,
                product = %m.product,
                kind = %m.kind,
                quantity = m.quantity,
                "Movement recorded"
            ),
            Err(e) => warn!(product = %product, error = %e, "Movement rejected"),
        }
        result
    }

    /// Zeroes every product's quantity, keeping the movement history.
    pub fn reset_quantities(&mut self) -> StoreResult<usize> {
        let changed = self.mutate(|ledger| Ok(ledger.reset_quantities()))?;
        info!(changed, "Quantities reset");
        Ok(changed)
    }

    /// Empties both tables and persists them in a single write.
    pub fn purge_all(&mut self) -> StoreResult<()> {
        self.mutate(|ledger| {
            ledger.purge();
            Ok(())
        })?;
        warn!(path = %self.path.display(), "Ledger purged");
        Ok(())
    }

    fn mutate<T>(&mut self, apply: impl FnOnce(&mut Ledger) -> CoreResult<T>) -> StoreResult<T> {
        let mut draft = self.ledger.clone();
        let out = apply(&mut draft)?;
        workbook::save(&self.path, &draft)?;
        self.ledger = draft;
        Ok(out)
    }
}
