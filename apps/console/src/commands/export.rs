//! # Export Commands
//!
//! Writes the current ledger to a file chosen by the operator. Exports are
//! snapshots: the ledger workbook itself is never touched.

use std::path::{Path, PathBuf};

use serde::Serialize;
use stockbook_core::analytics::compute_revenue;
use stockbook_core::Period;
use stockbook_store::export;
use tracing::debug;

use crate::error::ApiResult;
use crate::state::AppState;

/// Where an export went and how big it is.
#[derive(Debug, Clone, Serialize)]
pub struct ExportReceipt {
    pub path: PathBuf,
    pub bytes: usize,
}

/// The product table as CSV.
pub fn export_products(state: &AppState, out: &Path) -> ApiResult<ExportReceipt> {
    debug!(out = %out.display(), "export_products command");
    let bytes = export::products_csv(&state.tables().products)?;
    write(out, bytes)
}

/// The movement table as CSV.
pub fn export_movements(state: &AppState, out: &Path) -> ApiResult<ExportReceipt> {
    debug!(out = %out.display(), "export_movements command");
    let bytes = export::movements_csv(&state.tables().movements)?;
    write(out, bytes)
}

/// Both tables as a workbook, with a revenue sheet per `with_revenue` period.
pub fn export_workbook(
    state: &AppState,
    out: &Path,
    with_revenue: Option<Period>,
) -> ApiResult<ExportReceipt> {
    debug!(out = %out.display(), ?with_revenue, "export_workbook command");
    let ledger = state.tables();
    let revenue =
        with_revenue.map(|period| compute_revenue(&ledger.movements, &ledger.products, period));
    let bytes = export::workbook_bytes(ledger, revenue.as_deref())?;
    write(out, bytes)
}

fn write(out: &Path, bytes: Vec<u8>) -> ApiResult<ExportReceipt> {
    export::write_export(out, &bytes)?;
    Ok(ExportReceipt {
        path: out.to_path_buf(),
        bytes: bytes.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{day, now, open_state};
    use stockbook_core::ledger::{NewMovement, ProductFields};
    use stockbook_core::{Money, MovementType};
    use stockbook_store::workbook;
    use tempfile::TempDir;

    fn stocked(dir: &TempDir) -> AppState {
        let mut state = open_state(dir);
        state
            .ledger
            .add_product(
                ProductFields::new("Riz", "Céréales", Money::from_units(500), 10, 5),
                now(),
            )
            .unwrap();
        state
            .ledger
            .record_movement(NewMovement::new("Riz", MovementType::Outbound, 3, day(2024, 1, 10)))
            .unwrap();
        state
    }

    #[test]
    fn test_csv_exports() {
        let dir = TempDir::new().unwrap();
        let state = stocked(&dir);

        let out = dir.path().join("produits.csv");
        let receipt = export_products(&state, &out).unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(receipt.bytes, text.len());
        assert!(text.starts_with("ID,Nom Produit"));
        assert!(text.contains("Riz,Céréales,500,7,5"));

        let out = dir.path().join("mouvements.csv");
        export_movements(&state, &out).unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        assert!(text.contains("2024-01-10,Riz,Sortie,3"));
    }

    #[test]
    fn test_workbook_export_matches_ledger() {
        let dir = TempDir::new().unwrap();
        let state = stocked(&dir);
        let ledger_before = std::fs::read(state.ledger.path()).unwrap();

        let out = dir.path().join("snapshot.xlsx");
        export_workbook(&state, &out, Some(Period::Month)).unwrap();

        assert_eq!(workbook::load(&out).unwrap(), *state.tables());
        assert_eq!(std::fs::read(state.ledger.path()).unwrap(), ledger_before);
    }

    #[test]
    fn test_unwritable_destination_is_storage_error() {
        let dir = TempDir::new().unwrap();
        let state = stocked(&dir);
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let err = export_products(&state, &blocker.join("produits.csv")).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::StorageError);
    }
}
