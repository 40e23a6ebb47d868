//! # Exports
//!
//! Downloadable snapshots of the current ledger. Encoders are pure: they
//! read the in-memory tables and return bytes. [`write_export`] puts the
//! bytes on disk.
//!
//! | Export             | Format | Sheets / columns                          |
//! |--------------------|--------|-------------------------------------------|
//! | `products_csv`     | CSV    | `Produits` columns                        |
//! | `movements_csv`    | CSV    | `Mouvements` columns                      |
//! | `workbook_bytes`   | XLSX   | `Produits`, `Mouvements`, opt. `Recettes` |

use std::path::Path;

use stockbook_core::analytics::RevenuePoint;
use stockbook_core::{
    Ledger, Movement, Product, DATE_FORMAT, MOVEMENT_COLUMNS, PRODUCT_COLUMNS, TIMESTAMP_FORMAT,
};
use tracing::info;

use crate::atomic;
use crate::error::{StoreError, StoreResult};
use crate::workbook;

/// The product table as CSV, header included.
pub fn products_csv(products: &[Product]) -> StoreResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(PRODUCT_COLUMNS)?;
    for p in products {
        writer.write_record([
            p.id.to_string(),
            p.name.clone(),
            p.category.clone(),
            p.unit_price.to_string(),
            p.quantity.to_string(),
            p.alert_threshold.to_string(),
            p.added_at.format(TIMESTAMP_FORMAT).to_string(),
        ])?;
    }
    finish(writer)
}

/// The movement table as CSV, header included.
pub fn movements_csv(movements: &[Movement]) -> StoreResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(MOVEMENT_COLUMNS)?;
    for m in movements {
        writer.write_record([
            m.id.to_string(),
            m.date.format(DATE_FORMAT).to_string(),
            m.product.clone(),
            m.kind.label().to_string(),
            m.quantity.to_string(),
            m.comment.clone(),
        ])?;
    }
    finish(writer)
}

/// Both tables as a workbook, plus a `Recettes` sheet when `revenue` is given.
pub fn workbook_bytes(ledger: &Ledger, revenue: Option<&[RevenuePoint]>) -> StoreResult<Vec<u8>> {
    let mut book = workbook::build(ledger)?;
    if let Some(points) = revenue {
        workbook::add_revenue_sheet(&mut book, points)?;
    }
    Ok(book.save_to_buffer()?)
}

/// Writes an export to `path`, replacing any existing file.
pub fn write_export(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    atomic::write_file(path, bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "Export written");
    Ok(())
}

fn finish(writer: csv::Writer<Vec<u8>>) -> StoreResult<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|e| StoreError::io("<csv buffer>", e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use stockbook_core::{Money, MovementType, PeriodKey};

    fn riz() -> Product {
        Product {
            id: 1,
            name: "Riz, long grain".to_string(),
            category: "Céréales".to_string(),
            unit_price: Money::from_units(500),
            quantity: 7,
            alert_threshold: 5,
            added_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_products_csv() {
        let text = String::from_utf8(products_csv(&[riz()]).unwrap()).unwrap();
        assert_eq!(
            text,
            "ID,Nom Produit,Catégorie,Prix Unitaire,Quantité,Seuil Alerte,Date Ajout\n\
             1,\"Riz, long grain\",Céréales,500,7,5,2024-01-01 09:00:00\n"
        );
    }

    #[test]
    fn test_movements_csv_of_empty_table_is_header_only() {
        let text = String::from_utf8(movements_csv(&[]).unwrap()).unwrap();
        assert_eq!(text, "ID,Date,Produit,Type,Quantité,Commentaire\n");
    }

    #[test]
    fn test_movements_csv_uses_type_labels() {
        let m = Movement {
            id: 4,
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            product: "Riz".to_string(),
            kind: MovementType::Inbound,
            quantity: 12,
            comment: "livraison".to_string(),
        };
        let text = String::from_utf8(movements_csv(&[m]).unwrap()).unwrap();
        assert!(text.ends_with("4,2024-01-10,Riz,Entrée,12,livraison\n"));
    }

    #[test]
    fn test_workbook_export_reads_back_as_ledger() {
        let ledger = Ledger::new(vec![riz()], Vec::new());
        let revenue = [RevenuePoint {
            period: PeriodKey::Year(2024),
            revenue: Money::from_units(1500),
        }];

        let with_revenue = workbook_bytes(&ledger, Some(&revenue)).unwrap();
        assert_eq!(workbook::from_bytes(&with_revenue).unwrap(), ledger);

        let plain = workbook_bytes(&ledger, None).unwrap();
        assert_eq!(workbook::from_bytes(&plain).unwrap(), ledger);
    }
}
