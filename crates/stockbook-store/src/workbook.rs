//! # Ledger Workbook
//!
//! Reads and writes the two-sheet `.xlsx` file that holds the ledger.
//!
//! ## File Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stock_data.xlsx                                                        │
//! │                                                                         │
//! │  Sheet "Produits"                                                       │
//! │  ┌────┬─────────────┬───────────┬───────────────┬──────────┬──────────┬────────────────────┐
//! │  │ ID │ Nom Produit │ Catégorie │ Prix Unitaire │ Quantité │ Seuil A. │ Date Ajout         │
//! │  ├────┼─────────────┼───────────┼───────────────┼──────────┼──────────┼────────────────────┤
//! │  │ 1  │ Riz         │ Céréales  │ 500           │ 7        │ 5        │ 2024-01-01 09:00:00│
//! │  └────┴─────────────┴───────────┴───────────────┴──────────┴──────────┴────────────────────┘
//! │                                                                         │
//! │  Sheet "Mouvements"                                                     │
//! │  ┌────┬────────────┬─────────┬────────┬──────────┬─────────────┐        │
//! │  │ ID │ Date       │ Produit │ Type   │ Quantité │ Commentaire │        │
//! │  ├────┼────────────┼─────────┼────────┼──────────┼─────────────┤        │
//! │  │ 1  │ 2024-01-10 │ Riz     │ Sortie │ 3        │             │        │
//! │  └────┴────────────┴─────────┴────────┴──────────┴─────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Reading Older Files
//! Files written by earlier tooling may store dates as native spreadsheet
//! dates instead of text, and whole numbers as floats. Both are accepted.
//! Dates are always written back as text.

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook, Data, DataType, Reader, Xlsx};
use chrono::{NaiveDate, NaiveDateTime};
use rust_xlsxwriter::{Workbook, Worksheet};
use stockbook_core::analytics::RevenuePoint;
use stockbook_core::{
    Ledger, Money, Movement, MovementType, Product, DATE_FORMAT, MAX_AMOUNT, MOVEMENTS_SHEET,
    MOVEMENT_COLUMNS, PRODUCTS_SHEET, PRODUCT_COLUMNS, REVENUE_COLUMNS, REVENUE_SHEET,
    TIMESTAMP_FORMAT,
};
use tracing::debug;

use crate::atomic;
use crate::error::{StoreError, StoreResult};

static EMPTY_CELL: Data = Data::Empty;

// =============================================================================
// Loading
// =============================================================================

/// Loads the ledger from `path`. A missing file is an empty ledger.
pub fn load(path: &Path) -> StoreResult<Ledger> {
    if !path.exists() {
        debug!(path = %path.display(), "No workbook on disk");
        return Ok(Ledger::empty());
    }

    let mut workbook: Xlsx<_> = open_workbook(path)?;
    read_ledger(&mut workbook)
}

/// Parses a ledger from an in-memory `.xlsx` image.
pub fn from_bytes(bytes: &[u8]) -> StoreResult<Ledger> {
    let mut workbook = Xlsx::new(Cursor::new(bytes))?;
    read_ledger(&mut workbook)
}

fn read_ledger<RS: Read + Seek>(workbook: &mut Xlsx<RS>) -> StoreResult<Ledger> {
    let products = read_sheet(workbook, PRODUCTS_SHEET, &PRODUCT_COLUMNS, product_from_row)?;
    let movements = read_sheet(workbook, MOVEMENTS_SHEET, &MOVEMENT_COLUMNS, movement_from_row)?;
    Ok(Ledger::new(products, movements))
}

fn read_sheet<RS, T>(
    workbook: &mut Xlsx<RS>,
    sheet: &str,
    columns: &[&str],
    parse: fn(&SheetRow<'_>) -> StoreResult<T>,
) -> StoreResult<Vec<T>>
where
    RS: Read + Seek,
{
    if !workbook.sheet_names().iter().any(|name| name == sheet) {
        return Err(StoreError::SheetMissing(sheet.to_string()));
    }

    let range = workbook.worksheet_range(sheet)?;
    let first_row = range.start().map_or(0, |(row, _)| row as usize);
    let mut rows = range.rows();

    // A sheet with no cells at all holds zero rows.
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };
    check_header(sheet, columns, header)?;

    rows.enumerate()
        .filter(|(_, cells)| !cells.iter().all(|c| matches!(c, Data::Empty)))
        .map(|(offset, cells)| {
            parse(&SheetRow {
                sheet,
                number: first_row + offset + 2,
                columns,
                cells,
            })
        })
        .collect()
}

fn check_header(sheet: &str, expected: &[&str], header: &[Data]) -> StoreResult<()> {
    let mut found: Vec<String> = header.iter().map(|c| cell_text(c).trim().to_string()).collect();
    while found.last().is_some_and(|c| c.is_empty()) {
        found.pop();
    }

    if found.iter().map(String::as_str).ne(expected.iter().copied()) {
        return Err(StoreError::HeaderMismatch {
            sheet: sheet.to_string(),
            expected: expected.iter().map(|c| c.to_string()).collect(),
            found,
        });
    }
    Ok(())
}

fn product_from_row(row: &SheetRow<'_>) -> StoreResult<Product> {
    Ok(Product {
        id: row.integer(0)?,
        name: row.text(1),
        category: row.text(2),
        unit_price: Money::from_units(row.integer(3)?),
        quantity: row.integer(4)?,
        alert_threshold: row.integer(5)?,
        added_at: row.timestamp(6)?,
    })
}

fn movement_from_row(row: &SheetRow<'_>) -> StoreResult<Movement> {
    let kind = row
        .text(3)
        .parse::<MovementType>()
        .map_err(|e| row.invalid(3, e.to_string()))?;

    Ok(Movement {
        id: row.integer(0)?,
        date: row.date(1)?,
        product: row.text(2),
        kind,
        quantity: row.integer(4)?,
        comment: row.text(5),
    })
}

/// One data row of a sheet, with enough context to report bad cells.
struct SheetRow<'a> {
    sheet: &'a str,
    number: usize,
    columns: &'a [&'a str],
    cells: &'a [Data],
}

impl SheetRow<'_> {
    fn cell(&self, col: usize) -> &Data {
        self.cells.get(col).unwrap_or(&EMPTY_CELL)
    }

    fn invalid(&self, col: usize, reason: String) -> StoreError {
        StoreError::InvalidCell {
            sheet: self.sheet.to_string(),
            row: self.number,
            column: self.columns.get(col).copied().unwrap_or("?").to_string(),
            reason,
        }
    }

    fn text(&self, col: usize) -> String {
        cell_text(self.cell(col))
    }

    fn integer(&self, col: usize) -> StoreResult<i64> {
        cell_integer(self.cell(col)).map_err(|reason| self.invalid(col, reason))
    }

    fn date(&self, col: usize) -> StoreResult<NaiveDate> {
        cell_timestamp(self.cell(col))
            .map(|ts| ts.date())
            .map_err(|reason| self.invalid(col, reason))
    }

    fn timestamp(&self, col: usize) -> StoreResult<NaiveDateTime> {
        cell_timestamp(self.cell(col)).map_err(|reason| self.invalid(col, reason))
    }
}

// =============================================================================
// Cell Conversion
// =============================================================================

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}

fn cell_integer(cell: &Data) -> Result<i64, String> {
    let value = match cell {
        Data::Int(i) => *i,
        Data::Float(f) => whole_number(*f)?,
        Data::String(s) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(i) => i,
                Err(_) => s
                    .parse::<f64>()
                    .map_err(|_| format!("'{s}' is not a whole number"))
                    .and_then(whole_number)?,
            }
        }
        Data::Empty => return Err("cell is empty".to_string()),
        other => return Err(format!("expected a number, found {other}")),
    };

    if value.unsigned_abs() > MAX_AMOUNT.unsigned_abs() {
        return Err(format!("{value} is larger than {MAX_AMOUNT}"));
    }
    Ok(value)
}

/// The float-to-int cast saturates, so huge values fail the bound check above.
fn whole_number(f: f64) -> Result<i64, String> {
    if f.is_finite() && f.fract() == 0.0 {
        Ok(f as i64)
    } else {
        Err(format!("{f} is not a whole number"))
    }
}

fn cell_timestamp(cell: &Data) -> Result<NaiveDateTime, String> {
    match cell {
        Data::String(s) | Data::DateTimeIso(s) => parse_timestamp(s.trim()),
        Data::DateTime(_) => cell
            .as_datetime()
            .ok_or_else(|| format!("{cell} is not a valid date")),
        Data::Empty => Err("cell is empty".to_string()),
        other => Err(format!("expected a date, found {other}")),
    }
}

fn parse_timestamp(s: &str) -> Result<NaiveDateTime, String> {
    const LAYOUTS: [&str; 3] = [TIMESTAMP_FORMAT, "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

    LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(s, layout).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, DATE_FORMAT)
                .ok()
                .map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
        .ok_or_else(|| format!("'{s}' is not a date"))
}

// =============================================================================
// Saving
// =============================================================================

/// Builds a workbook holding the `Produits` and `Mouvements` sheets.
pub fn build(ledger: &Ledger) -> StoreResult<Workbook> {
    let mut workbook = Workbook::new();
    write_products(workbook.add_worksheet(), &ledger.products)?;
    write_movements(workbook.add_worksheet(), &ledger.movements)?;
    Ok(workbook)
}

/// Appends a `Recettes` sheet to a workbook.
pub fn add_revenue_sheet(workbook: &mut Workbook, revenue: &[RevenuePoint]) -> StoreResult<()> {
    let sheet = workbook.add_worksheet();
    write_header(sheet, REVENUE_SHEET, &REVENUE_COLUMNS)?;

    for (idx, point) in revenue.iter().enumerate() {
        let row = data_row(idx);
        sheet.write_string(row, 0, point.period.to_string())?;
        sheet.write_number(row, 1, point.revenue.units() as f64)?;
    }
    Ok(())
}

/// Serializes the ledger to `.xlsx` bytes.
pub fn to_bytes(ledger: &Ledger) -> StoreResult<Vec<u8>> {
    let mut workbook = build(ledger)?;
    Ok(workbook.save_to_buffer()?)
}

/// Replaces the workbook at `path` with the ledger's contents.
pub fn save(path: &Path, ledger: &Ledger) -> StoreResult<()> {
    atomic::write_file(path, &to_bytes(ledger)?)
}

fn data_row(idx: usize) -> u32 {
    idx as u32 + 1
}

fn write_header(sheet: &mut Worksheet, name: &str, columns: &[&str]) -> StoreResult<()> {
    sheet.set_name(name)?;
    for (col, title) in columns.iter().enumerate() {
        sheet.write_string(0, col as u16, *title)?;
    }
    Ok(())
}

fn write_text(sheet: &mut Worksheet, row: u32, col: u16, text: &str) -> StoreResult<()> {
    if !text.is_empty() {
        sheet.write_string(row, col, text)?;
    }
    Ok(())
}

fn write_products(sheet: &mut Worksheet, products: &[Product]) -> StoreResult<()> {
    write_header(sheet, PRODUCTS_SHEET, &PRODUCT_COLUMNS)?;

    for (idx, p) in products.iter().enumerate() {
        let row = data_row(idx);
        sheet.write_number(row, 0, p.id as f64)?;
        write_text(sheet, row, 1, &p.name)?;
        write_text(sheet, row, 2, &p.category)?;
        sheet.write_number(row, 3, p.unit_price.units() as f64)?;
        sheet.write_number(row, 4, p.quantity as f64)?;
        sheet.write_number(row, 5, p.alert_threshold as f64)?;
        sheet.write_string(row, 6, p.added_at.format(TIMESTAMP_FORMAT).to_string())?;
    }
    Ok(())
}

fn write_movements(sheet: &mut Worksheet, movements: &[Movement]) -> StoreResult<()> {
    write_header(sheet, MOVEMENTS_SHEET, &MOVEMENT_COLUMNS)?;

    for (idx, m) in movements.iter().enumerate() {
        let row = data_row(idx);
        sheet.write_number(row, 0, m.id as f64)?;
        sheet.write_string(row, 1, m.date.format(DATE_FORMAT).to_string())?;
        write_text(sheet, row, 2, &m.product)?;
        sheet.write_string(row, 3, m.kind.label())?;
        sheet.write_number(row, 4, m.quantity as f64)?;
        write_text(sheet, row, 5, &m.comment)?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{ExcelDateTime, ExcelDateTimeType};

    fn sample_ledger() -> Ledger {
        let added = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(9, 15, 30)
            .unwrap();
        Ledger::new(
            vec![
                Product {
                    id: 1,
                    name: "Riz".to_string(),
                    category: "Céréales".to_string(),
                    unit_price: Money::from_units(500),
                    quantity: 7,
                    alert_threshold: 5,
                    added_at: added,
                },
                Product {
                    id: 2,
                    name: "Bougies".to_string(),
                    category: String::new(),
                    unit_price: Money::zero(),
                    quantity: 0,
                    alert_threshold: 0,
                    added_at: added,
                },
            ],
            vec![Movement {
                id: 1,
                date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                product: "Riz".to_string(),
                kind: MovementType::Outbound,
                quantity: 3,
                comment: String::new(),
            }],
        )
    }

    #[test]
    fn test_bytes_round_trip() {
        let ledger = sample_ledger();
        let bytes = to_bytes(&ledger).unwrap();
        assert_eq!(from_bytes(&bytes).unwrap(), ledger);
    }

    #[test]
    fn test_empty_ledger_round_trip() {
        let bytes = to_bytes(&Ledger::empty()).unwrap();
        let back = from_bytes(&bytes).unwrap();
        assert!(back.is_empty());
    }

    #[test]
    fn test_sheets_without_any_cells_hold_zero_rows() {
        let mut workbook = Workbook::new();
        workbook.add_worksheet().set_name(PRODUCTS_SHEET).unwrap();
        workbook.add_worksheet().set_name(MOVEMENTS_SHEET).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        assert!(from_bytes(&bytes).unwrap().is_empty());
    }

    #[test]
    fn test_missing_sheet_is_an_error() {
        let mut workbook = Workbook::new();
        write_products(workbook.add_worksheet(), &[]).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let err = from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, StoreError::SheetMissing(name) if name == MOVEMENTS_SHEET));
    }

    #[test]
    fn test_header_mismatch_is_an_error() {
        let mut workbook = Workbook::new();
        write_header(workbook.add_worksheet(), PRODUCTS_SHEET, &["ID", "Name"]).unwrap();
        write_movements(workbook.add_worksheet(), &[]).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let err = from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, StoreError::HeaderMismatch { ref sheet, .. } if sheet == PRODUCTS_SHEET));
    }

    #[test]
    fn test_revenue_sheet_is_appended() {
        let ledger = sample_ledger();
        let revenue = [RevenuePoint {
            period: stockbook_core::PeriodKey::Day(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()),
            revenue: Money::from_units(1500),
        }];
        let mut workbook = build(&ledger).unwrap();
        add_revenue_sheet(&mut workbook, &revenue).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let mut reader = Xlsx::new(Cursor::new(bytes.as_slice())).unwrap();
        assert_eq!(
            reader.sheet_names(),
            vec![PRODUCTS_SHEET.to_string(), MOVEMENTS_SHEET.to_string(), REVENUE_SHEET.to_string()]
        );
        let range = reader.worksheet_range(REVENUE_SHEET).unwrap();
        let rows: Vec<Vec<String>> = range.rows().map(|r| r.iter().map(cell_text).collect()).collect();
        assert_eq!(rows[0], vec!["Période", "Recettes"]);
        assert_eq!(rows[1], vec!["2024-01-10", "1500"]);
    }

    #[test]
    fn test_integer_cells_accept_whole_floats_and_text() {
        assert_eq!(cell_integer(&Data::Int(12)), Ok(12));
        assert_eq!(cell_integer(&Data::Float(12.0)), Ok(12));
        assert_eq!(cell_integer(&Data::String(" 12 ".to_string())), Ok(12));
        assert_eq!(cell_integer(&Data::String("12.0".to_string())), Ok(12));
        assert!(cell_integer(&Data::Float(12.5)).is_err());
        assert!(cell_integer(&Data::Empty).is_err());
        assert!(cell_integer(&Data::String("douze".to_string())).is_err());
    }

    #[test]
    fn test_integer_cells_are_capped_at_max_amount() {
        assert_eq!(cell_integer(&Data::Float(MAX_AMOUNT as f64)), Ok(MAX_AMOUNT));
        assert_eq!(cell_integer(&Data::Int(MAX_AMOUNT)), Ok(MAX_AMOUNT));
        assert!(cell_integer(&Data::Float(9_007_199_254_740_992.0)).is_err());
        assert!(cell_integer(&Data::Float(1.0e16)).is_err());
        assert!(cell_integer(&Data::Int(MAX_AMOUNT + 1)).is_err());
        assert!(cell_integer(&Data::String("10000000000000000".to_string())).is_err());
    }

    #[test]
    fn test_max_amounts_round_trip() {
        let mut ledger = sample_ledger();
        let riz = &mut ledger.products[0];
        riz.unit_price = Money::from_units(MAX_AMOUNT);
        riz.quantity = MAX_AMOUNT;
        riz.alert_threshold = MAX_AMOUNT;
        ledger.movements[0].quantity = MAX_AMOUNT;

        let bytes = to_bytes(&ledger).unwrap();
        assert_eq!(from_bytes(&bytes).unwrap(), ledger);
    }

    #[test]
    fn test_date_cells_accept_text_and_native_dates() {
        let jan10 = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();

        let text = cell_timestamp(&Data::String("2024-01-10".to_string())).unwrap();
        assert_eq!(text, jan10.and_hms_opt(0, 0, 0).unwrap());

        let stamped = cell_timestamp(&Data::String("2024-01-10 08:30:00".to_string())).unwrap();
        assert_eq!(stamped, jan10.and_hms_opt(8, 30, 0).unwrap());

        let native = Data::DateTime(ExcelDateTime::new(45301.0, ExcelDateTimeType::DateTime, false));
        assert_eq!(cell_timestamp(&native).unwrap().date(), jan10);

        assert!(cell_timestamp(&Data::String("10/01/2024".to_string())).is_err());
        assert!(cell_timestamp(&Data::Empty).is_err());
    }

    #[test]
    fn test_text_cells() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::Float(3.0)), "3");
        assert_eq!(cell_text(&Data::String("Céréales".to_string())), "Céréales");
    }
}
