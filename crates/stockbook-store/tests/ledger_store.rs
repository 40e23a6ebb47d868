//! Write-through behaviour of the ledger store against real files.

mod common;

use std::fs;

use common::{added_at, day, riz, TestHarness};
use stockbook_core::analytics::compute_revenue;
use stockbook_core::ledger::{NewMovement, ProductFields};
use stockbook_core::{CoreError, Money, MovementType, Period, PeriodKey, ValidationError, MAX_AMOUNT};
use stockbook_store::{workbook, StoreError};

#[test]
fn missing_file_loads_as_empty_tables() {
    let harness = TestHarness::new();

    assert!(!harness.ledger_path().exists());
    assert!(harness.store.ledger().products.is_empty());
    assert!(harness.store.ledger().movements.is_empty());

    let ledger = harness.store.ledger();
    assert!(compute_revenue(&ledger.movements, &ledger.products, Period::Day).is_empty());
}

#[test]
fn saved_empty_ledger_keeps_both_schemas() {
    let harness = TestHarness::new();
    harness.store.save().unwrap();

    let reopened = harness.reopen();
    assert!(reopened.ledger().is_empty());
}

#[test]
fn save_then_load_round_trips() {
    let mut harness = TestHarness::new();
    harness.store.add_product(riz(), added_at()).unwrap();
    harness
        .store
        .add_product(ProductFields::new("Savon", "", Money::zero(), 0, 0), added_at())
        .unwrap();
    harness
        .store
        .record_movement(
            NewMovement::new("Riz", MovementType::Inbound, 4, day(2024, 1, 9)).with_comment("arrivage"),
        )
        .unwrap();
    harness
        .store
        .record_movement(NewMovement::new("Riz", MovementType::Outbound, 3, day(2024, 1, 10)))
        .unwrap();

    let reopened = harness.reopen();
    assert_eq!(reopened.ledger(), harness.store.ledger());
}

#[test]
fn riz_scenario() {
    let mut harness = TestHarness::new();
    harness.store.add_product(riz(), added_at()).unwrap();

    harness
        .store
        .record_movement(NewMovement::new("Riz", MovementType::Outbound, 3, day(2024, 1, 10)))
        .unwrap();
    assert_eq!(harness.store.ledger().products[0].quantity, 7);

    let ledger = harness.store.ledger();
    let revenue = compute_revenue(&ledger.movements, &ledger.products, Period::Day);
    assert_eq!(revenue.len(), 1);
    assert_eq!(revenue[0].period, PeriodKey::Day(day(2024, 1, 10)));
    assert_eq!(revenue[0].revenue, Money::from_units(1500));

    let err = harness
        .store
        .record_movement(NewMovement::new("Riz", MovementType::Outbound, 20, day(2024, 1, 11)))
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Core(CoreError::InsufficientStock { available: 7, .. })
    ));
    assert_eq!(harness.store.ledger().products[0].quantity, 7);
    assert_eq!(harness.reopen().ledger().products[0].quantity, 7);
}

#[test]
fn rejected_movement_leaves_file_untouched() {
    let mut harness = TestHarness::new();
    harness.store.add_product(riz(), added_at()).unwrap();
    let before_bytes = fs::read(harness.ledger_path()).unwrap();
    let before = harness.store.ledger().clone();

    assert!(harness
        .store
        .record_movement(NewMovement::new("Riz", MovementType::Outbound, 11, day(2024, 2, 1)))
        .is_err());
    assert!(harness
        .store
        .record_movement(NewMovement::new("Mil", MovementType::Inbound, 1, day(2024, 2, 1)))
        .is_err());

    assert_eq!(harness.store.ledger(), &before);
    assert_eq!(fs::read(harness.ledger_path()).unwrap(), before_bytes);
}

#[test]
fn balance_matches_movement_history_after_reload() {
    let mut harness = TestHarness::new();
    harness
        .store
        .add_product(ProductFields::new("Huile", "Épicerie", Money::from_units(1200), 0, 2), added_at())
        .unwrap();

    for (kind, qty) in [
        (MovementType::Inbound, 10),
        (MovementType::Outbound, 4),
        (MovementType::Outbound, 7),
        (MovementType::Inbound, 1),
        (MovementType::Outbound, 7),
    ] {
        let _ = harness
            .store
            .record_movement(NewMovement::new("Huile", kind, qty, day(2024, 3, 1)));
    }

    let reopened = harness.reopen();
    let ledger = reopened.ledger();
    let net: i64 = ledger
        .movements
        .iter()
        .map(|m| if m.is_outbound() { -m.quantity } else { m.quantity })
        .sum();
    assert_eq!(ledger.products[0].quantity, net);
    assert_eq!(ledger.products[0].quantity, 0);
}

#[test]
fn reset_keeps_movements_and_purge_empties_everything() {
    let mut harness = TestHarness::new();
    harness.store.add_product(riz(), added_at()).unwrap();
    harness
        .store
        .record_movement(NewMovement::new("Riz", MovementType::Outbound, 2, day(2024, 1, 5)))
        .unwrap();

    assert_eq!(harness.store.reset_quantities().unwrap(), 1);
    let after_reset = harness.reopen();
    assert_eq!(after_reset.ledger().products[0].quantity, 0);
    assert_eq!(after_reset.ledger().products[0].name, "Riz");
    assert_eq!(after_reset.ledger().movements.len(), 1);

    harness.store.purge_all().unwrap();
    assert!(harness.store.ledger().is_empty());
    assert!(harness.reopen().ledger().is_empty());
}

#[test]
fn edit_overwrites_product_on_disk() {
    let mut harness = TestHarness::new();
    harness.store.add_product(riz(), added_at()).unwrap();

    harness
        .store
        .edit_product("Riz", ProductFields::new("Riz parfumé", "Céréales", Money::from_units(650), 3, 1))
        .unwrap();

    let reopened = harness.reopen();
    let product = &reopened.ledger().products[0];
    assert_eq!(product.id, 1);
    assert_eq!(product.name, "Riz parfumé");
    assert_eq!(product.unit_price, Money::from_units(650));
    assert_eq!(product.added_at, added_at());
}

#[test]
fn corrupt_file_is_reported_not_replaced() {
    let harness = TestHarness::new();
    let path = harness.ledger_path();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, b"not a workbook").unwrap();

    assert!(matches!(
        workbook::load(&path),
        Err(StoreError::WorkbookRead(_))
    ));
    assert_eq!(fs::read(&path).unwrap(), b"not a workbook");
}

#[test]
fn amounts_past_the_storable_limit_are_rejected_and_the_file_still_opens() {
    let mut harness = TestHarness::new();
    let huge = ProductFields::new("Or", "Luxe", Money::from_units(1), 10_000_000_000_000_000, 0);
    let err = harness.store.add_product(huge, added_at()).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Core(CoreError::Validation(ValidationError::OutOfRange { .. }))
    ));
    assert!(!harness.ledger_path().exists());

    let largest = ProductFields::new("Or", "Luxe", Money::from_units(MAX_AMOUNT), MAX_AMOUNT - 1, MAX_AMOUNT);
    harness.store.add_product(largest, added_at()).unwrap();
    let before = fs::read(harness.ledger_path()).unwrap();

    let err = harness
        .store
        .record_movement(NewMovement::new("Or", MovementType::Inbound, 2, day(2024, 1, 10)))
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Core(CoreError::Validation(ValidationError::OutOfRange { max: 1, .. }))
    ));
    assert_eq!(fs::read(harness.ledger_path()).unwrap(), before);

    harness
        .store
        .record_movement(NewMovement::new("Or", MovementType::Inbound, 1, day(2024, 1, 10)))
        .unwrap();

    let reopened = harness.reopen();
    assert_eq!(reopened.ledger(), harness.store.ledger());
    assert_eq!(reopened.ledger().products[0].quantity, MAX_AMOUNT);
}
