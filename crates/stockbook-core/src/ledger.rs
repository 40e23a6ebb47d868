//! # Ledger
//!
//! The in-memory Products + Movements tables and the rules that mutate them.
//!
//! ## Balance Update
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    record_movement()                                    │
//! │                                                                         │
//! │  NewMovement { product: "Riz", kind: Sortie, quantity: 3 }             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate quantity (> 0), comment length                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  find_product("Riz") ── none ──► ProductNotFound      (no change)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Sortie and stock < 3 ─────────► InsufficientStock    (no change)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  push Movement { id: max+1 }  +  product.quantity ∓= 3                 │
//! │  (both or neither)                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every check runs before the first write, so an `Err` leaves both tables
//! exactly as they were.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Movement, MovementType, Product};
use crate::validation::{
    validate_alert_threshold, validate_category, validate_comment, validate_movement_quantity,
    validate_product_name, validate_stock_quantity, validate_unit_price, ValidationResult,
};
use crate::MAX_AMOUNT;

// =============================================================================
// Inputs
// =============================================================================

/// Editable product fields, as entered in the add/edit product forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFields {
    pub name: String,
    pub category: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub alert_threshold: i64,
}

impl ProductFields {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        unit_price: Money,
        quantity: i64,
        alert_threshold: i64,
    ) -> Self {
        ProductFields {
            name: name.into(),
            category: category.into(),
            unit_price,
            quantity,
            alert_threshold,
        }
    }

    fn validate(&self) -> ValidationResult<()> {
        validate_product_name(&self.name)?;
        validate_category(&self.category)?;
        validate_unit_price(self.unit_price)?;
        validate_stock_quantity(self.quantity)?;
        validate_alert_threshold(self.alert_threshold)?;
        Ok(())
    }
}

/// A movement about to be recorded. The ID is assigned by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMovement {
    pub product: String,
    pub kind: MovementType,
    pub quantity: i64,
    pub date: NaiveDate,
    pub comment: String,
}

impl NewMovement {
    pub fn new(product: impl Into<String>, kind: MovementType, quantity: i64, date: NaiveDate) -> Self {
        NewMovement {
            product: product.into(),
            kind,
            quantity,
            date,
            comment: String::new(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

// =============================================================================
// Ledger
// =============================================================================

/// The whole dataset: product catalog plus movement history.
///
/// Row order is significant (it is the order rows appear in the workbook and
/// the tie-breaker for rankings), so both tables are plain vectors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ledger {
    pub products: Vec<Product>,
    pub movements: Vec<Movement>,
}

impl Ledger {
    /// Two zero-row tables.
    pub fn empty() -> Self {
        Ledger::default()
    }

    pub fn new(products: Vec<Product>, movements: Vec<Movement>) -> Self {
        Ledger {
            products,
            movements,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.movements.is_empty()
    }

    /// ID for the next product: highest existing ID + 1, or 1.
    pub fn next_product_id(&self) -> i64 {
        self.products.iter().map(|p| p.id).max().map_or(1, |id| id + 1)
    }

    /// ID for the next movement: highest existing ID + 1, or 1.
    pub fn next_movement_id(&self) -> i64 {
        self.movements.iter().map(|m| m.id).max().map_or(1, |id| id + 1)
    }

    /// Resolves a movement's product reference.
    ///
    /// The catalog is joined **by name** and the first matching row wins.
    /// This is the only place that knows the join key.
    pub fn find_product(&self, name: &str) -> Option<&Product> {
        self.position_of(name).map(|idx| &self.products[idx])
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        self.products.iter().position(|p| p.name == name)
    }

    /// Appends a product to the catalog.
    ///
    /// Name uniqueness is not enforced. `added_at` is kept to the second,
    /// the precision of the `Date Ajout` column.
    pub fn add_product(&mut self, fields: ProductFields, added_at: NaiveDateTime) -> CoreResult<&Product> {
        fields.validate()?;

        let product = Product {
            id: self.next_product_id(),
            name: fields.name,
            category: fields.category,
            unit_price: fields.unit_price,
            quantity: fields.quantity,
            alert_threshold: fields.alert_threshold,
            added_at: added_at.with_nanosecond(0).unwrap_or(added_at),
        };
        self.products.push(product);

        let idx = self.products.len() - 1;
        Ok(&self.products[idx])
    }

    /// Overwrites every editable field of the first product named `current_name`.
    ///
    /// ID and date added are kept. Renaming detaches earlier movements.
    pub fn edit_product(&mut self, current_name: &str, fields: ProductFields) -> CoreResult<&Product> {
        fields.validate()?;

        let idx = self
            .position_of(current_name)
            .ok_or_else(|| CoreError::ProductNotFound(current_name.to_string()))?;

        let product = &mut self.products[idx];
        product.name = fields.name;
        product.category = fields.category;
        product.unit_price = fields.unit_price;
        product.quantity = fields.quantity;
        product.alert_threshold = fields.alert_threshold;

        Ok(&self.products[idx])
    }

    /// Records a movement and applies it to the product's balance.
    ///
    /// ## Errors
    /// - `Validation` for a non-positive quantity, an oversized comment, or an
    ///   inbound movement that would lift the balance above [`MAX_AMOUNT`]
    /// - `ProductNotFound` when no product carries that name
    /// - `InsufficientStock` when an outbound quantity exceeds the stock
    pub fn record_movement(&mut self, new: NewMovement) -> CoreResult<&Movement> {
        validate_movement_quantity(new.quantity)?;
        validate_comment(&new.comment)?;

        let idx = self
            .position_of(&new.product)
            .ok_or_else(|| CoreError::ProductNotFound(new.product.clone()))?;

        let available = self.products[idx].quantity;
        let balance = match new.kind {
            MovementType::Inbound => {
                let room = MAX_AMOUNT.saturating_sub(available);
                if new.quantity > room {
                    return Err(ValidationError::OutOfRange {
                        field: "quantity".to_string(),
                        min: 1,
                        max: room,
                    }
                    .into());
                }
                available + new.quantity
            }
            MovementType::Outbound => {
                if available < new.quantity {
                    return Err(CoreError::InsufficientStock {
                        product: new.product,
                        available,
                        requested: new.quantity,
                    });
                }
                available - new.quantity
            }
        };

        let movement = Movement {
            id: self.next_movement_id(),
            date: new.date,
            product: new.product,
            kind: new.kind,
            quantity: new.quantity,
            comment: new.comment,
        };

        self.products[idx].quantity = balance;
        self.movements.push(movement);

        let last = self.movements.len() - 1;
        Ok(&self.movements[last])
    }

    /// Sets every product's quantity to zero. Movements are untouched.
    ///
    /// Returns the number of products whose quantity changed.
    pub fn reset_quantities(&mut self) -> usize {
        let mut changed = 0;
        for product in self.products.iter_mut().filter(|p| p.quantity != 0) {
            product.quantity = 0;
            changed += 1;
        }
        changed
    }

    /// Empties both tables.
    pub fn purge(&mut self) {
        self.products.clear();
        self.movements.clear();
    }

    /// Movements matching `filter`, in recording order.
    pub fn history(&self, filter: MovementFilter) -> impl Iterator<Item = &Movement> + '_ {
        self.movements.iter().filter(move |m| filter.matches(m))
    }
}

// =============================================================================
// History Filter
// =============================================================================

/// Criteria for browsing the movement history. `None` means "any".
///
/// Date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementFilter {
    pub kind: Option<MovementType>,
    pub product: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl MovementFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: MovementType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }

    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    pub fn matches(&self, movement: &Movement) -> bool {
        self.kind.map_or(true, |k| movement.kind == k)
            && self.product.as_deref().map_or(true, |p| movement.product == p)
            && self.from.map_or(true, |from| movement.date >= from)
            && self.to.map_or(true, |to| movement.date <= to)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn added() -> NaiveDateTime {
        day(1).and_hms_opt(8, 30, 0).unwrap()
    }

    fn riz() -> ProductFields {
        ProductFields::new("Riz", "Céréales", Money::from_units(500), 10, 5)
    }

    #[test]
    fn test_ids_are_max_plus_one() {
        let mut ledger = Ledger::empty();
        assert_eq!(ledger.next_product_id(), 1);
        assert_eq!(ledger.next_movement_id(), 1);

        ledger.add_product(riz(), added()).unwrap();
        ledger.products[0].id = 41;
        let sucre = ledger
            .add_product(ProductFields::new("Sucre", "Épicerie", Money::from_units(700), 0, 2), added())
            .unwrap();
        assert_eq!(sucre.id, 42);
    }

    #[test]
    fn test_add_product_rejects_invalid_fields() {
        let mut ledger = Ledger::empty();
        let mut fields = riz();
        fields.name = "  ".to_string();
        assert!(matches!(
            ledger.add_product(fields, added()),
            Err(CoreError::Validation(ValidationError::Required { .. }))
        ));

        let mut fields = riz();
        fields.unit_price = Money::from_units(-1);
        assert!(ledger.add_product(fields, added()).is_err());
        assert!(ledger.products.is_empty());
    }

    #[test]
    fn test_duplicate_names_are_allowed_and_first_match_wins() {
        let mut ledger = Ledger::empty();
        ledger.add_product(riz(), added()).unwrap();
        let mut other = riz();
        other.unit_price = Money::from_units(900);
        ledger.add_product(other, added()).unwrap();

        assert_eq!(ledger.products.len(), 2);
        assert_eq!(ledger.find_product("Riz").unwrap().id, 1);
        assert!(ledger.find_product("riz").is_none());
    }

    #[test]
    fn test_outbound_decrements_and_inbound_increments() {
        let mut ledger = Ledger::empty();
        ledger.add_product(riz(), added()).unwrap();

        ledger
            .record_movement(NewMovement::new("Riz", MovementType::Outbound, 3, day(10)))
            .unwrap();
        assert_eq!(ledger.products[0].quantity, 7);

        let m = ledger
            .record_movement(
                NewMovement::new("Riz", MovementType::Inbound, 4, day(11)).with_comment("livraison"),
            )
            .unwrap();
        assert_eq!(m.id, 2);
        assert_eq!(m.comment, "livraison");
        assert_eq!(ledger.products[0].quantity, 11);
    }

    #[test]
    fn test_outbound_over_stock_is_rejected_without_changes() {
        let mut ledger = Ledger::empty();
        ledger.add_product(riz(), added()).unwrap();
        ledger
            .record_movement(NewMovement::new("Riz", MovementType::Outbound, 3, day(10)))
            .unwrap();
        let before = ledger.clone();

        let err = ledger
            .record_movement(NewMovement::new("Riz", MovementType::Outbound, 20, day(11)))
            .unwrap_err();

        match err {
            CoreError::InsufficientStock {
                product,
                available,
                requested,
            } => {
                assert_eq!(product, "Riz");
                assert_eq!(available, 7);
                assert_eq!(requested, 20);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_inbound_cannot_lift_balance_above_max_amount() {
        let mut ledger = Ledger::empty();
        ledger.add_product(riz(), added()).unwrap();
        let room = MAX_AMOUNT - 10;

        let err = ledger
            .record_movement(NewMovement::new("Riz", MovementType::Inbound, room + 1, day(10)))
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { min: 1, max, .. }) if max == room
        ));
        assert_eq!(ledger.products[0].quantity, 10);
        assert!(ledger.movements.is_empty());

        ledger
            .record_movement(NewMovement::new("Riz", MovementType::Inbound, room, day(10)))
            .unwrap();
        assert_eq!(ledger.products[0].quantity, MAX_AMOUNT);
    }

    #[test]
    fn test_outbound_of_exact_stock_reaches_zero() {
        let mut ledger = Ledger::empty();
        ledger.add_product(riz(), added()).unwrap();
        ledger
            .record_movement(NewMovement::new("Riz", MovementType::Outbound, 10, day(2)))
            .unwrap();
        assert_eq!(ledger.products[0].quantity, 0);
    }

    #[test]
    fn test_movement_against_unknown_product_is_rejected() {
        let mut ledger = Ledger::empty();
        ledger.add_product(riz(), added()).unwrap();
        let err = ledger
            .record_movement(NewMovement::new("Mil", MovementType::Inbound, 1, day(2)))
            .unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(name) if name == "Mil"));
        assert!(ledger.movements.is_empty());
    }

    #[test]
    fn test_zero_quantity_movement_is_rejected() {
        let mut ledger = Ledger::empty();
        ledger.add_product(riz(), added()).unwrap();
        assert!(ledger
            .record_movement(NewMovement::new("Riz", MovementType::Inbound, 0, day(2)))
            .is_err());
    }

    #[test]
    fn test_balance_equals_inbound_minus_outbound() {
        let mut ledger = Ledger::empty();
        ledger
            .add_product(ProductFields::new("Huile", "Épicerie", Money::from_units(1200), 0, 1), added())
            .unwrap();

        let script = [
            (MovementType::Inbound, 12),
            (MovementType::Outbound, 5),
            (MovementType::Outbound, 9), // rejected: only 7 left
            (MovementType::Inbound, 3),
            (MovementType::Outbound, 10),
        ];
        for (kind, qty) in script {
            let _ = ledger.record_movement(NewMovement::new("Huile", kind, qty, day(3)));
            assert!(ledger.products[0].quantity >= 0);
        }

        let net: i64 = ledger
            .movements
            .iter()
            .map(|m| match m.kind {
                MovementType::Inbound => m.quantity,
                MovementType::Outbound => -m.quantity,
            })
            .sum();
        assert_eq!(ledger.products[0].quantity, net);
        assert_eq!(ledger.products[0].quantity, 0);
        assert_eq!(ledger.movements.len(), 4);
    }

    #[test]
    fn test_edit_product_overwrites_fields_and_keeps_identity() {
        let mut ledger = Ledger::empty();
        ledger.add_product(riz(), added()).unwrap();

        let edited = ledger
            .edit_product(
                "Riz",
                ProductFields::new("Riz brisé", "Céréales", Money::from_units(450), 30, 8),
            )
            .unwrap();
        assert_eq!(edited.id, 1);
        assert_eq!(edited.name, "Riz brisé");
        assert_eq!(edited.quantity, 30);
        assert_eq!(edited.added_at, added());

        assert!(matches!(
            ledger.edit_product("Riz", riz()),
            Err(CoreError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_reset_keeps_movements_and_purge_clears_everything() {
        let mut ledger = Ledger::empty();
        ledger.add_product(riz(), added()).unwrap();
        ledger
            .add_product(ProductFields::new("Sel", "Épicerie", Money::from_units(100), 0, 1), added())
            .unwrap();
        ledger
            .record_movement(NewMovement::new("Riz", MovementType::Outbound, 2, day(4)))
            .unwrap();

        assert_eq!(ledger.reset_quantities(), 1);
        assert!(ledger.products.iter().all(|p| p.quantity == 0));
        assert_eq!(ledger.products[0].name, "Riz");
        assert_eq!(ledger.movements.len(), 1);

        ledger.purge();
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_history_filter_by_type_product_and_inclusive_range() {
        let mut ledger = Ledger::empty();
        ledger.add_product(riz(), added()).unwrap();
        ledger
            .add_product(ProductFields::new("Sel", "Épicerie", Money::from_units(100), 10, 1), added())
            .unwrap();
        ledger
            .record_movement(NewMovement::new("Riz", MovementType::Outbound, 1, day(5)))
            .unwrap();
        ledger
            .record_movement(NewMovement::new("Sel", MovementType::Outbound, 1, day(6)))
            .unwrap();
        ledger
            .record_movement(NewMovement::new("Riz", MovementType::Inbound, 2, day(7)))
            .unwrap();
        ledger
            .record_movement(NewMovement::new("Riz", MovementType::Outbound, 1, day(8)))
            .unwrap();

        assert_eq!(ledger.history(MovementFilter::new()).count(), 4);

        let riz_out = MovementFilter::new().kind(MovementType::Outbound).product("Riz");
        let ids: Vec<i64> = ledger.history(riz_out).map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 4]);

        let window = MovementFilter::new().between(day(6), day(7));
        let ids: Vec<i64> = ledger.history(window).map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }
}
