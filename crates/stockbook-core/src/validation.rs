//! # Validation Module
//!
//! Input validation for ledger mutations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Console (clap)                                               │
//! │  ├── Type checks (integers, dates, enum labels)                        │
//! │  └── Immediate operator feedback                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields, lengths                                          │
//! │  └── Bounds (prices ≥ 0, movement quantities > 0, all ≤ MAX_AMOUNT)    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Ledger                                                       │
//! │  └── Stock sufficiency for outbound movements                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_AMOUNT;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_CATEGORY_LEN: usize = 100;
const MAX_COMMENT_LEN: usize = 500;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 200 characters
///
/// ```rust
/// use stockbook_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Riz parfumé 25kg").is_ok());
/// assert!(validate_product_name("  ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a category. Empty is allowed (uncategorized product).
pub fn validate_category(category: &str) -> ValidationResult<()> {
    if category.trim().chars().count() > MAX_CATEGORY_LEN {
        return Err(ValidationError::TooLong {
            field: "category".to_string(),
            max: MAX_CATEGORY_LEN,
        });
    }

    Ok(())
}

/// Validates a movement comment.
pub fn validate_comment(comment: &str) -> ValidationResult<()> {
    if comment.chars().count() > MAX_COMMENT_LEN {
        return Err(ValidationError::TooLong {
            field: "comment".to_string(),
            max: MAX_COMMENT_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price. Zero is allowed (free items).
///
/// ```rust
/// use stockbook_core::money::Money;
/// use stockbook_core::validation::validate_unit_price;
///
/// assert!(validate_unit_price(Money::from_units(500)).is_ok());
/// assert!(validate_unit_price(Money::zero()).is_ok());
/// assert!(validate_unit_price(Money::from_units(-1)).is_err());
/// ```
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    check_ceiling("price", price.units(), 0)
}

/// Validates a quantity on hand. Zero is allowed.
pub fn validate_stock_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "quantity".to_string(),
        });
    }

    check_ceiling("quantity", qty, 0)
}

/// Validates an alert threshold. Zero is allowed.
pub fn validate_alert_threshold(threshold: i64) -> ValidationResult<()> {
    if threshold < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "alert threshold".to_string(),
        });
    }

    check_ceiling("alert threshold", threshold, 0)
}

/// Validates the quantity of a movement.
///
/// ## User Workflow
/// ```text
/// Operator enters quantity: 0
///      │
///      ▼
/// validate_movement_quantity(0) ← THIS FUNCTION
///      │
///      └── qty <= 0? → Error: "quantity must be positive"
/// ```
pub fn validate_movement_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    check_ceiling("quantity", qty, 1)
}

fn check_ceiling(field: &str, value: i64, min: i64) -> ValidationResult<()> {
    if value > MAX_AMOUNT {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min,
            max: MAX_AMOUNT,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
