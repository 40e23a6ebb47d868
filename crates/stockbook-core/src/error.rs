//! # Error Types
//!
//! Domain-specific error types for stockbook-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockbook-core errors (this file)                                     │
//! │  ├── CoreError        - Ledger rule violations                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  stockbook-store errors (separate crate)                               │
//! │  └── StoreError       - Workbook / credential file failures            │
//! │                                                                         │
//! │  console errors (in app)                                               │
//! │  └── ApiError         - What the operator sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → ApiError → Operator  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Ledger rule violations.
///
/// Every variant is raised *before* the ledger is touched, so a returned
/// error always means the tables are unchanged.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product in the catalog carries this name.
    ///
    /// ## When This Occurs
    /// - Recording a movement against a name that is not in `Produits`
    /// - Editing a product that does not exist
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Outbound movement larger than the quantity on hand.
    ///
    /// ## User Workflow
    /// ```text
    /// Record Sortie (qty: 20)
    ///      │
    ///      ▼
    /// Check stock: available=7
    ///      │
    ///      ▼
    /// InsufficientStock { product: "Riz", available: 7, requested: 20 }
    ///      │
    ///      ▼
    /// Operator sees: "Insufficient stock for Riz: only 7 left, requested 20"
    /// ```
    #[error("Insufficient stock for {product}: only {available} left, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or more.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_stock_message_names_product_and_remaining() {
        let err = CoreError::InsufficientStock {
            product: "Riz".to_string(),
            available: 7,
            requested: 20,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Riz: only 7 left, requested 20"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        };
        assert_eq!(err.to_string(), "price must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
