//! # stockbook-core: Pure Business Logic for Stockbook
//!
//! This crate is the **heart** of Stockbook. It contains the inventory
//! ledger and every aggregation behind the dashboard as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockbook Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                Presentation (apps/console)                      │   │
//! │  │    login ──► dashboard ──► products ──► movements ──► export    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stockbook-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌───────────┐  ┌────────────┐   │   │
//! │  │   │  types   │  │  ledger  │  │ analytics │  │ credential │   │   │
//! │  │   │ Product  │  │ balance  │  │ revenue   │  │ sha-256    │   │   │
//! │  │   │ Movement │  │ updates  │  │ low stock │  │ role check │   │   │
//! │  │   └──────────┘  └──────────┘  └───────────┘  └────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO CLOCK • PURE FUNCTIONS                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               stockbook-store (Persistence Layer)               │   │
//! │  │          stock_data.xlsx (Produits + Mouvements), users.csv     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Movement, Period, Role)
//! - [`money`] - Money type with integer arithmetic
//! - [`ledger`] - The in-memory Products + Movements tables and their rules
//! - [`analytics`] - Low stock, rollups, revenue and volume series
//! - [`credential`] - Password digests and credential lookup
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use stockbook_core::analytics::compute_revenue;
//! use stockbook_core::ledger::{Ledger, NewMovement, ProductFields};
//! use stockbook_core::{Money, MovementType, Period};
//!
//! let added = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let mut ledger = Ledger::empty();
//! ledger
//!     .add_product(ProductFields::new("Riz", "Céréales", Money::from_units(500), 10, 5), added)
//!     .unwrap();
//!
//! let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
//! ledger
//!     .record_movement(NewMovement::new("Riz", MovementType::Outbound, 3, day))
//!     .unwrap();
//!
//! let revenue = compute_revenue(&ledger.movements, &ledger.products, Period::Day);
//! assert_eq!(revenue[0].revenue, Money::from_units(1500));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod analytics;
pub mod credential;
pub mod error;
pub mod ledger;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::Ledger;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Sheet holding the product catalog.
pub const PRODUCTS_SHEET: &str = "Produits";

/// Sheet holding the movement history.
pub const MOVEMENTS_SHEET: &str = "Mouvements";

/// Sheet holding the revenue table in exported reports.
pub const REVENUE_SHEET: &str = "Recettes";

/// Column headers of the `Produits` sheet, in storage order.
pub const PRODUCT_COLUMNS: [&str; 7] = [
    "ID",
    "Nom Produit",
    "Catégorie",
    "Prix Unitaire",
    "Quantité",
    "Seuil Alerte",
    "Date Ajout",
];

/// Column headers of the `Mouvements` sheet, in storage order.
pub const MOVEMENT_COLUMNS: [&str; 6] = ["ID", "Date", "Produit", "Type", "Quantité", "Commentaire"];

/// Column headers of the `Recettes` sheet.
pub const REVENUE_COLUMNS: [&str; 2] = ["Période", "Recettes"];

/// Largest quantity, threshold or unit price the ledger accepts.
///
/// Spreadsheet number cells are doubles, which hold integers exactly only up
/// to 2^53 - 1.
pub const MAX_AMOUNT: i64 = 9_007_199_254_740_991;

/// Number of products shown in the "top products in stock" chart.
pub const DEFAULT_TOP_N: usize = 5;

/// Format of the `Date Ajout` column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format of the movement `Date` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
