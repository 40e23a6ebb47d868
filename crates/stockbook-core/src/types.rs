//! # Domain Types
//!
//! Core domain types used throughout Stockbook.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Movement     │   │  MovementType   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  Inbound        │       │
//! │  │  name  ◄────────┼───┼─ product (name) │   │   "Entrée"      │       │
//! │  │  category       │   │  kind           │   │  Outbound       │       │
//! │  │  unit_price     │   │  quantity       │   │   "Sortie"      │       │
//! │  │  quantity       │   │  date           │   └─────────────────┘       │
//! │  │  alert_threshold│   │  comment        │                              │
//! │  │  added_at       │   └─────────────────┘   ┌─────────────────┐       │
//! │  └─────────────────┘                         │ Period/PeriodKey│       │
//! │                                              │  Day/Month/Year │       │
//! │  ┌─────────────────┐                         └─────────────────┘       │
//! │  │      Role       │                                                    │
//! │  │  Admin | User   │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Name-Keyed Relationship
//! Movements point at products by **name**, not by ID. Renaming a product
//! therefore detaches its historical movements. Lookups go through
//! [`crate::ledger::Ledger::find_product`] so the join key lives in one place.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A catalog entry (one row of the `Produits` sheet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Row identifier, max+1 on insert.
    pub id: i64,

    /// Display name; also the key movements use to reference the product.
    pub name: String,

    /// Free-form category used for rollups.
    pub category: String,

    /// Price of one unit.
    pub unit_price: Money,

    /// Quantity on hand. Never negative.
    pub quantity: i64,

    /// Low-stock alert fires when `quantity <= alert_threshold`.
    pub alert_threshold: i64,

    /// When the product was added to the catalog.
    pub added_at: NaiveDateTime,
}

impl Product {
    /// Checks if the product has fallen to or below its alert threshold.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.alert_threshold
    }

    /// Value of the stock on hand (quantity × unit price).
    #[inline]
    pub fn stock_value(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Movement Type
// =============================================================================

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MovementType {
    /// Stock-in: increases the quantity on hand.
    #[serde(rename = "Entrée")]
    Inbound,

    /// Stock-out: decreases the quantity on hand and produces revenue.
    #[serde(rename = "Sortie")]
    Outbound,
}

impl MovementType {
    /// The label stored in the `Type` column.
    pub const fn label(&self) -> &'static str {
        match self {
            MovementType::Inbound => "Entrée",
            MovementType::Outbound => "Sortie",
        }
    }
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MovementType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "entrée" | "entree" | "in" | "inbound" => Ok(MovementType::Inbound),
            "sortie" | "out" | "outbound" => Ok(MovementType::Outbound),
            _ => Err(ValidationError::NotAllowed {
                field: "type".to_string(),
                allowed: vec!["Entrée".to_string(), "Sortie".to_string()],
            }),
        }
    }
}

// =============================================================================
// Movement
// =============================================================================

/// A ledger entry (one row of the `Mouvements` sheet). Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    /// Row identifier, max+1 on insert.
    pub id: i64,

    /// Day the movement happened.
    pub date: NaiveDate,

    /// Name of the product this movement applies to.
    pub product: String,

    /// Inbound or outbound.
    #[serde(rename = "type")]
    pub kind: MovementType,

    /// Units moved. Always positive.
    pub quantity: i64,

    /// Free-text note.
    pub comment: String,
}

impl Movement {
    #[inline]
    pub fn is_outbound(&self) -> bool {
        self.kind == MovementType::Outbound
    }
}

// =============================================================================
// Period
// =============================================================================

/// Granularity of revenue and volume series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    #[default]
    Day,
    Month,
    Year,
}

impl Period {
    /// Truncates a date to this period's bucket.
    ///
    /// ```text
    /// 2024-03-17 ── Day   ──► 2024-03-17
    ///            ── Month ──► 2024-03-01
    ///            ── Year  ──► 2024
    /// ```
    pub fn bucket(&self, date: NaiveDate) -> PeriodKey {
        match self {
            Period::Day => PeriodKey::Day(date),
            Period::Month => PeriodKey::Month(date.with_day(1).unwrap_or(date)),
            Period::Year => PeriodKey::Year(date.year()),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Day => write!(f, "day"),
            Period::Month => write!(f, "month"),
            Period::Year => write!(f, "year"),
        }
    }
}

impl FromStr for Period {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "jour" => Ok(Period::Day),
            "month" | "mois" => Ok(Period::Month),
            "year" | "année" | "annee" => Ok(Period::Year),
            _ => Err(ValidationError::NotAllowed {
                field: "period".to_string(),
                allowed: vec!["day".to_string(), "month".to_string(), "year".to_string()],
            }),
        }
    }
}

/// A period bucket: the aggregation key of revenue and volume series.
///
/// Ordering is chronological within one granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PeriodKey {
    Day(NaiveDate),
    /// Always the first day of the month.
    Month(NaiveDate),
    Year(i32),
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodKey::Day(d) | PeriodKey::Month(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            PeriodKey::Year(y) => write!(f, "{}", y),
        }
    }
}

impl Serialize for PeriodKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// =============================================================================
// Role
// =============================================================================

/// Role attached to an authenticated account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May reset quantities and purge the ledger.
    Admin,
    /// Day-to-day operator.
    User,
}

impl Role {
    #[inline]
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::User => write!(f, "user"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
