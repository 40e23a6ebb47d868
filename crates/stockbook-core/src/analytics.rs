//! # Analytics
//!
//! Pure aggregations behind the dashboard. Nothing here mutates the ledger.
//!
//! ## Dashboard Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Products ──┬──► low_stock()          qty <= threshold, table order   │
//! │              ├──► category_rollup()    Σ qty per category, A→Z          │
//! │              ├──► top_by_quantity()    qty desc, stable, first N       │
//! │              └──► category_detail()    one category's rows and value   │
//! │                                                                         │
//! │   Movements ─┬──► compute_revenue()    Sortie × first-match price      │
//! │   + Products │                         Σ per period bucket             │
//! │              └──► movement_volume()    Σ qty per (bucket, type)        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Unmatched Products
//! A movement whose product name matches no catalog row is priced at
//! [`UNMATCHED_PRODUCT_PRICE`]. It contributes nothing to revenue but is
//! still counted in volume series.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::money::Money;
use crate::types::{Movement, MovementType, Period, PeriodKey, Product};

/// Price used for a movement whose product name matches no catalog row.
pub const UNMATCHED_PRODUCT_PRICE: Money = Money::zero();

// =============================================================================
// Output Types
// =============================================================================

/// One bar of the "stock by category" chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub quantity: i64,
}

/// One point of the revenue series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RevenuePoint {
    pub period: PeriodKey,
    pub revenue: Money,
}

/// One point of the movement volume series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VolumePoint {
    pub period: PeriodKey,
    #[serde(rename = "type")]
    pub kind: MovementType,
    pub quantity: i64,
}

/// Headline figures of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub product_count: usize,
    pub total_stock: i64,
    pub total_revenue: Money,
}

/// Detail view of a single category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub category: String,
    pub products: Vec<Product>,
    pub product_count: usize,
    pub total_quantity: i64,
    pub stock_value: Money,
}

// =============================================================================
// Product Aggregations
// =============================================================================

/// Products at or below their alert threshold, in table order.
pub fn low_stock(products: &[Product]) -> Vec<&Product> {
    products.iter().filter(|p| p.is_low_stock()).collect()
}

/// Total quantity on hand per category, ordered by category ascending.
pub fn category_rollup(products: &[Product]) -> Vec<CategoryTotal> {
    let mut totals: BTreeMap<&str, i64> = BTreeMap::new();
    for product in products {
        let total = totals.entry(product.category.as_str()).or_insert(0);
        *total = total.saturating_add(product.quantity);
    }

    totals
        .into_iter()
        .map(|(category, quantity)| CategoryTotal {
            category: category.to_string(),
            quantity,
        })
        .collect()
}

/// Distinct categories in first-seen order.
pub fn categories(products: &[Product]) -> Vec<&str> {
    let mut seen = HashSet::new();
    products
        .iter()
        .map(|p| p.category.as_str())
        .filter(|c| seen.insert(*c))
        .collect()
}

/// The `n` products with the most stock.
///
/// Ties keep their table order (the sort is stable).
pub fn top_by_quantity(products: &[Product], n: usize) -> Vec<&Product> {
    let mut ranked: Vec<&Product> = products.iter().collect();
    ranked.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    ranked.truncate(n);
    ranked
}

/// Products of one category with their count, quantity and stock value.
pub fn category_detail(products: &[Product], category: &str) -> CategorySummary {
    let rows: Vec<Product> = products
        .iter()
        .filter(|p| p.category == category)
        .cloned()
        .collect();

    CategorySummary {
        category: category.to_string(),
        product_count: rows.len(),
        total_quantity: sum_quantities(rows.iter().map(|p| p.quantity)),
        stock_value: rows.iter().map(Product::stock_value).sum(),
        products: rows,
    }
}

// =============================================================================
// Revenue
// =============================================================================

/// Unit price of the first product named `name`, or [`UNMATCHED_PRODUCT_PRICE`].
pub fn resolve_unit_price(products: &[Product], name: &str) -> Money {
    products
        .iter()
        .find(|p| p.name == name)
        .map_or(UNMATCHED_PRODUCT_PRICE, |p| p.unit_price)
}

/// Revenue of a single movement. Inbound movements earn nothing.
fn movement_revenue(movement: &Movement, products: &[Product]) -> Money {
    if !movement.is_outbound() {
        return Money::zero();
    }
    resolve_unit_price(products, &movement.product).multiply_quantity(movement.quantity)
}

/// Outbound revenue bucketed by `period`, ascending by period.
///
/// Buckets are keyed on the movement's own date. Only buckets that hold at
/// least one outbound movement appear.
///
/// ```text
/// Sortie Riz ×3 @ 2024-01-10 ─┐
/// Sortie Riz ×2 @ 2024-01-10 ─┼─► (2024-01-10, 2500)
/// Entrée Riz ×9 @ 2024-01-10   (ignored)
/// ```
pub fn compute_revenue(movements: &[Movement], products: &[Product], period: Period) -> Vec<RevenuePoint> {
    let mut buckets: BTreeMap<PeriodKey, Money> = BTreeMap::new();
    for movement in movements.iter().filter(|m| m.is_outbound()) {
        *buckets.entry(period.bucket(movement.date)).or_default() += movement_revenue(movement, products);
    }

    buckets
        .into_iter()
        .map(|(period, revenue)| RevenuePoint { period, revenue })
        .collect()
}

/// Total revenue across all outbound movements.
pub fn total_revenue(movements: &[Movement], products: &[Product]) -> Money {
    movements.iter().map(|m| movement_revenue(m, products)).sum()
}

// =============================================================================
// Volume & Summary
// =============================================================================

/// Quantity moved per (period bucket, type), ascending by period then type.
pub fn movement_volume(movements: &[Movement], period: Period) -> Vec<VolumePoint> {
    let mut buckets: BTreeMap<(PeriodKey, MovementType), i64> = BTreeMap::new();
    for movement in movements {
        let total = buckets
            .entry((period.bucket(movement.date), movement.kind))
            .or_insert(0);
        *total = total.saturating_add(movement.quantity);
    }

    buckets
        .into_iter()
        .map(|((period, kind), quantity)| VolumePoint {
            period,
            kind,
            quantity,
        })
        .collect()
}

/// Product count, total stock and total revenue.
pub fn summarize(products: &[Product], movements: &[Movement]) -> DashboardSummary {
    DashboardSummary {
        product_count: products.len(),
        total_stock: sum_quantities(products.iter().map(|p| p.quantity)),
        total_revenue: total_revenue(movements, products),
    }
}

/// Quantities saturate like [`Money`] does.
fn sum_quantities(quantities: impl Iterator<Item = i64>) -> i64 {
    quantities.fold(0, i64::saturating_add)
}

// =============================================================================
// Unit Tests
// =============================================================================
