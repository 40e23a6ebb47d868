//! # Dashboard Commands
//!
//! The data behind the dashboard page, and the raw revenue and volume series.
//!
//! ## Dashboard Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Products: 12        Total stock: 340        Revenue: 125 500 FCFA      │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  Low stock alerts          │  Stock by category                         │
//! │  • Huile (4 / 5)           │  ████████ Céréales                         │
//! │  • Savon (5 / 5)           │  ███ Hygiène                               │
//! ├────────────────────────────┼────────────────────────────────────────────┤
//! │  Top 5 in stock            │  Revenue per day/month/year                │
//! ├────────────────────────────┴────────────────────────────────────────────┤
//! │  Movements in/out per period                                            │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  Category detail (optional)                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every section is a serialized data series; drawing is left to the reader.

use serde::Serialize;
use stockbook_core::analytics::{
    categories, category_detail, category_rollup, compute_revenue, low_stock, movement_volume,
    summarize, top_by_quantity, CategorySummary, CategoryTotal, DashboardSummary, RevenuePoint,
    VolumePoint,
};
use stockbook_core::{Period, Product};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Everything the dashboard shows.
#[derive(Debug, Serialize)]
pub struct DashboardView<'a> {
    pub summary: DashboardSummary,
    pub currency: &'a str,
    pub period: Period,
    pub low_stock: Vec<&'a Product>,
    pub category_names: Vec<&'a str>,
    pub stock_by_category: Vec<CategoryTotal>,
    pub top_products: Vec<&'a Product>,
    pub revenue: Vec<RevenuePoint>,
    pub volume: Vec<VolumePoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_detail: Option<CategorySummary>,
}

/// Builds the dashboard for `period`, with the detail of `category` if given.
pub fn dashboard<'a>(
    state: &'a AppState,
    period: Period,
    category: Option<&str>,
) -> ApiResult<DashboardView<'a>> {
    let ledger = state.tables();
    let display = &state.config.display;
    debug!(%period, ?category, "dashboard command");

    let category_names = categories(&ledger.products);
    let category_detail = match category {
        Some(name) if category_names.iter().any(|c| *c == name) => {
            Some(category_detail(&ledger.products, name))
        }
        Some(name) => return Err(ApiError::not_found("Category", name)),
        None => None,
    };

    Ok(DashboardView {
        summary: summarize(&ledger.products, &ledger.movements),
        currency: &display.currency_symbol,
        period,
        low_stock: low_stock(&ledger.products),
        category_names,
        stock_by_category: category_rollup(&ledger.products),
        top_products: top_by_quantity(&ledger.products, display.top_n),
        revenue: compute_revenue(&ledger.movements, &ledger.products, period),
        volume: movement_volume(&ledger.movements, period),
        category_detail,
    })
}

/// Revenue series alone.
pub fn revenue(state: &AppState, period: Period) -> Vec<RevenuePoint> {
    let ledger = state.tables();
    compute_revenue(&ledger.movements, &ledger.products, period)
}

/// Movement volume series alone.
pub fn volume(state: &AppState, period: Period) -> Vec<VolumePoint> {
    movement_volume(&state.tables().movements, period)
}
