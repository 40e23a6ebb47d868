//! # Product Commands
//!
//! Catalog listing and the add/edit forms.
//!
//! ## Product Lifecycle
//! ```text
//! products add ──► Product { id: max+1, added_at: now }
//!      │
//!      ▼
//! products edit <NAME> ──► first product named NAME, every field overwritten
//!      │                   (ID and date added kept)
//!      ▼
//! admin reset-quantities / admin purge
//! ```
//!
//! There is no per-product delete.

use chrono::NaiveDateTime;
use stockbook_core::ledger::ProductFields;
use stockbook_core::Product;
use tracing::{debug, info};

use crate::error::ApiResult;
use crate::state::{AppState, Session};

/// Every product, in table order.
pub fn list_products(state: &AppState) -> &[Product] {
    let products = &state.tables().products;
    debug!(count = products.len(), "list_products command");
    products
}

/// Adds a product to the catalog.
///
/// Names are not required to be unique.
pub fn add_product(
    state: &mut AppState,
    session: &Session,
    fields: ProductFields,
    added_at: NaiveDateTime,
) -> ApiResult<Product> {
    debug!(user = %session.username, name = %fields.name, "add_product command");
    let product = state.ledger.add_product(fields, added_at)?;
    info!(user = %session.username, id = product.id, "Product added");
    Ok(product)
}

/// Overwrites the first product named `current_name`.
///
/// ## Note
/// Movements reference products by name. Renaming a product leaves its
/// earlier movements pointing at the old name.
pub fn edit_product(
    state: &mut AppState,
    session: &Session,
    current_name: &str,
    fields: ProductFields,
) -> ApiResult<Product> {
    debug!(user = %session.username, name = %current_name, "edit_product command");
    let product = state.ledger.edit_product(current_name, fields)?;
    info!(user = %session.username, id = product.id, "Product edited");
    Ok(product)
}
