//! # Admin Commands
//!
//! Bulk operations reserved to the `admin` role.
//!
//! ```text
//! ┌──────────────────┬───────────────────────────┬──────────────────────────┐
//! │ Command          │ Products                  │ Movements                │
//! ├──────────────────┼───────────────────────────┼──────────────────────────┤
//! │ reset-quantities │ kept, quantity set to 0   │ kept                     │
//! │ purge --confirm  │ all removed               │ all removed              │
//! └──────────────────┴───────────────────────────┴──────────────────────────┘
//! ```
//!
//! Neither operation can be undone.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::state::{AppState, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResetReport {
    /// Products whose quantity was not already zero.
    pub products_reset: usize,
    pub movements_kept: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PurgeReport {
    pub products_removed: usize,
    pub movements_removed: usize,
}

/// Sets every product's quantity to zero.
pub fn reset_quantities(state: &mut AppState, session: &Session) -> ApiResult<ResetReport> {
    debug!(user = %session.username, "reset_quantities command");
    session.require_admin("reset quantities")?;

    let products_reset = state.ledger.reset_quantities()?;
    info!(user = %session.username, products_reset, "Quantities reset");
    Ok(ResetReport {
        products_reset,
        movements_kept: state.tables().movements.len(),
    })
}

/// Deletes every product and movement. Requires `confirm`.
pub fn purge(state: &mut AppState, session: &Session, confirm: bool) -> ApiResult<PurgeReport> {
    debug!(user = %session.username, confirm, "purge command");
    session.require_admin("purge the ledger")?;
    if !confirm {
        return Err(ApiError::validation(
            "Purging deletes every product and movement; pass --confirm to proceed",
        ));
    }

    let report = PurgeReport {
        products_removed: state.tables().products.len(),
        movements_removed: state.tables().movements.len(),
    };
    state.ledger.purge_all()?;
    info!(
        user = %session.username,
        products = report.products_removed,
        movements = report.movements_removed,
        "Ledger purged"
    );
    Ok(report)
}
