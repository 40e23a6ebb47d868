//! # Movement Commands
//!
//! Recording stock-in/stock-out and browsing the history.
//!
//! ## Recording a Sale
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  movements record --type sortie --product Riz --quantity 3      │
//! │           │                                                     │
//! │           ▼                                                     │
//! │  record_movement() ← THIS MODULE                                │
//! │           │                                                     │
//! │           ▼                                                     │
//! │  LedgerStore::record_movement                                   │
//! │   ├── unknown product  ──► NOT_FOUND                            │
//! │   ├── stock < quantity ──► INSUFFICIENT_STOCK (nothing saved)   │
//! │   └── ok ──► movement + new balance written to the workbook     │
//! │           │                                                     │
//! │           ▼                                                     │
//! │  Returns: MovementReceipt { movement, remaining: 7 }            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Days, NaiveDate};
use serde::Serialize;
use stockbook_core::ledger::{MovementFilter, NewMovement};
use stockbook_core::{Movement, MovementType};
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::state::{AppState, Session};

/// Result of a recorded movement.
#[derive(Debug, Clone, Serialize)]
pub struct MovementReceipt {
    pub movement: Movement,
    /// Quantity on hand after the movement.
    pub remaining: i64,
}

/// Records a movement dated by the caller.
pub fn record_movement(
    state: &mut AppState,
    session: &Session,
    movement: NewMovement,
) -> ApiResult<MovementReceipt> {
    debug!(
        user = %session.username,
        product = %movement.product,
        kind = %movement.kind,
        quantity = movement.quantity,
        "record_movement command"
    );

    let movement = state.ledger.record_movement(movement)?;
    let remaining = state
        .tables()
        .find_product(&movement.product)
        .map_or(0, |p| p.quantity);

    info!(user = %session.username, id = movement.id, remaining, "Movement recorded");
    Ok(MovementReceipt {
        movement,
        remaining,
    })
}

/// History criteria as given on the command line. Open date bounds are
/// filled in by [`HistoryQuery::resolve`].
#[derive(Debug, Clone, Default)]
pub struct HistoryQuery {
    pub kind: Option<MovementType>,
    pub product: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl HistoryQuery {
    /// Defaults the window to the last `history_days` days up to `today`.
    pub fn resolve(self, today: NaiveDate, history_days: u32) -> ApiResult<MovementFilter> {
        let to = self.to.unwrap_or(today);
        let from = match self.from {
            Some(from) => from,
            None => to
                .checked_sub_days(Days::new(u64::from(history_days)))
                .unwrap_or(NaiveDate::MIN),
        };

        if from > to {
            return Err(ApiError::validation(format!(
                "Start date {} is after end date {}",
                from, to
            )));
        }

        Ok(MovementFilter {
            kind: self.kind,
            product: self.product,
            from: Some(from),
            to: Some(to),
        })
    }
}

/// Movements matching the query, in recording order.
pub fn movement_history(
    state: &AppState,
    query: HistoryQuery,
    today: NaiveDate,
) -> ApiResult<Vec<&Movement>> {
    let filter = query.resolve(today, state.config.display.history_days)?;
    debug!(?filter, "movement_history command");
    Ok(state.tables().history(filter).collect())
}
