//! # Commands Module
//!
//! One handler per console command.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── dashboard.rs  ◄─── Summary, rollups, revenue and volume series
//! ├── product.rs    ◄─── List, add, edit
//! ├── movement.rs   ◄─── Record, history
//! ├── export.rs     ◄─── CSV and workbook snapshots
//! └── admin.rs      ◄─── Reset quantities, purge (admin only)
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  $ stockbook --user admin products add --name Riz ...                  │
//! │         │                                                               │
//! │         │ (clap)                                                        │
//! │         ▼                                                               │
//! │  cli::execute                                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  pub fn add_product(                                                    │
//! │      state: &mut AppState,   ◄── opened once at startup                │
//! │      session: &Session,      ◄── authenticated operator                │
//! │      fields: ProductFields,  ◄── from arguments                        │
//! │      added_at: NaiveDateTime,                                           │
//! │  ) -> ApiResult<Product>                                                │
//! │         │                                                               │
//! │         │ (serde_json)                                                  │
//! │         ▼                                                               │
//! │  stdout: { "id": 1, "name": "Riz", ... }                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers never read the clock; the caller passes "now" and "today".

pub mod admin;
pub mod dashboard;
pub mod export;
pub mod movement;
pub mod product;
