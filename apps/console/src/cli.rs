//! # Command Line
//!
//! Argument definitions and dispatch to the command handlers.
//!
//! ```text
//! stockbook [--config FILE] --user NAME --password PW [-v] <COMMAND>
//!
//!   dashboard  [--period day|month|year] [--category NAME]
//!   products   list | add ... | edit <NAME> ...
//!   movements  record ... | history [--type] [--product] [--from] [--to]
//!   revenue    --period P
//!   volume     --period P
//!   export     products --out F | movements --out F | workbook --out F [--with-revenue P]
//!   admin      reset-quantities | purge --confirm
//! ```

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use stockbook_core::ledger::{NewMovement, ProductFields};
use stockbook_core::{Money, MovementType, Period};
use tracing::debug;

use crate::commands::{admin, dashboard, export, movement, product};
use crate::error::{ApiError, ApiResult};
use crate::state::{AppConfig, AppState, Session};

#[derive(Debug, Parser)]
#[command(name = "stockbook")]
#[command(about = "Stock ledger and revenue dashboard", version)]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true, env = "STOCKBOOK_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, env = "STOCKBOOK_USER")]
    pub user: Option<String>,

    #[arg(long, global = true, env = "STOCKBOOK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Summary, alerts, rankings and series
    Dashboard {
        #[arg(long, default_value = "day")]
        period: Period,
        /// Include the detail of one category
        #[arg(long)]
        category: Option<String>,
    },
    Products {
        #[command(subcommand)]
        command: ProductCommand,
    },
    Movements {
        #[command(subcommand)]
        command: MovementCommand,
    },
    /// Revenue per period
    Revenue {
        #[arg(long, default_value = "day")]
        period: Period,
    },
    /// Inbound and outbound quantities per period
    Volume {
        #[arg(long, default_value = "day")]
        period: Period,
    },
    Export {
        #[command(subcommand)]
        command: ExportCommand,
    },
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    List,
    Add {
        #[arg(long)]
        name: String,
        #[command(flatten)]
        fields: ProductFieldArgs,
    },
    /// Overwrite the first product with this name
    Edit {
        name: String,
        #[arg(long)]
        new_name: Option<String>,
        #[command(flatten)]
        fields: ProductFieldArgs,
    },
}

#[derive(Debug, Args)]
pub struct ProductFieldArgs {
    #[arg(long, default_value = "")]
    pub category: String,
    /// Unit price in whole currency units
    #[arg(long)]
    pub price: i64,
    #[arg(long)]
    pub quantity: i64,
    #[arg(long)]
    pub threshold: i64,
}

impl ProductFieldArgs {
    fn into_fields(self, name: String) -> ProductFields {
        ProductFields::new(
            name,
            self.category,
            Money::from_units(self.price),
            self.quantity,
            self.threshold,
        )
    }
}

#[derive(Debug, Subcommand)]
pub enum MovementCommand {
    /// Record a movement dated today
    Record {
        #[arg(long = "type")]
        kind: MovementType,
        #[arg(long)]
        product: String,
        #[arg(long)]
        quantity: i64,
        #[arg(long, default_value = "")]
        comment: String,
    },
    History {
        #[arg(long = "type")]
        kind: Option<MovementType>,
        #[arg(long)]
        product: Option<String>,
        /// First day, inclusive (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last day, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ExportCommand {
    Products {
        #[arg(long)]
        out: PathBuf,
    },
    Movements {
        #[arg(long)]
        out: PathBuf,
    },
    Workbook {
        #[arg(long)]
        out: PathBuf,
        /// Add a revenue sheet at this granularity
        #[arg(long)]
        with_revenue: Option<Period>,
    },
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Set every quantity to zero, keeping the history
    ResetQuantities,
    /// Delete every product and movement
    Purge {
        #[arg(long, default_value_t = false)]
        confirm: bool,
    },
}

/// Opens the stores, authenticates, and runs one command.
pub fn execute(cli: Cli) -> ApiResult<Value> {
    let config = AppConfig::load(cli.config)?;
    let mut state = AppState::open(config)?;
    let session = Session::login(&state.users, cli.user.as_deref(), cli.password.as_deref())?;
    debug!(user = %session.username, role = %session.role, "Session opened");

    let now = Local::now().naive_local();
    dispatch(&mut state, &session, cli.command, now.date(), now)
}

fn dispatch(
    state: &mut AppState,
    session: &Session,
    command: Command,
    today: NaiveDate,
    now: chrono::NaiveDateTime,
) -> ApiResult<Value> {
    match command {
        Command::Dashboard { period, category } => {
            to_json(dashboard::dashboard(state, period, category.as_deref())?)
        }
        Command::Revenue { period } => to_json(dashboard::revenue(state, period)),
        Command::Volume { period } => to_json(dashboard::volume(state, period)),

        Command::Products { command } => match command {
            ProductCommand::List => to_json(product::list_products(state)),
            ProductCommand::Add { name, fields } => to_json(product::add_product(
                state,
                session,
                fields.into_fields(name),
                now,
            )?),
            ProductCommand::Edit {
                name,
                new_name,
                fields,
            } => {
                let fields = fields.into_fields(new_name.unwrap_or_else(|| name.clone()));
                to_json(product::edit_product(state, session, &name, fields)?)
            }
        },

        Command::Movements { command } => match command {
            MovementCommand::Record {
                kind,
                product,
                quantity,
                comment,
            } => {
                let new = NewMovement::new(product, kind, quantity, today).with_comment(comment);
                to_json(movement::record_movement(state, session, new)?)
            }
            MovementCommand::History {
                kind,
                product,
                from,
                to,
            } => {
                let query = movement::HistoryQuery {
                    kind,
                    product,
                    from,
                    to,
                };
                to_json(movement::movement_history(state, query, today)?)
            }
        },

        Command::Export { command } => match command {
            ExportCommand::Products { out } => to_json(export::export_products(state, &out)?),
            ExportCommand::Movements { out } => to_json(export::export_movements(state, &out)?),
            ExportCommand::Workbook { out, with_revenue } => {
                to_json(export::export_workbook(state, &out, with_revenue)?)
            }
        },

        Command::Admin { command } => match command {
            AdminCommand::ResetQuantities => to_json(admin::reset_quantities(state, session)?),
            AdminCommand::Purge { confirm } => to_json(admin::purge(state, session, confirm)?),
        },
    }
}

fn to_json(value: impl Serialize) -> ApiResult<Value> {
    serde_json::to_value(value).map_err(|e| ApiError::internal(e.to_string()))
}
