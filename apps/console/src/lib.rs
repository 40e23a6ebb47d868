//! # Stockbook Console Library
//!
//! Everything behind the `stockbook` binary. The binary only calls [`run`].
//!
//! ## Module Organization
//! ```text
//! stockbook_console/
//! ├── lib.rs          ◄─── You are here (logging, run)
//! ├── cli.rs          ◄─── clap definitions and dispatch
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState (config + stores)
//! │   ├── config.rs   ◄─── Layered configuration
//! │   └── session.rs  ◄─── Authenticated operator
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── dashboard.rs◄─── Summary and series
//! │   ├── product.rs  ◄─── Catalog
//! │   ├── movement.rs ◄─── Stock in/out and history
//! │   ├── export.rs   ◄─── CSV and workbook snapshots
//! │   └── admin.rs    ◄─── Reset and purge
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Output Channels
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdout  ◄── command result as pretty JSON                              │
//! │  stderr  ◄── tracing logs, and on failure {"code": .., "message": ..}   │
//! │  status  ◄── 0 on success, 1 on any ApiError                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use error::ApiError;

/// Parses arguments, runs the command and prints its outcome.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    info!(version = env!("CARGO_PKG_VERSION"), "Starting stockbook");

    match cli::execute(cli) {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(text) => {
                println!("{}", text);
                ExitCode::SUCCESS
            }
            Err(e) => report(&ApiError::internal(e.to_string())),
        },
        Err(err) => report(&err),
    }
}

fn report(err: &ApiError) -> ExitCode {
    match serde_json::to_string(err) {
        Ok(text) => eprintln!("{}", text),
        Err(_) => eprintln!("{}", err),
    }
    ExitCode::FAILURE
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=stockbook_store=trace` - Trace the store crate only
/// - `--verbose` - Debug for the stockbook crates, ignoring `RUST_LOG`
/// - Default: `warn,stockbook=info`
fn init_tracing(verbose: bool) {
    // Directive targets match by prefix, so `stockbook` covers every crate.
    let filter = if verbose {
        EnvFilter::new("warn,stockbook=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,stockbook=info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
