//! # Stockbook Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        stockbook (binary)                               │
//! │                                                                         │
//! │  main.rs ────► stockbook_console::run()                                 │
//! │                   │                                                     │
//! │                   ├── clap: parse arguments                             │
//! │                   ├── tracing: logs to stderr                           │
//! │                   ├── AppConfig::load → AppState::open                  │
//! │                   ├── Session::login                                    │
//! │                   └── command handler → JSON on stdout                  │
//! │                                                                         │
//! │  data/stock_data.xlsx      data/users.csv                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    // The setup lives in lib.rs so it can be tested
    stockbook_console::run()
}
