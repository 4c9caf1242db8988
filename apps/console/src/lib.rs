//! # Rental Console Library
//!
//! Interactive front end for the game rental store.
//!
//! ## Module Organization
//! ```text
//! rental_console/
//! ├── lib.rs          ◄─── You are here (tracing setup, module exports)
//! ├── cli.rs          ◄─── <dbname> <port> <user>
//! ├── config.rs       ◄─── Environment configuration
//! ├── console.rs      ◄─── Prompt / choice reading over BufRead + Write
//! ├── menu.rs         ◄─── Start menu and user menu loops
//! ├── guard.rs        ◄─── Session + authorization guard
//! ├── auth.rs         ◄─── Argon2 password hashing
//! ├── formatting.rs   ◄─── prettytable rendering of Tabular rows
//! ├── commands/       ◄─── One handler per menu entry
//! └── error.rs        ◄─── ApiError shown at the console
//! ```

pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod formatting;
pub mod guard;
pub mod menu;

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn,rental=info,sqlx=warn";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages, including every statement
/// - `RUST_LOG=rental_db=trace` - Trace the database layer only
/// - Default: warnings, plus info from the rental crates
///
/// Logs go to stderr so they never interleave with menu output.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
