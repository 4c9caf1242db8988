//! # Rental Console Entry Point
//!
//! ## Startup Sequence
//! 1. Parse `<dbname> <port> <user>` (wrong arity prints usage, exits non-zero)
//! 2. Initialize tracing (stderr)
//! 3. Load environment configuration
//! 4. Connect to the database & run migrations
//! 5. Run the menu loop on locked stdin/stdout
//! 6. Close the pool

use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use rental_console::cli::Args;
use rental_console::config::RentalConfig;
use rental_console::console::Console;
use rental_console::{init_tracing, menu};
use rental_db::Database;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_tracing();

    let config = RentalConfig::load(&args).context("Invalid configuration")?;
    let db_config = config.db_config();
    info!(target_db = %db_config.describe(), "Starting rental console");

    let db = Database::new(db_config)
        .await
        .context("Could not connect to the database")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());

    let session = menu::run(&db, &mut console).await;

    let mut out = console.into_output();
    write!(out, "Disconnecting from database...")?;
    db.close().await;
    writeln!(out, "Done\n\nBye !")?;

    session.context("Console I/O failed")?;
    Ok(())
}
