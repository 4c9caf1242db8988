//! # Database Migrations
//!
//! Embedded SQL migrations for the rental store schema.
//!
//! ## How Migrations Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Migration Process                                  │
//! │                                                                         │
//! │  Startup                                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Check _sqlx_migrations table (create if missing)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Compare embedded migrations vs applied                                │
//! │       │                                                                 │
//! │       └── 0001_initial_schema.sql  users, catalog, rental_order,       │
//! │                                    games_in_order, tracking_info       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Run pending migrations in order, record each one                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Adding New Migrations
//!
//! 1. Add the file to BOTH `migrations/sqlite/` and `migrations/postgres/`
//! 2. Name format: `NNNN_description.sql`
//! 3. **NEVER** modify existing migrations - always add new ones

use sqlx::migrate::Migrator;
use tracing::info;

use crate::error::DbResult;
use crate::pool::DbPool;

/// Embedded migrations for the selected backend.
#[cfg(not(feature = "postgres"))]
static MIGRATOR: Migrator = sqlx::migrate!("../../migrations/sqlite");

#[cfg(feature = "postgres")]
static MIGRATOR: Migrator = sqlx::migrate!("../../migrations/postgres");

/// Runs all pending database migrations.
///
/// Idempotent; each migration runs in its own transaction.
pub async fn run_migrations(pool: &DbPool) -> DbResult<()> {
    info!(embedded = MIGRATOR.migrations.len(), "Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Returns `(total_migrations, applied_migrations)`.
///
/// Fails when the migrations table cannot be read, e.g. before the first
/// `run_migrations`.
pub async fn migration_status(pool: &DbPool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success")
            .fetch_one(pool)
            .await?;

    Ok((total, usize::try_from(applied).unwrap_or_default()))
}
