//! # Database Pool Management
//!
//! Connection pool creation and configuration.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Connection Pool                           │
//! │                                                                         │
//! │  rental-console <dbname> <port> <user>                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(dbname, port, user) ← plus host / password from env     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await ← Create pool + run migrations            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │            Pool<Backend>                │                           │
//! │  │   SQLite   (default)  <data_dir>/<db>.db│                           │
//! │  │   Postgres (feature)  host:port/db      │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.users() / db.catalog() / db.orders() / db.tracking()               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::time::Duration;

use sqlx::pool::PoolOptions;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::catalog::CatalogRepository;
use crate::repository::order::OrderRepository;
use crate::repository::tracking::TrackingRepository;
use crate::repository::user::UserRepository;

// =============================================================================
// Backend Selection
// =============================================================================

/// The database engine this build talks to.
#[cfg(not(feature = "postgres"))]
pub type Backend = sqlx::Sqlite;

/// The database engine this build talks to.
#[cfg(feature = "postgres")]
pub type Backend = sqlx::Postgres;

/// Connection pool for [`Backend`].
pub type DbPool = sqlx::Pool<Backend>;

/// A single connection, as borrowed from an open transaction (`&mut *tx`).
pub type DbConnection = <Backend as sqlx::Database>::Connection;

/// Row type returned by [`Backend`].
pub type DbRow = <Backend as sqlx::Database>::Row;

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust
/// use rental_db::DbConfig;
///
/// let config = DbConfig::new("rentals", 5432, "store")
///     .host("db.internal")
///     .max_connections(2);
/// assert_eq!(config.port, 5432);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Database name. The SQLite build opens `<data_dir>/<database>.db`.
    pub database: String,

    /// Server host (PostgreSQL only).
    pub host: String,

    /// Server port (PostgreSQL only).
    pub port: u16,

    /// Role used to connect (PostgreSQL only).
    pub username: String,

    /// Password for `username`. Empty by default.
    pub password: String,

    /// Directory holding SQLite database files.
    pub data_dir: PathBuf,

    /// Use a private in-memory SQLite database.
    pub in_memory: bool,

    /// Maximum number of connections in the pool.
    /// Default: 1 (one interactive session)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    pub min_connections: u32,

    /// Connection timeout duration.
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    pub idle_timeout: Duration,

    /// Whether to run migrations on connect.
    pub run_migrations: bool,
}

impl DbConfig {
    /// Creates a configuration from the three process arguments.
    pub fn new(database: impl Into<String>, port: u16, username: impl Into<String>) -> Self {
        DbConfig {
            database: database.into(),
            host: "localhost".to_string(),
            port,
            username: username.into(),
            password: String::new(),
            data_dir: PathBuf::from("."),
            in_memory: false,
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max.max(1);
        self.min_connections = self.min_connections.min(self.max_connections);
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Path of the SQLite database file.
    pub fn sqlite_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.db", self.database))
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let db = Database::new(DbConfig::in_memory()).await?;
    /// // Isolated and already migrated
    /// ```
    pub fn in_memory() -> Self {
        DbConfig {
            in_memory: true,
            max_connections: 1, // In-memory requires single connection
            connect_timeout: Duration::from_secs(5),
            ..DbConfig::new("memory", 0, "test")
        }
    }

    /// Where this configuration points, without the password.
    pub fn describe(&self) -> String {
        if cfg!(feature = "postgres") {
            format!(
                "postgres://{}@{}:{}/{}",
                self.username, self.host, self.port, self.database
            )
        } else if self.in_memory {
            "sqlite::memory:".to_string()
        } else {
            format!("sqlite://{}", self.sqlite_path().display())
        }
    }
}

// =============================================================================
// Connect Options
// =============================================================================

#[cfg(not(feature = "postgres"))]
fn connect_options(config: &DbConfig) -> DbResult<sqlx::sqlite::SqliteConnectOptions> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
    use std::str::FromStr;

    if config.in_memory {
        return SqliteConnectOptions::from_str("sqlite::memory:")
            .map(|options| options.foreign_keys(true))
            .map_err(|e| DbError::ConnectionFailed(e.to_string()));
    }

    Ok(SqliteConnectOptions::new()
        .filename(config.sqlite_path())
        // WAL mode: readers don't block the writer
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        // SQLite has them disabled by default for backwards compatibility
        .foreign_keys(true)
        .create_if_missing(true))
}

#[cfg(feature = "postgres")]
fn connect_options(config: &DbConfig) -> DbResult<sqlx::postgres::PgConnectOptions> {
    let mut options = sqlx::postgres::PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.username)
        .database(&config.database);

    if !config.password.is_empty() {
        options = options.password(&config.password);
    }

    Ok(options)
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// Cheap to clone; every repository holds its own pool handle.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::new("rentals", 5432, "store")).await?;
/// let games = db.catalog().search(&CatalogQuery::all()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Creates the connection pool and runs migrations (if enabled).
    ///
    /// ## Returns
    /// * `Ok(Database)` - Ready-to-use database handle
    /// * `Err(DbError::ConnectionFailed)` - Engine unreachable
    /// * `Err(DbError::MigrationFailed)` - Schema could not be applied
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(target = %config.describe(), "Initializing database connection");

        let options = connect_options(&config)?;
        debug!("Connection options configured");

        let mut pool_options = PoolOptions::<Backend>::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout));

        if config.in_memory {
            // The database lives only as long as its single connection
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Applies pending migrations. Idempotent.
    ///
    /// ## Errors
    /// `DbError::MigrationFailed` when the schema is still behind afterwards.
    pub async fn run_migrations(&self) -> DbResult<()> {
        info!("Running database migrations");
        migrations::run_migrations(&self.pool).await?;

        let (total, applied) = migrations::migration_status(&self.pool).await?;
        if applied < total {
            return Err(DbError::MigrationFailed(format!(
                "{applied} of {total} migrations applied"
            )));
        }

        info!(applied, "Migrations complete");
        Ok(())
    }

    /// Returns a reference to the connection pool.
    ///
    /// Prefer repository methods when available.
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Returns the user repository.
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.pool.clone())
    }

    /// Returns the catalog repository.
    pub fn catalog(&self) -> CatalogRepository {
        CatalogRepository::new(self.pool.clone())
    }

    /// Returns the rental order repository.
    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.pool.clone())
    }

    /// Returns the tracking repository.
    pub fn tracking(&self) -> TrackingRepository {
        TrackingRepository::new(self.pool.clone())
    }

    /// Closes the connection pool. Repository calls fail afterwards.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database can execute queries.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
