//! # rental-db: Database Layer for the Game Rental Store
//!
//! Data access for users, the game catalog, rental orders and shipment
//! tracking. Built on sqlx; SQLite by default, PostgreSQL with the
//! `postgres` feature.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Rental Store Data Flow                           │
//! │                                                                         │
//! │  Console menu handler (place order, view catalog, ...)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     rental-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (user.rs ...) │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ Pool<Backend> │◄───│ UserRepo      │    │ 0001_initial │  │   │
//! │  │   │               │    │ CatalogRepo   │    │              │  │   │
//! │  │   │               │    │ OrderRepo     │    │              │  │   │
//! │  │   │               │    │ TrackingRepo  │    │              │  │   │
//! │  │   └───────┬───────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │           │  Statement / UpdateStatement ─► executor          │   │
//! │  └───────────┼─────────────────────────────────────────────────────┘   │
//! │              ▼                                                          │
//! │     SQLite <data_dir>/<db>.db   or   PostgreSQL host:port/db           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`statement`] - Parameterized statements and the partial-update builder
//! - [`executor`] - Runs statements against a pool or a transaction
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rental_db::{Database, DbConfig};
//! use rental_core::{CatalogQuery, PriceSort};
//!
//! let db = Database::new(DbConfig::new("rentals", 5432, "store")).await?;
//! let games = db
//!     .catalog()
//!     .search(&CatalogQuery::by_genre("Action", PriceSort::Ascending))
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod executor;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod statement;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Backend, Database, DbConfig, DbConnection, DbPool};
pub use statement::{SqlParam, Statement, UpdateStatement};

// Repository re-exports for convenience
pub use repository::catalog::CatalogRepository;
pub use repository::order::OrderRepository;
pub use repository::tracking::TrackingRepository;
pub use repository::user::UserRepository;
