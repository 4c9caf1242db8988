//! # rental-core: Pure Business Logic for the Game Rental Store
//!
//! This crate holds the domain rules of the rental store as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Game Rental Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Console (apps/console)                       │   │
//! │  │    Menu ──► Handler ──► Authorize ──► Repository call          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ rental-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │  types   │ │  money   │ │   auth   │ │  order   │          │   │
//! │  │   │ User     │ │ Money    │ │ Role     │ │ Draft    │          │   │
//! │  │   │ Catalog  │ │ parsing  │ │ Capabil. │ │ Pricing  │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CONSOLE • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  rental-db (Database Layer)                     │   │
//! │  │          Statements, migrations, repositories, transactions     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain records (User, CatalogItem, RentalOrder, ...) and update sets
//! - [`money`] - Integer money type and decimal-text parsing
//! - [`auth`] - Roles, capabilities and the fail-closed authorization decision
//! - [`catalog`] - Catalog browsing criteria
//! - [`order`] - Order drafts, pricing and the due-date policy
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use rental_core::money::Money;
//! use rental_core::order::OrderDraft;
//!
//! let mut draft = OrderDraft::new();
//! draft.add_line("G1", 2).unwrap();
//! draft.add_line("G2", 1).unwrap();
//!
//! let total = draft
//!     .price_with(|game_id| match game_id {
//!         "G1" => Some(Money::from_cents(999)),
//!         "G2" => Some(Money::from_cents(450)),
//!         _ => None,
//!     })
//!     .unwrap()
//!     .total;
//!
//! assert_eq!(total.cents(), 2448);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod catalog;
pub mod error;
pub mod money;
pub mod order;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use auth::{authorize, history_target, may_view_order, Capability, Role};
pub use catalog::{CatalogFilter, CatalogQuery, PriceSort};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::{OrderDraft, OrderLine, PricedOrder};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Length of a rental, in days. Fixed store policy.
pub const RENTAL_PERIOD_DAYS: i64 = 7;

/// Number of orders returned by the "recent orders" query.
pub const RECENT_ORDER_LIMIT: i64 = 5;

/// Maximum units of a single game in one order.
///
/// ## Business Reason
/// Guards against typos such as `100` instead of `10` at the prompt.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest catalog price, in cents ($999,999.99).
pub const MAX_PRICE_CENTS: i64 = 99_999_999;

/// Status every tracking record starts in.
pub const INITIAL_TRACKING_STATUS: &str = "Ordered";

/// Location recorded on a fresh tracking record.
pub const DEFAULT_TRACKING_LOCATION: &str = "Warehouse";

/// Courier recorded on a fresh tracking record.
pub const DEFAULT_COURIER: &str = "Unassigned";
