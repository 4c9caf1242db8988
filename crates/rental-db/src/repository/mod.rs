//! # Repositories
//!
//! One repository per aggregate. Each holds a pool handle and is obtained
//! from [`Database`](crate::Database).
//!
//! ```text
//! db.users()     → UserRepository       users
//! db.catalog()   → CatalogRepository    catalog
//! db.orders()    → OrderRepository      rental_order + games_in_order
//! db.tracking()  → TrackingRepository   tracking_info
//! ```

pub mod catalog;
pub mod order;
pub mod tracking;
pub mod user;
