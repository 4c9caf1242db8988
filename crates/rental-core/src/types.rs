//! # Domain Types
//!
//! Records of the five store tables, the inputs that create them, and the
//! partial update sets the mutation handlers collect.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │   RentalOrder   │   │  TrackingInfo   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  login (key)    │◄──│  login (owner)  │◄──│  rental_order_id│       │
//! │  │  role           │   │  total_cents    │   │  status         │       │
//! │  │  overdue count  │   │  due_date       │   │  last_update    │       │
//! │  └─────────────────┘   └────────┬────────┘   └─────────────────┘       │
//! │                                 │ 1..n                                  │
//! │  ┌─────────────────┐   ┌────────▼────────┐                              │
//! │  │   CatalogItem   │◄──│   GameInOrder   │                              │
//! │  │  game_id (key)  │   │  units_ordered  │                              │
//! │  │  price_cents    │   └─────────────────┘                              │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Update Sets
//! Every `*Update` struct holds one `Option` per editable column. `None`
//! means "leave unchanged"; an update whose fields are all `None` is empty
//! and never reaches the database.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::Role;
use crate::money::Money;

// =============================================================================
// Tabular Presentation
// =============================================================================

/// A record that can be printed as a table row.
///
/// `cells()` returns one value per entry of `headers()`, in the same order.
pub trait Tabular {
    fn headers() -> &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

fn or_blank(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn timestamp(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M:%S").to_string()
}

// =============================================================================
// User
// =============================================================================

/// A store account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub login: String,

    /// Argon2 PHC string, or plain text for accounts created elsewhere.
    #[serde(skip_serializing)]
    pub password: String,

    /// Stored as text and parsed on read; an unknown value is a decode error.
    #[cfg_attr(feature = "sqlx", sqlx(try_from = "String"))]
    pub role: Role,

    pub favorite_games: Option<String>,
    pub phone_number: Option<String>,
    pub num_overdue_games: i32,
}

impl Tabular for User {
    fn headers() -> &'static [&'static str] {
        &["Login", "Role", "Favorite Games", "Phone Number", "Overdue Games"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.login.clone(),
            self.role.to_string(),
            or_blank(&self.favorite_games),
            or_blank(&self.phone_number),
            self.num_overdue_games.to_string(),
        ]
    }
}

/// Input for signup. `password` is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub login: String,
    pub password: String,
    pub role: Role,
    pub favorite_games: Option<String>,
    pub phone_number: Option<String>,
}

// =============================================================================
// Catalog
// =============================================================================

/// A rentable game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CatalogItem {
    pub game_id: String,
    pub game_name: String,
    pub genre: String,
    /// Rental price in cents.
    pub price_cents: i64,
}

impl CatalogItem {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

impl Tabular for CatalogItem {
    fn headers() -> &'static [&'static str] {
        &["Game ID", "Game Name", "Genre", "Price"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.game_id.clone(),
            self.game_name.clone(),
            self.genre.clone(),
            self.price().to_string(),
        ]
    }
}

/// Input for adding a game to the catalog.
#[derive(Debug, Clone)]
pub struct NewCatalogItem {
    pub game_id: String,
    pub game_name: String,
    pub genre: String,
    pub price: Money,
}

// =============================================================================
// Rental Order
// =============================================================================

/// One checkout. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct RentalOrder {
    pub rental_order_id: String,
    pub login: String,
    /// Total units across all lines.
    pub no_of_games: i32,
    pub total_price_cents: i64,
    pub order_timestamp: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
}

impl RentalOrder {
    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }
}

impl Tabular for RentalOrder {
    fn headers() -> &'static [&'static str] {
        &["Order ID", "Login", "Games", "Total", "Ordered At", "Due Date"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.rental_order_id.clone(),
            self.login.clone(),
            self.no_of_games.to_string(),
            self.total_price().to_string(),
            timestamp(&self.order_timestamp),
            timestamp(&self.due_date),
        ]
    }
}

/// A `games_in_order` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct GameInOrder {
    pub rental_order_id: String,
    pub game_id: String,
    pub units_ordered: i32,
}

/// An order line joined with its catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderedGame {
    pub game_id: String,
    pub game_name: String,
    pub units_ordered: i32,
    /// Current catalog price, not the price at checkout.
    pub price_cents: i64,
}

impl Tabular for OrderedGame {
    fn headers() -> &'static [&'static str] {
        &["Game ID", "Game Name", "Units", "Unit Price"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.game_id.clone(),
            self.game_name.clone(),
            self.units_ordered.to_string(),
            Money::from_cents(self.price_cents).to_string(),
        ]
    }
}

/// Single-order detail: the order, its tracking record and its lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    pub order: RentalOrder,
    pub tracking: TrackingInfo,
    pub games: Vec<OrderedGame>,
}

/// What a successful checkout reports back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedOrder {
    pub rental_order_id: String,
    pub tracking_id: String,
    pub total: Money,
    pub no_of_games: i32,
    pub order_timestamp: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
}

// =============================================================================
// Tracking Info
// =============================================================================

/// Shipment status of one rental order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TrackingInfo {
    pub tracking_id: String,
    pub rental_order_id: String,
    pub status: String,
    pub current_location: String,
    pub courier_name: String,
    pub last_update_date: DateTime<Utc>,
    pub additional_comments: Option<String>,
}

impl Tabular for TrackingInfo {
    fn headers() -> &'static [&'static str] {
        &[
            "Tracking ID",
            "Order ID",
            "Status",
            "Location",
            "Courier",
            "Last Update",
            "Comments",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.tracking_id.clone(),
            self.rental_order_id.clone(),
            self.status.clone(),
            self.current_location.clone(),
            self.courier_name.clone(),
            timestamp(&self.last_update_date),
            or_blank(&self.additional_comments),
        ]
    }
}

// =============================================================================
// Update Sets
// =============================================================================

/// Self-service profile edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// Already hashed.
    pub password: Option<String>,
    pub favorite_games: Option<String>,
    pub phone_number: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.password.is_none() && self.favorite_games.is_none() && self.phone_number.is_none()
    }
}

/// Manager edit of a catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogUpdate {
    pub game_name: Option<String>,
    pub genre: Option<String>,
    pub price: Option<Money>,
}

impl CatalogUpdate {
    pub fn is_empty(&self) -> bool {
        self.game_name.is_none() && self.genre.is_none() && self.price.is_none()
    }
}

/// Employee or manager edit of a tracking record.
///
/// `last_update_date` is not part of the set; it is stamped on every
/// non-empty update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackingUpdate {
    pub status: Option<String>,
    pub current_location: Option<String>,
    pub courier_name: Option<String>,
    pub additional_comments: Option<String>,
}

impl TrackingUpdate {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.current_location.is_none()
            && self.courier_name.is_none()
            && self.additional_comments.is_none()
    }
}

/// Manager edit of any user record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub role: Option<Role>,
    pub num_overdue_games: Option<i32>,
    pub favorite_games: Option<String>,
    pub phone_number: Option<String>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.role.is_none()
            && self.num_overdue_games.is_none()
            && self.favorite_games.is_none()
            && self.phone_number.is_none()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_user() -> User {
        User {
            login: "amy".to_string(),
            password: "secret".to_string(),
            role: Role::Customer,
            favorite_games: None,
            phone_number: Some("951-555-0100".to_string()),
            num_overdue_games: 2,
        }
    }

    #[test]
    fn test_cells_match_headers() {
        let user = sample_user();
        assert_eq!(user.cells().len(), User::headers().len());

        let item = CatalogItem {
            game_id: "G1".to_string(),
            game_name: "Chrono Trigger".to_string(),
            genre: "RPG".to_string(),
            price_cents: 999,
        };
        assert_eq!(item.cells().len(), CatalogItem::headers().len());
        assert_eq!(item.cells()[3], "$9.99");

        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap();
        let tracking = TrackingInfo {
            tracking_id: "t".to_string(),
            rental_order_id: "o".to_string(),
            status: "Ordered".to_string(),
            current_location: "Warehouse".to_string(),
            courier_name: "Unassigned".to_string(),
            last_update_date: at,
            additional_comments: None,
        };
        let cells = tracking.cells();
        assert_eq!(cells.len(), TrackingInfo::headers().len());
        assert_eq!(cells[5], "2026-03-01 12:30:00");
        assert_eq!(cells[6], "");
    }

    #[test]
    fn test_user_cells_never_show_password() {
        let user = sample_user();
        assert!(!user.cells().iter().any(|c| c.contains("secret")));
    }

    #[test]
    fn test_update_sets_empty() {
        assert!(ProfileUpdate::default().is_empty());
        assert!(CatalogUpdate::default().is_empty());
        assert!(TrackingUpdate::default().is_empty());
        assert!(UserUpdate::default().is_empty());

        let update = TrackingUpdate {
            status: Some("Shipped".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());

        let update = UserUpdate {
            num_overdue_games: Some(0),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
