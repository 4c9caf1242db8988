//! # Rental Order Repository
//!
//! Order placement and order history.
//!
//! ## Placement Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  place(login, draft, now)                                               │
//! │                                                                         │
//! │  draft empty? ──► Err(EmptyOrder), no transaction opened                │
//! │       │                                                                 │
//! │  BEGIN                                                                  │
//! │       ├── SELECT prices  WHERE game_id IN (...)                         │
//! │       ├── INSERT rental_order      (total, units, timestamp, due date)  │
//! │       ├── INSERT games_in_order    one row per distinct game, batched   │
//! │       └── INSERT tracking_info     Ordered / Warehouse / Unassigned     │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Any step fails ──► ROLLBACK: none of the three tables changes          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rental_core::order::{due_date, order_timestamp};
use rental_core::{
    CoreError, GameInOrder, Money, OrderDetail, OrderDraft, OrderedGame, PlacedOrder,
    RentalOrder, DEFAULT_COURIER, DEFAULT_TRACKING_LOCATION, INITIAL_TRACKING_STATUS,
};
use sqlx::QueryBuilder;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::executor::{execute, fetch_all, fetch_optional};
use crate::pool::{Backend, DbConnection, DbPool};
use crate::repository::tracking::TrackingRepository;
use crate::statement::Statement;

const ORDER_SELECT: &str = "SELECT rental_order_id, login, no_of_games, total_price_cents, \
                            order_timestamp, due_date FROM rental_order";

/// Repository for rental orders and their lines.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: DbPool,
}

impl OrderRepository {
    pub fn new(pool: DbPool) -> Self {
        OrderRepository { pool }
    }

    // =========================================================================
    // Placement
    // =========================================================================

    /// Places an order for `login` atomically.
    ///
    /// ## Errors
    /// - `CoreError::EmptyOrder` for an empty draft
    /// - `DbError::NotFound` when a game is not in the catalog
    /// - `DbError::ForeignKeyViolation` when `login` has no account
    pub async fn place(
        &self,
        login: &str,
        draft: &OrderDraft,
        now: DateTime<Utc>,
    ) -> DbResult<PlacedOrder> {
        if draft.is_empty() {
            return Err(CoreError::EmptyOrder.into());
        }

        debug!(login = %login, lines = draft.line_count(), "Beginning order transaction");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        match Self::write_order(&mut *tx, login, draft, now).await {
            Ok(placed) => {
                tx.commit()
                    .await
                    .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

                info!(
                    login = %login,
                    order_id = %placed.rental_order_id,
                    total = %placed.total,
                    games = placed.no_of_games,
                    "Order placed"
                );
                Ok(placed)
            }
            Err(err) => {
                warn!(login = %login, error = %err, "Order failed, rolling back");
                if let Err(rollback_err) = tx.rollback().await {
                    error!(error = %rollback_err, "Rollback failed");
                }
                Err(err)
            }
        }
    }

    async fn write_order(
        conn: &mut DbConnection,
        login: &str,
        draft: &OrderDraft,
        now: DateTime<Utc>,
    ) -> DbResult<PlacedOrder> {
        let prices = Self::current_prices(conn, draft).await?;

        let priced = draft
            .price_with(|game_id| prices.get(game_id).copied())
            .map_err(|e| match e {
                CoreError::UnknownGame(id) => DbError::not_found("Game", id),
                other => other.into(),
            })?;

        let ordered_at = order_timestamp(now);
        let due = due_date(ordered_at);
        let rental_order_id = Uuid::new_v4().to_string();
        let tracking_id = Uuid::new_v4().to_string();

        execute(
            &mut *conn,
            &Statement::new(
                "INSERT INTO rental_order \
                 (rental_order_id, login, no_of_games, total_price_cents, order_timestamp, due_date) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(&rental_order_id)
            .bind(login)
            .bind(priced.units)
            .bind(priced.total)
            .bind(ordered_at)
            .bind(due),
        )
        .await?;

        let mut lines: QueryBuilder<'_, Backend> = QueryBuilder::new(
            "INSERT INTO games_in_order (rental_order_id, game_id, units_ordered) ",
        );
        lines.push_values(&priced.lines, |mut row, line| {
            row.push_bind(rental_order_id.clone())
                .push_bind(line.game_id.clone())
                .push_bind(line.quantity);
        });

        let inserted = lines.build().execute(&mut *conn).await?.rows_affected();
        if inserted != priced.lines.len() as u64 {
            return Err(DbError::Internal(format!(
                "expected {} order lines, inserted {}",
                priced.lines.len(),
                inserted
            )));
        }

        execute(
            &mut *conn,
            &Statement::new(
                "INSERT INTO tracking_info \
                 (tracking_id, rental_order_id, status, current_location, courier_name, \
                  last_update_date, additional_comments) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(&tracking_id)
            .bind(&rental_order_id)
            .bind(INITIAL_TRACKING_STATUS)
            .bind(DEFAULT_TRACKING_LOCATION)
            .bind(DEFAULT_COURIER)
            .bind(ordered_at)
            .bind(None::<String>),
        )
        .await?;

        Ok(PlacedOrder {
            rental_order_id,
            tracking_id,
            total: priced.total,
            no_of_games: priced.units,
            order_timestamp: ordered_at,
            due_date: due,
        })
    }

    async fn current_prices(
        conn: &mut DbConnection,
        draft: &OrderDraft,
    ) -> DbResult<HashMap<String, Money>> {
        let mut query: QueryBuilder<'_, Backend> =
            QueryBuilder::new("SELECT game_id, price_cents FROM catalog WHERE game_id IN (");
        let mut ids = query.separated(", ");
        for line in draft.lines() {
            ids.push_bind(line.game_id.clone());
        }
        ids.push_unseparated(")");

        let rows: Vec<(String, i64)> = query.build_query_as().fetch_all(&mut *conn).await?;

        Ok(rows
            .into_iter()
            .map(|(id, cents)| (id, Money::from_cents(cents)))
            .collect())
    }

    // =========================================================================
    // History
    // =========================================================================

    /// Every order of `login`, newest first.
    pub async fn history(&self, login: &str) -> DbResult<Vec<RentalOrder>> {
        let stmt = Statement::new(format!(
            "{ORDER_SELECT} WHERE login = $1 ORDER BY order_timestamp DESC"
        ))
        .bind(login);

        fetch_all(&self.pool, &stmt).await
    }

    /// The `limit` newest orders of `login`.
    pub async fn recent(&self, login: &str, limit: i64) -> DbResult<Vec<RentalOrder>> {
        let stmt = Statement::new(format!(
            "{ORDER_SELECT} WHERE login = $1 ORDER BY order_timestamp DESC LIMIT $2"
        ))
        .bind(login)
        .bind(limit);

        fetch_all(&self.pool, &stmt).await
    }

    pub async fn get(&self, rental_order_id: &str) -> DbResult<Option<RentalOrder>> {
        let stmt = Statement::new(format!("{ORDER_SELECT} WHERE rental_order_id = $1"))
            .bind(rental_order_id);

        fetch_optional(&self.pool, &stmt).await
    }

    /// Raw `games_in_order` rows of one order.
    pub async fn lines(&self, rental_order_id: &str) -> DbResult<Vec<GameInOrder>> {
        let stmt = Statement::new(
            "SELECT rental_order_id, game_id, units_ordered FROM games_in_order \
             WHERE rental_order_id = $1 ORDER BY game_id",
        )
        .bind(rental_order_id);

        fetch_all(&self.pool, &stmt).await
    }

    /// An order with its tracking record and catalog-joined lines.
    ///
    /// ## Returns
    /// * `Ok(None)` - No such order
    /// * `Err(NotFound)` - Order exists without a tracking record
    pub async fn detail(&self, rental_order_id: &str) -> DbResult<Option<OrderDetail>> {
        let Some(order) = self.get(rental_order_id).await? else {
            return Ok(None);
        };

        let tracking = TrackingRepository::new(self.pool.clone())
            .for_order(rental_order_id)
            .await?
            .ok_or_else(|| DbError::not_found("TrackingInfo", rental_order_id))?;

        let games: Vec<OrderedGame> = fetch_all(
            &self.pool,
            &Statement::new(
                "SELECT g.game_id, c.game_name, g.units_ordered, c.price_cents \
                 FROM games_in_order g JOIN catalog c ON c.game_id = g.game_id \
                 WHERE g.rental_order_id = $1 ORDER BY g.game_id",
            )
            .bind(rental_order_id),
        )
        .await?;

        Ok(Some(OrderDetail {
            order,
            tracking,
            games,
        }))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
