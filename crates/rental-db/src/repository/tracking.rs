//! # Tracking Repository
//!
//! Shipment records, one per rental order. Every update stamps
//! `last_update_date`.

use chrono::{DateTime, Utc};
use rental_core::order::order_timestamp;
use rental_core::{CoreError, TrackingInfo, TrackingUpdate};
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::executor::{execute, fetch_optional};
use crate::pool::DbPool;
use crate::statement::{Statement, UpdateStatement};

const TRACKING_SELECT: &str = "SELECT tracking_id, rental_order_id, status, current_location, \
                               courier_name, last_update_date, additional_comments \
                               FROM tracking_info";

#[derive(Debug, Clone)]
pub struct TrackingRepository {
    pool: DbPool,
}

impl TrackingRepository {
    pub fn new(pool: DbPool) -> Self {
        TrackingRepository { pool }
    }

    pub async fn get(&self, tracking_id: &str) -> DbResult<Option<TrackingInfo>> {
        let stmt =
            Statement::new(format!("{TRACKING_SELECT} WHERE tracking_id = $1")).bind(tracking_id);
        fetch_optional(&self.pool, &stmt).await
    }

    pub async fn for_order(&self, rental_order_id: &str) -> DbResult<Option<TrackingInfo>> {
        let stmt = Statement::new(format!("{TRACKING_SELECT} WHERE rental_order_id = $1"))
            .bind(rental_order_id);
        fetch_optional(&self.pool, &stmt).await
    }

    /// Applies the supplied fields and sets `last_update_date` to `now`.
    ///
    /// ## Errors
    /// - `CoreError::NoUpdates` when no field was supplied (the date is not
    ///   touched either)
    /// - `DbError::NotFound` when the tracking id is unknown
    pub async fn update(
        &self,
        tracking_id: &str,
        update: &TrackingUpdate,
        now: DateTime<Utc>,
    ) -> DbResult<u64> {
        let stmt = UpdateStatement::new("tracking_info")
            .set_opt("status", update.status.clone())
            .set_opt("current_location", update.current_location.clone())
            .set_opt("courier_name", update.courier_name.clone())
            .set_opt("additional_comments", update.additional_comments.clone())
            .touch("last_update_date", order_timestamp(now))
            .filter("tracking_id", tracking_id)
            .build()
            .ok_or(CoreError::NoUpdates)?;

        let rows = execute(&self.pool, &stmt).await?;
        if rows == 0 {
            return Err(DbError::not_found("TrackingInfo", tracking_id));
        }

        info!(tracking_id = %tracking_id, status = ?update.status, "Tracking updated");
        Ok(rows)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::{Duration, TimeZone};
    use rental_core::{Money, NewCatalogItem, NewUser, OrderDraft, PlacedOrder, Role};

    async fn placed_order() -> (Database, PlacedOrder) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.users()
            .create(&NewUser {
                login: "amy".to_string(),
                password: "pw".to_string(),
                role: Role::Customer,
                favorite_games: None,
                phone_number: None,
            })
            .await
            .unwrap();
        db.catalog()
            .add(&NewCatalogItem {
                game_id: "G1".to_string(),
                game_name: "Space Miner".to_string(),
                genre: "Action".to_string(),
                price: Money::from_cents(499),
            })
            .await
            .unwrap();

        let mut draft = OrderDraft::new();
        draft.add_line("G1", 1).unwrap();
        let placed = db
            .orders()
            .place(
                "amy",
                &draft,
                Utc.with_ymd_and_hms(2026, 5, 1, 10, 0, 0).unwrap(),
            )
            .await
            .unwrap();
        (db, placed)
    }

    #[tokio::test]
    async fn test_status_update_leaves_other_fields() {
        let (db, placed) = placed_order().await;
        let later = Utc.with_ymd_and_hms(2026, 5, 2, 15, 30, 0).unwrap();

        db.tracking()
            .update(
                &placed.tracking_id,
                &TrackingUpdate {
                    status: Some("Shipped".to_string()),
                    ..Default::default()
                },
                later,
            )
            .await
            .unwrap();

        let tracking = db.tracking().get(&placed.tracking_id).await.unwrap().unwrap();
        assert_eq!(tracking.status, "Shipped");
        assert_eq!(tracking.current_location, "Warehouse");
        assert_eq!(tracking.courier_name, "Unassigned");
        assert_eq!(tracking.additional_comments, None);
        assert_eq!(tracking.last_update_date, later);
    }

    #[tokio::test]
    async fn test_empty_update_keeps_date() {
        let (db, placed) = placed_order().await;
        let before = db.tracking().get(&placed.tracking_id).await.unwrap().unwrap();

        let err = db
            .tracking()
            .update(
                &placed.tracking_id,
                &TrackingUpdate::default(),
                before.last_update_date + Duration::days(1),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Core(CoreError::NoUpdates)));

        let after = db.tracking().get(&placed.tracking_id).await.unwrap().unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_unknown_tracking_id() {
        let (db, _) = placed_order().await;

        assert!(db.tracking().get("nope").await.unwrap().is_none());

        let err = db
            .tracking()
            .update(
                "nope",
                &TrackingUpdate {
                    courier_name: Some("UPS".to_string()),
                    ..Default::default()
                },
                Utc::now(),
            )
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
