//! Tracking commands.
//!
//! Customers may view tracking of their own orders. Employees and managers
//! may view and update any tracking record.

use std::io::{BufRead, Write};

use chrono::Utc;
use rental_core::validation::{validate_record_id, validate_tracking_text};
use rental_core::{may_view_order, Capability, TrackingUpdate};
use rental_db::Database;
use tracing::{info, warn};

use super::CommandResult;
use crate::console::Console;
use crate::error::ApiError;
use crate::formatting::format_record;
use crate::guard::{authorize, Session};

pub async fn view_tracking_info<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    console: &mut Console<R, W>,
) -> CommandResult {
    let role = authorize(db, session, Capability::SelfOnly).await?;

    let tracking_id = console.prompt("Enter tracking ID")?;
    validate_record_id("tracking id", &tracking_id)?;

    let tracking = db
        .tracking()
        .get(&tracking_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tracking record", &tracking_id))?;

    let order = db
        .orders()
        .get(&tracking.rental_order_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Rental order", &tracking.rental_order_id))?;

    // Someone else's tracking record reads the same as a missing one.
    if may_view_order(&session.login, role, &order.login).is_err() {
        warn!(
            login = %session.login,
            tracking_id = %tracking_id,
            "Tracking record belongs to another login"
        );
        return Err(ApiError::not_found("Tracking record", &tracking_id));
    }

    console.say(format_record(&tracking))?;
    Ok(())
}

pub async fn update_tracking_info<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    console: &mut Console<R, W>,
) -> CommandResult {
    authorize(db, session, Capability::EmployeeOrAbove).await?;

    let tracking_id = console.prompt("Enter tracking ID")?;
    validate_record_id("tracking id", &tracking_id)?;

    let mut update = TrackingUpdate::default();

    if let Some(status) = console.optional("New status (blank to keep)")? {
        validate_tracking_text("status", &status)?;
        update.status = Some(status);
    }
    if let Some(location) = console.optional("New current location (blank to keep)")? {
        validate_tracking_text("current location", &location)?;
        update.current_location = Some(location);
    }
    if let Some(courier) = console.optional("New courier name (blank to keep)")? {
        validate_tracking_text("courier name", &courier)?;
        update.courier_name = Some(courier);
    }
    if let Some(comments) = console.optional("Additional comments (blank to keep)")? {
        validate_tracking_text("additional comments", &comments)?;
        update.additional_comments = Some(comments);
    }

    db.tracking()
        .update(&tracking_id, &update, Utc::now())
        .await?;

    info!(login = %session.login, tracking_id = %tracking_id, "Tracking updated");
    console.say("Tracking information updated.")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use rental_core::{Money, NewCatalogItem, NewUser, OrderDraft, PlacedOrder, Role};
    use rental_db::DbConfig;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    async fn store_with_order() -> (Database, PlacedOrder) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        for (login, role) in [("amy", Role::Customer), ("bob", Role::Customer), ("emp", Role::Employee)] {
            db.users()
                .create(&NewUser {
                    login: login.to_string(),
                    password: "pw".to_string(),
                    role,
                    favorite_games: None,
                    phone_number: None,
                })
                .await
                .unwrap();
        }
        db.catalog()
            .add(&NewCatalogItem {
                game_id: "G1".to_string(),
                game_name: "Space Miner".to_string(),
                genre: "Action".to_string(),
                price: Money::from_cents(999),
            })
            .await
            .unwrap();

        let mut draft = OrderDraft::new();
        draft.add_line("G1", 1).unwrap();
        let placed = db.orders().place("amy", &draft, Utc::now()).await.unwrap();
        (db, placed)
    }

    #[tokio::test]
    async fn test_owner_and_staff_can_view() {
        let (db, placed) = store_with_order().await;
        let input = format!("{}\n", placed.tracking_id);

        for login in ["amy", "emp"] {
            let mut c = console(&input);
            view_tracking_info(&db, &Session::new(login), &mut c)
                .await
                .unwrap();
            let out = String::from_utf8(c.into_output()).unwrap();
            assert!(out.contains("Warehouse"));
        }

        let err = view_tracking_info(&db, &Session::new("bob"), &mut console(&input))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(
            err.message,
            format!("Tracking record not found: {}", placed.tracking_id)
        );

        let missing = "00000000-0000-4000-8000-000000000000";
        let mut c = console(&format!("{missing}\n"));
        let err = view_tracking_info(&db, &Session::new("bob"), &mut c)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, format!("Tracking record not found: {missing}"));
    }

    #[tokio::test]
    async fn test_customer_cannot_update() {
        let (db, placed) = store_with_order().await;
        let input = format!("{}\nShipped\n\n\n\n", placed.tracking_id);

        let err = update_tracking_info(&db, &Session::new("amy"), &mut console(&input))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);

        let tracking = db.tracking().get(&placed.tracking_id).await.unwrap().unwrap();
        assert_eq!(tracking.status, "Ordered");
    }

    #[tokio::test]
    async fn test_employee_updates_status_only() {
        let (db, placed) = store_with_order().await;
        let input = format!("{}\nShipped\n\n\n\n", placed.tracking_id);

        update_tracking_info(&db, &Session::new("emp"), &mut console(&input))
            .await
            .unwrap();

        let tracking = db.tracking().get(&placed.tracking_id).await.unwrap().unwrap();
        assert_eq!(tracking.status, "Shipped");
        assert_eq!(tracking.courier_name, "Unassigned");
        assert_eq!(tracking.current_location, "Warehouse");
    }

    #[tokio::test]
    async fn test_blank_update_is_rejected() {
        let (db, placed) = store_with_order().await;
        let input = format!("{}\n\n\n\n\n", placed.tracking_id);

        let err = update_tracking_info(&db, &Session::new("emp"), &mut console(&input))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NoUpdates);
    }
}
