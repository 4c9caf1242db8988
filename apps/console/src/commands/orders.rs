//! # Order Commands
//!
//! ## Place Rental Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Game ID (or 'done') ──► catalog lookup ── unknown ──► reported, skipped │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  Quantity ──► 1..=999 ── invalid ──► reported, skipped                  │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  OrderDraft::add_line (same game twice ──► quantities merge)            │
//! │        │                                                                │
//! │  'done' ──► OrderRepository::place (one transaction)                    │
//! │  end of input ──► cancelled, nothing written                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{BufRead, Write};

use chrono::Utc;
use rental_core::validation::{parse_quantity, validate_game_id, validate_record_id};
use rental_core::{
    history_target, may_view_order, Capability, CoreError, OrderDraft, Role, RECENT_ORDER_LIMIT,
};
use rental_db::Database;
use tracing::warn;

use super::CommandResult;
use crate::console::Console;
use crate::error::ApiError;
use crate::formatting::{format_record, format_rows};
use crate::guard::{authorize, Session};

// =============================================================================
// Placement
// =============================================================================

pub async fn place_order<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    console: &mut Console<R, W>,
) -> CommandResult {
    authorize(db, session, Capability::SelfOnly).await?;

    console.say("Enter each game ID and quantity. Type 'done' when finished.")?;

    let mut draft = OrderDraft::new();

    loop {
        let game_id = console.prompt("Game ID (or 'done')")?;
        if console.at_eof() {
            console.say("Order cancelled.")?;
            return Ok(());
        }
        if game_id.eq_ignore_ascii_case("done") {
            break;
        }

        if let Err(e) = validate_game_id(&game_id) {
            console.say(e)?;
            continue;
        }

        let Some(item) = db.catalog().get(&game_id).await? else {
            console.say(format!("Game not found: {}", game_id))?;
            continue;
        };

        let quantity = console.prompt("Quantity")?;
        if console.at_eof() {
            console.say("Order cancelled.")?;
            return Ok(());
        }

        let quantity = match parse_quantity(&quantity) {
            Ok(quantity) => quantity,
            Err(e) => {
                console.say(e)?;
                continue;
            }
        };

        match draft.add_line(&item.game_id, i64::from(quantity)) {
            Ok(()) => console.say(format!(
                "Added {} x {} ({} each)",
                quantity,
                item.game_name,
                item.price()
            ))?,
            Err(e) => console.say(ApiError::from(e).message)?,
        }
    }

    let placed = db.orders().place(&session.login, &draft, Utc::now()).await?;

    console.say("Order placed!")?;
    console.say(format!("Rental order ID: {}", placed.rental_order_id))?;
    console.say(format!("Tracking ID:     {}", placed.tracking_id))?;
    console.say(format!("Games:           {}", placed.no_of_games))?;
    console.say(format!("Total:           {}", placed.total))?;
    console.say(format!(
        "Due date:        {}",
        placed.due_date.format("%Y-%m-%d %H:%M:%S")
    ))?;
    Ok(())
}

// =============================================================================
// History
// =============================================================================

/// Resolves whose history to show. Managers may name any login.
async fn history_login<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    role: Role,
    console: &mut Console<R, W>,
) -> CommandResult<String> {
    let requested = console.optional("Login to view (blank for your own)")?;
    let target = history_target(&session.login, role, requested.as_deref())?;

    if target != session.login && db.users().role_of(&target).await?.is_none() {
        return Err(CoreError::UnknownLogin(target).into());
    }

    Ok(target)
}

pub async fn view_all_orders<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    console: &mut Console<R, W>,
) -> CommandResult {
    let role = authorize(db, session, Capability::SelfOnly).await?;
    let login = history_login(db, session, role, console).await?;

    let orders = db.orders().history(&login).await?;
    if orders.is_empty() {
        console.say("No rental orders found.")?;
    } else {
        console.say(format_rows(&orders))?;
    }
    Ok(())
}

pub async fn view_recent_orders<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    console: &mut Console<R, W>,
) -> CommandResult {
    let role = authorize(db, session, Capability::SelfOnly).await?;
    let login = history_login(db, session, role, console).await?;

    let orders = db.orders().recent(&login, RECENT_ORDER_LIMIT).await?;
    if orders.is_empty() {
        console.say("No rental orders found.")?;
    } else {
        console.say(format_rows(&orders))?;
    }
    Ok(())
}

// =============================================================================
// Detail
// =============================================================================

pub async fn view_order_info<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    console: &mut Console<R, W>,
) -> CommandResult {
    let role = authorize(db, session, Capability::SelfOnly).await?;

    let order_id = console.prompt("Enter rental order ID")?;
    validate_record_id("rental order id", &order_id)?;

    let detail = db
        .orders()
        .detail(&order_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Rental order", &order_id))?;

    // Someone else's order reads the same as a missing one.
    if may_view_order(&session.login, role, &detail.order.login).is_err() {
        warn!(login = %session.login, order_id = %order_id, "Order belongs to another login");
        return Err(ApiError::not_found("Rental order", &order_id));
    }

    console.say(format_record(&detail.order))?;
    console.say(format_record(&detail.tracking))?;
    console.say(format_rows(&detail.games))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use rental_core::{Money, NewCatalogItem, NewUser};
    use rental_db::DbConfig;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    async fn store() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        for (login, role) in [("amy", Role::Customer), ("bob", Role::Customer), ("mgr", Role::Manager)] {
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
        for (id, cents) in [("G1", 999), ("G2", 450)] {
            db.catalog()
                .add(&NewCatalogItem {
                    game_id: id.to_string(),
                    game_name: format!("Game {id}"),
                    genre: "Action".to_string(),
                    price: Money::from_cents(cents),
                })
                .await
                .unwrap();
        }
        db
    }

    #[tokio::test]
    async fn test_place_order_skips_bad_lines() {
        let db = store().await;
        let mut c = console("G1\n1\nNOPE\nG2\n0\nG2\n1\nG1\n1\ndone\n");

        place_order(&db, &Session::new("amy"), &mut c).await.unwrap();

        let out = String::from_utf8(c.into_output()).unwrap();
        assert!(out.contains("Game not found: NOPE"));
        assert!(out.contains("quantity must be positive"));
        assert!(out.contains("Total:           $24.48"));

        let orders = db.orders().history("amy").await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].total_price_cents, 2448);
        assert_eq!(db.orders().lines(&orders[0].rental_order_id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_order_writes_nothing() {
        let db = store().await;

        let err = place_order(&db, &Session::new("amy"), &mut console("NOPE\ndone\n"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(db.orders().history("amy").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_end_of_input_cancels_order() {
        let db = store().await;

        place_order(&db, &Session::new("amy"), &mut console("G1\n2\n"))
            .await
            .unwrap();
        assert!(db.orders().history("amy").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_of_another_login() {
        let db = store().await;
        place_order(&db, &Session::new("bob"), &mut console("G1\n1\ndone\n"))
            .await
            .unwrap();

        let err = view_all_orders(&db, &Session::new("amy"), &mut console("bob\n"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);

        let mut c = console("bob\n");
        view_recent_orders(&db, &Session::new("mgr"), &mut c)
            .await
            .unwrap();
        let out = String::from_utf8(c.into_output()).unwrap();
        assert!(out.contains("bob"));
        assert!(out.contains("$9.99"));

        let err = view_all_orders(&db, &Session::new("mgr"), &mut console("ghost\n"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_order_detail_is_owner_or_staff_only() {
        let db = store().await;
        place_order(&db, &Session::new("bob"), &mut console("G2\n3\ndone\n"))
            .await
            .unwrap();
        let order_id = db.orders().history("bob").await.unwrap()[0]
            .rental_order_id
            .clone();
        let input = format!("{order_id}\n");

        let err = view_order_info(&db, &Session::new("amy"), &mut console(&input))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, format!("Rental order not found: {order_id}"));

        let missing = "00000000-0000-4000-8000-000000000000";
        let mut c = console(&format!("{missing}\n"));
        let err = view_order_info(&db, &Session::new("amy"), &mut c)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, format!("Rental order not found: {missing}"));

        let mut c = console(&input);
        view_order_info(&db, &Session::new("bob"), &mut c).await.unwrap();
        let out = String::from_utf8(c.into_output()).unwrap();
        assert!(out.contains("Game G2"));
        assert!(out.contains("Ordered"));

        let err = view_order_info(
            &db,
            &Session::new("mgr"),
            &mut console("00000000-0000-4000-8000-000000000000\n"),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
