//! Manager user edit: role, overdue count, favorite games, phone number.

use std::io::{BufRead, Write};

use rental_core::validation::{
    parse_overdue_count, validate_favorite_games, validate_login, validate_phone_number,
};
use rental_core::{Capability, Role, UserUpdate};
use rental_db::Database;
use tracing::info;

use super::CommandResult;
use crate::console::Console;
use crate::error::ApiError;
use crate::guard::{authorize, Session};

pub async fn update_user<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    console: &mut Console<R, W>,
) -> CommandResult {
    authorize(db, session, Capability::ManagerOnly).await?;

    let login = console.prompt("Enter login of the user to update")?;
    validate_login(&login)?;

    let mut update = UserUpdate::default();

    if let Some(role) = console.optional("New role (customer/employee/manager, blank to keep)")? {
        let role = role.parse::<Role>().map_err(|_| {
            ApiError::validation("role must be one of: customer, employee, manager")
        })?;
        update.role = Some(role);
    }
    if let Some(count) = console.optional("New number of overdue games (blank to keep)")? {
        update.num_overdue_games = Some(parse_overdue_count(&count)?);
    }
    if let Some(favorites) = console.optional("New favorite games (blank to keep)")? {
        validate_favorite_games(&favorites)?;
        update.favorite_games = Some(favorites);
    }
    if let Some(phone) = console.optional("New phone number (blank to keep)")? {
        validate_phone_number(&phone)?;
        update.phone_number = Some(phone);
    }

    db.users().update_user(&login, &update).await?;

    info!(manager = %session.login, login = %login, role = ?update.role, "User updated");
    console.say("User updated.")?;
    Ok(())
}
