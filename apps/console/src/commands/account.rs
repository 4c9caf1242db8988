//! Account commands: signup and login.
//!
//! Signup always creates a customer. Employee and manager accounts are
//! provisioned by the `seed` binary or promoted by a manager.

use std::io::{BufRead, Write};

use rental_core::validation::{
    validate_favorite_games, validate_login, validate_password, validate_phone_number,
};
use rental_core::{NewUser, Role};
use rental_db::Database;
use tracing::{info, warn};

use super::CommandResult;
use crate::auth::{hash_password, verify_password};
use crate::console::Console;
use crate::guard::Session;

pub async fn create_user<R: BufRead, W: Write>(
    db: &Database,
    console: &mut Console<R, W>,
) -> CommandResult {
    let login = console.prompt("Enter login")?;
    validate_login(&login)?;

    let password = console.prompt("Enter password")?;
    validate_password(&password)?;

    let favorite_games = console.optional("Enter favorite games (optional)")?;
    if let Some(favorites) = &favorite_games {
        validate_favorite_games(favorites)?;
    }

    let phone_number = console.optional("Enter phone number (optional)")?;
    if let Some(phone) = &phone_number {
        validate_phone_number(phone)?;
    }

    db.users()
        .create(&NewUser {
            login: login.clone(),
            password: hash_password(&password)?,
            role: Role::Customer,
            favorite_games,
            phone_number,
        })
        .await?;

    info!(login = %login, "Account created");
    console.say("User successfully created!")?;
    Ok(())
}

/// Returns the session on matching credentials, `None` otherwise.
pub async fn log_in<R: BufRead, W: Write>(
    db: &Database,
    console: &mut Console<R, W>,
) -> CommandResult<Option<Session>> {
    let login = console.prompt("Enter login")?;
    let password = console.prompt("Enter password")?;

    match db.users().find(&login).await? {
        Some(user) if verify_password(&password, &user.password) => {
            info!(login = %user.login, role = %user.role, "Logged in");
            console.say(format!("Welcome, {}!", user.login))?;
            Ok(Some(Session::new(user.login)))
        }
        _ => {
            warn!(login = %login, "Login rejected");
            console.say("Invalid login or password.")?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use rental_db::DbConfig;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        create_user(&db, &mut console("amy\nsecret\nTetris\n\n"))
            .await
            .unwrap();

        let user = db.users().find("amy").await.unwrap().unwrap();
        assert_eq!(user.role, Role::Customer);
        assert_ne!(user.password, "secret");
        assert_eq!(user.phone_number, None);

        let session = log_in(&db, &mut console("amy\nsecret\n")).await.unwrap();
        assert_eq!(session, Some(Session::new("amy")));

        let session = log_in(&db, &mut console("amy\nwrong\n")).await.unwrap();
        assert_eq!(session, None);
    }

    #[tokio::test]
    async fn test_signup_validation_and_duplicates() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = create_user(&db, &mut console("bad login\npw\n\n\n"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        create_user(&db, &mut console("amy\npw\n\n\n")).await.unwrap();
        let err = create_user(&db, &mut console("amy\npw\n\n\n"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("already exists"));
    }
}
