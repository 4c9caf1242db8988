//! Self-service profile commands.

use std::io::{BufRead, Write};

use rental_core::validation::{validate_favorite_games, validate_password, validate_phone_number};
use rental_core::{Capability, ProfileUpdate};
use rental_db::Database;

use super::CommandResult;
use crate::auth::hash_password;
use crate::console::Console;
use crate::error::ApiError;
use crate::formatting::format_record;
use crate::guard::{authorize, Session};

pub async fn view_profile<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    console: &mut Console<R, W>,
) -> CommandResult {
    authorize(db, session, Capability::SelfOnly).await?;

    let user = db
        .users()
        .find(&session.login)
        .await?
        .ok_or_else(|| ApiError::not_found("User", &session.login))?;

    console.say(format_record(&user))?;
    Ok(())
}

pub async fn update_profile<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    console: &mut Console<R, W>,
) -> CommandResult {
    authorize(db, session, Capability::SelfOnly).await?;

    let mut update = ProfileUpdate::default();

    if let Some(password) = console.optional("New password (blank to keep)")? {
        validate_password(&password)?;
        update.password = Some(hash_password(&password)?);
    }
    if let Some(favorites) = console.optional("New favorite games (blank to keep)")? {
        validate_favorite_games(&favorites)?;
        update.favorite_games = Some(favorites);
    }
    if let Some(phone) = console.optional("New phone number (blank to keep)")? {
        validate_phone_number(&phone)?;
        update.phone_number = Some(phone);
    }

    db.users().update_profile(&session.login, &update).await?;
    console.say("Profile updated.")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::verify_password;
    use crate::error::ErrorCode;
    use rental_core::{NewUser, Role};
    use rental_db::DbConfig;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    async fn db_with_amy() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.users()
            .create(&NewUser {
                login: "amy".to_string(),
                password: "pw".to_string(),
                role: Role::Customer,
                favorite_games: Some("Tetris".to_string()),
                phone_number: None,
            })
            .await
            .unwrap();
        db
    }

    #[tokio::test]
    async fn test_view_profile() {
        let db = db_with_amy().await;
        let mut c = console("");

        view_profile(&db, &Session::new("amy"), &mut c).await.unwrap();

        let out = String::from_utf8(c.into_output()).unwrap();
        assert!(out.contains("Tetris"));
        assert!(out.contains("customer"));
    }

    #[tokio::test]
    async fn test_update_password_is_hashed() {
        let db = db_with_amy().await;

        update_profile(&db, &Session::new("amy"), &mut console("newpw\n\n\n"))
            .await
            .unwrap();

        let user = db.users().find("amy").await.unwrap().unwrap();
        assert!(verify_password("newpw", &user.password));
        assert_eq!(user.favorite_games.as_deref(), Some("Tetris"));
    }

    #[tokio::test]
    async fn test_blank_answers_are_no_updates() {
        let db = db_with_amy().await;

        let err = update_profile(&db, &Session::new("amy"), &mut console("\n\n\n"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NoUpdates);
    }
}
