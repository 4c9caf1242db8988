//! # User Repository
//!
//! Accounts: signup, lookup, role lookup for the authorization guard, and
//! the two update paths (self-service profile, manager user edit).
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  Who writes which columns                                            │
//! │                                                                      │
//! │  column              signup   update_profile   update_user (mgr)     │
//! │  ──────────────────  ───────  ───────────────  ─────────────────     │
//! │  password            ✅       ✅                                      │
//! │  role                ✅                         ✅                    │
//! │  favorite_games      ✅       ✅                ✅                    │
//! │  phone_number        ✅       ✅                ✅                    │
//! │  num_overdue_games   0                          ✅                    │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```

use rental_core::{CoreError, NewUser, ProfileUpdate, Role, User, UserUpdate};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::executor::{execute, fetch_optional};
use crate::pool::DbPool;
use crate::statement::{Statement, UpdateStatement};

const USER_COLUMNS: &str =
    "login, password, role, favorite_games, phone_number, num_overdue_games";

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: DbPool,
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        UserRepository { pool }
    }

    /// Creates an account with zero overdue games.
    ///
    /// ## Errors
    /// `DbError::UniqueViolation` when the login is taken.
    pub async fn create(&self, user: &NewUser) -> DbResult<()> {
        debug!(login = %user.login, role = %user.role, "Creating user");

        let stmt = Statement::new(
            "INSERT INTO users (login, password, role, favorite_games, phone_number, num_overdue_games) \
             VALUES ($1, $2, $3, $4, $5, 0)",
        )
        .bind(&user.login)
        .bind(&user.password)
        .bind(user.role)
        .bind(user.favorite_games.clone())
        .bind(user.phone_number.clone());

        execute(&self.pool, &stmt).await.map_err(|e| match e {
            DbError::UniqueViolation { .. } => DbError::duplicate("login", &user.login),
            other => other,
        })?;

        info!(login = %user.login, "User created");
        Ok(())
    }

    /// Gets a user by login.
    ///
    /// ## Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No such login
    /// * `Err(QueryFailed)` - Stored role is not a known role
    pub async fn find(&self, login: &str) -> DbResult<Option<User>> {
        let stmt = Statement::new(format!("SELECT {USER_COLUMNS} FROM users WHERE login = $1"))
            .bind(login);

        fetch_optional(&self.pool, &stmt).await
    }

    /// Looks up the role of `login`.
    ///
    /// A stored value that is not one of the three roles is an error, never
    /// a default role.
    pub async fn role_of(&self, login: &str) -> DbResult<Option<Role>> {
        let stmt = Statement::new("SELECT role FROM users WHERE login = $1").bind(login);

        let row: Option<(String,)> = fetch_optional(&self.pool, &stmt).await?;

        match row {
            None => Ok(None),
            Some((role,)) => role
                .parse::<Role>()
                .map(Some)
                .map_err(|_| DbError::Core(CoreError::InvalidRole(role))),
        }
    }

    /// Applies a self-service profile edit.
    ///
    /// ## Errors
    /// - `CoreError::NoUpdates` when the set is empty (nothing is executed)
    /// - `DbError::NotFound` when the login has no row
    pub async fn update_profile(&self, login: &str, update: &ProfileUpdate) -> DbResult<u64> {
        let stmt = UpdateStatement::new("users")
            .set_opt("password", update.password.clone())
            .set_opt("favorite_games", update.favorite_games.clone())
            .set_opt("phone_number", update.phone_number.clone())
            .filter("login", login)
            .build()
            .ok_or(CoreError::NoUpdates)?;

        self.apply(login, &stmt).await
    }

    /// Applies a manager edit of any account.
    pub async fn update_user(&self, login: &str, update: &UserUpdate) -> DbResult<u64> {
        let stmt = UpdateStatement::new("users")
            .set_opt("role", update.role)
            .set_opt("num_overdue_games", update.num_overdue_games)
            .set_opt("favorite_games", update.favorite_games.clone())
            .set_opt("phone_number", update.phone_number.clone())
            .filter("login", login)
            .build()
            .ok_or(CoreError::NoUpdates)?;

        self.apply(login, &stmt).await
    }

    async fn apply(&self, login: &str, stmt: &Statement) -> DbResult<u64> {
        let rows = execute(&self.pool, stmt).await?;

        if rows == 0 {
            return Err(DbError::not_found("User", login));
        }

        info!(login = %login, rows, "User updated");
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

    async fn db_with_user(login: &str, role: Role) -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.users()
            .create(&NewUser {
                login: login.to_string(),
                password: "pw".to_string(),
                role,
                favorite_games: Some("Tetris".to_string()),
                phone_number: None,
            })
            .await
            .unwrap();
        db
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let db = db_with_user("amy", Role::Customer).await;

        let user = db.users().find("amy").await.unwrap().unwrap();
        assert_eq!(user.role, Role::Customer);
        assert_eq!(user.num_overdue_games, 0);
        assert_eq!(user.favorite_games.as_deref(), Some("Tetris"));
        assert_eq!(user.phone_number, None);

        assert!(db.users().find("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_login_rejected() {
        let db = db_with_user("amy", Role::Customer).await;

        let err = db
            .users()
            .create(&NewUser {
                login: "amy".to_string(),
                password: "other".to_string(),
                role: Role::Customer,
                favorite_games: None,
                phone_number: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { ref field, .. } if field == "login"));
    }

    #[tokio::test]
    async fn test_role_lookup() {
        let db = db_with_user("boss", Role::Manager).await;

        assert_eq!(db.users().role_of("boss").await.unwrap(), Some(Role::Manager));
        assert_eq!(db.users().role_of("ghost").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unknown_stored_role_is_an_error() {
        let db = db_with_user("amy", Role::Customer).await;
        execute(
            db.pool(),
            &Statement::new("UPDATE users SET role = $1 WHERE login = $2")
                .bind("superuser")
                .bind("amy"),
        )
        .await
        .unwrap();

        let err = db.users().role_of("amy").await.unwrap_err();
        assert!(matches!(err, DbError::Core(CoreError::InvalidRole(_))));
        assert!(db.users().find("amy").await.is_err());
    }

    #[tokio::test]
    async fn test_legacy_capitalized_role_is_accepted() {
        let db = db_with_user("eve", Role::Customer).await;
        execute(
            db.pool(),
            &Statement::new("UPDATE users SET role = 'Employee' WHERE login = $1").bind("eve"),
        )
        .await
        .unwrap();

        assert_eq!(db.users().role_of("eve").await.unwrap(), Some(Role::Employee));
    }

    #[tokio::test]
    async fn test_profile_update_touches_only_supplied_fields() {
        let db = db_with_user("amy", Role::Customer).await;

        let rows = db
            .users()
            .update_profile(
                "amy",
                &ProfileUpdate {
                    phone_number: Some("951-555-0100".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(rows, 1);

        let user = db.users().find("amy").await.unwrap().unwrap();
        assert_eq!(user.phone_number.as_deref(), Some("951-555-0100"));
        assert_eq!(user.favorite_games.as_deref(), Some("Tetris"));
        assert_eq!(user.password, "pw");
    }

    #[tokio::test]
    async fn test_empty_update_is_rejected_before_the_database() {
        let db = db_with_user("amy", Role::Customer).await;
        db.close().await;

        // The pool is closed: reaching the database would yield ConnectionFailed.
        let err = db
            .users()
            .update_profile("amy", &ProfileUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Core(CoreError::NoUpdates)));

        let err = db
            .users()
            .update_user("amy", &UserUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Core(CoreError::NoUpdates)));
    }

    #[tokio::test]
    async fn test_manager_user_update() {
        let db = db_with_user("amy", Role::Customer).await;

        db.users()
            .update_user(
                "amy",
                &UserUpdate {
                    role: Some(Role::Employee),
                    num_overdue_games: Some(3),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let user = db.users().find("amy").await.unwrap().unwrap();
        assert_eq!(user.role, Role::Employee);
        assert_eq!(user.num_overdue_games, 3);
        assert_eq!(user.favorite_games.as_deref(), Some("Tetris"));
    }

    #[tokio::test]
    async fn test_update_of_missing_user_is_not_found() {
        let db = db_with_user("amy", Role::Customer).await;

        let err = db
            .users()
            .update_user(
                "ghost",
                &UserUpdate {
                    num_overdue_games: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
