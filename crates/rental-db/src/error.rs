//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Engine Error (sqlx::Error)          Domain Error (CoreError)           │
//! │       │                                    │                            │
//! │       ▼                                    ▼                            │
//! │  DbError (this module) ◄───────────────────┘                            │
//! │       │   classifies constraint failures by kind, not by message text   │
//! │       ▼                                                                 │
//! │  ApiError (console) ← short message for the menu                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rental_core::{CoreError, ValidationError};
use sqlx::error::ErrorKind;
use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    ///
    /// ## When This Occurs
    /// - A lookup by key returns no row
    /// - An UPDATE affects zero rows
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation (duplicate login, duplicate game id).
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Foreign key constraint violation.
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// CHECK or NOT NULL constraint violation.
    #[error("Constraint violation: {message}")]
    CheckViolation { message: String },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Server unreachable or credentials rejected
    /// - SQLite file cannot be created
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Transaction could not be started or committed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// A domain rule failed while preparing a statement.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a UniqueViolation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound { .. })
    }
}

impl From<ValidationError> for DbError {
    fn from(err: ValidationError) -> Self {
        DbError::Core(err.into())
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound        → DbError::NotFound
/// sqlx::Error::Database (kind)    → Unique / ForeignKey / Check / QueryFailed
/// sqlx::Error::ColumnDecode       → DbError::QueryFailed (bad stored value)
/// sqlx::Error::PoolTimedOut       → DbError::PoolExhausted
/// sqlx::Error::Io / Tls / Closed  → DbError::ConnectionFailed
/// Other                           → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();

                match db_err.kind() {
                    ErrorKind::UniqueViolation => {
                        // SQLite: "UNIQUE constraint failed: users.login"
                        // PostgreSQL: constraint name, e.g. "users_pkey"
                        let field = db_err
                            .constraint()
                            .map(str::to_string)
                            .or_else(|| {
                                message
                                    .split("UNIQUE constraint failed: ")
                                    .nth(1)
                                    .map(str::to_string)
                            })
                            .unwrap_or_else(|| "unknown".to_string());
                        DbError::UniqueViolation {
                            field,
                            value: "unknown".to_string(),
                        }
                    }
                    ErrorKind::ForeignKeyViolation => DbError::ForeignKeyViolation { message },
                    ErrorKind::CheckViolation | ErrorKind::NotNullViolation => {
                        DbError::CheckViolation { message }
                    }
                    _ => DbError::QueryFailed(message),
                }
            }

            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                DbError::QueryFailed(err.to_string())
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::Configuration(_) => {
                DbError::ConnectionFailed(err.to_string())
            }

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: DbError = sqlx::Error::RowNotFound.into();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_core_errors_pass_through() {
        let err: DbError = CoreError::NoUpdates.into();
        assert!(matches!(err, DbError::Core(CoreError::NoUpdates)));
        assert_eq!(err.to_string(), "No updates were supplied");

        let err: DbError = ValidationError::Required {
            field: "login".to_string(),
        }
        .into();
        assert!(matches!(err, DbError::Core(CoreError::Validation(_))));
    }

    #[test]
    fn test_pool_errors() {
        let err: DbError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, DbError::PoolExhausted));

        let err: DbError = sqlx::Error::PoolClosed.into();
        assert!(matches!(err, DbError::ConnectionFailed(_)));
    }
}
