//! # Console Error Type
//!
//! Unified error type for menu handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Rental Console                     │
//! │                                                                         │
//! │  Handler: Result<(), ApiError>                                          │
//! │         │                                                               │
//! │         ├── DbError::QueryFailed("...")   ──┐  raw message logged       │
//! │         ├── CoreError::Unauthorized { .. } ─┼─► ApiError { code, msg }  │
//! │         └── ValidationError::Required     ──┘                           │
//! │                                               │                         │
//! │  Menu loop prints "Error: <msg>" and shows the menu again ◄─┘          │
//! │  Nothing is retried; the session continues.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use rental_core::{CoreError, ValidationError};
use rental_db::DbError;

/// Error reported to the person at the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error classes shown at the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Record does not exist
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Role does not grant the action
    Unauthorized,

    /// Statement failed
    DatabaseError,

    /// Engine unreachable
    ConnectionError,

    /// Update request carried no fields
    NoUpdates,

    /// Anything else
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to console errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => ApiError::new(
                ErrorCode::ValidationError,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                ApiError::new(ErrorCode::ValidationError, "Invalid reference")
            }
            DbError::CheckViolation { message } => {
                tracing::error!("Check constraint violation: {}", message);
                ApiError::new(ErrorCode::ValidationError, "Value rejected by the database")
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::ConnectionError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Migration failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::ConnectionError, "Database pool exhausted")
            }
            DbError::Core(e) => e.into(),
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to console errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownLogin(login) => ApiError::not_found("User", &login),
            CoreError::UnknownGame(id) => ApiError::not_found("Game", &id),
            e @ CoreError::Unauthorized { .. } => {
                ApiError::new(ErrorCode::Unauthorized, e.to_string())
            }
            CoreError::EmptyOrder => {
                ApiError::validation("No valid games were entered; nothing was ordered")
            }
            CoreError::NoUpdates => ApiError::new(ErrorCode::NoUpdates, "No updates were supplied"),
            e @ CoreError::InvalidRole(_) => ApiError::new(ErrorCode::DatabaseError, e.to_string()),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::internal(format!("Console I/O failed: {}", err))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rental_core::{Capability, Role};

    #[test]
    fn test_unauthorized_keeps_its_code() {
        let err: ApiError = CoreError::Unauthorized {
            login: "amy".to_string(),
            role: Role::Customer,
            required: Capability::ManagerOnly,
        }
        .into();

        assert_eq!(err.code, ErrorCode::Unauthorized);
        assert!(err.message.contains("manager role"));
    }

    #[test]
    fn test_wrapped_core_error_is_unwrapped() {
        let err: ApiError = DbError::Core(CoreError::NoUpdates).into();
        assert_eq!(err.code, ErrorCode::NoUpdates);
    }

    #[test]
    fn test_raw_query_error_is_not_shown() {
        let err: ApiError = DbError::QueryFailed("near \"SELEC\": syntax error".to_string()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("SELEC"));
    }

    #[test]
    fn test_not_found_message() {
        let err: ApiError = DbError::not_found("Game", "G9").into();
        assert_eq!(err, ApiError::not_found("Game", "G9"));
        assert_eq!(err.message, "Game not found: G9");
    }
}
