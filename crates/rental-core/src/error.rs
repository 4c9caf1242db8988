//! # Error Types
//!
//! Domain-specific error types for rental-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rental-core errors (this file)                                        │
//! │  ├── CoreError        - Domain rule failures                           │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  rental-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Console errors (in app)                                               │
//! │  └── ApiError         - What the menu prints                           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Console      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::auth::{Capability, Role};

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The acting login has no user row.
    ///
    /// ## When This Occurs
    /// - Session login was deleted behind our back
    /// - A manager names a login that does not exist
    #[error("User not found: {0}")]
    UnknownLogin(String),

    /// The acting user's role does not grant the required capability.
    #[error("{login} ({role}) is not allowed to perform an action requiring {required}")]
    Unauthorized {
        login: String,
        role: Role,
        required: Capability,
    },

    /// A game id is not in the catalog.
    #[error("Game not found in catalog: {0}")]
    UnknownGame(String),

    /// An order was submitted without any valid line.
    #[error("Order has no items")]
    EmptyOrder,

    /// An update request carried no fields.
    #[error("No updates were supplied")]
    NoUpdates,

    /// A stored or typed role is not one of the three known roles.
    #[error("Invalid role: '{0}'")]
    InvalidRole(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before any statement is built.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., non-numeric quantity, malformed price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::InvalidFormat`].
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::Unauthorized {
            login: "alice".to_string(),
            role: Role::Customer,
            required: Capability::ManagerOnly,
        };
        assert_eq!(
            err.to_string(),
            "alice (customer) is not allowed to perform an action requiring manager role"
        );

        assert_eq!(
            CoreError::UnknownGame("G9".to_string()).to_string(),
            "Game not found in catalog: G9"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "login".to_string(),
        };
        assert_eq!(err.to_string(), "login is required");

        let err = ValidationError::invalid_format("price", "expected a decimal amount");
        assert_eq!(
            err.to_string(),
            "price has invalid format: expected a decimal amount"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
