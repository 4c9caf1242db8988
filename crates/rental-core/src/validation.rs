//! # Validation Module
//!
//! Input validation for everything typed at the console.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Console prompt                                               │
//! │  ├── Trimming, empty answer = "leave unchanged"                        │
//! │  └── Integer parsing of menu choices                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Field rules (length, format, range)                               │
//! │  └── Numeric parsing (quantity, overdue count)                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database                                                     │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  ├── UNIQUE constraints (login, game_id)                               │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rental_core::validation::{parse_quantity, validate_login};
//!
//! validate_login("alice").unwrap();
//! assert_eq!(parse_quantity(" 3 ").unwrap(), 3);
//! ```

use crate::error::ValidationError;
use crate::{MAX_ITEM_QUANTITY, MAX_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_LOGIN_LEN: usize = 50;
const MAX_PASSWORD_LEN: usize = 128;
const MAX_GAME_ID_LEN: usize = 50;
const MAX_TEXT_LEN: usize = 200;
const MAX_FAVORITES_LEN: usize = 400;
const MAX_PHONE_LEN: usize = 20;

// =============================================================================
// String Validators
// =============================================================================

fn required(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    optional(field, value, max)
}

fn optional(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a login name.
///
/// ## Rules
/// - Must not be empty, at most 50 characters
/// - No whitespace inside the login
///
/// ## Example
/// ```rust
/// use rental_core::validation::validate_login;
///
/// assert!(validate_login("alice").is_ok());
/// assert!(validate_login("").is_err());
/// assert!(validate_login("al ice").is_err());
/// ```
pub fn validate_login(login: &str) -> ValidationResult<()> {
    required("login", login, MAX_LOGIN_LEN)?;

    if login.trim().chars().any(char::is_whitespace) {
        return Err(ValidationError::invalid_format(
            "login",
            "must not contain spaces",
        ));
    }

    Ok(())
}

pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }
    optional("password", password, MAX_PASSWORD_LEN)
}

/// Validates a catalog game id (`G1`, `ZELDA-BOTW`, ...).
///
/// Letters, digits, hyphens and underscores only, at most 50 characters.
pub fn validate_game_id(game_id: &str) -> ValidationResult<()> {
    required("game id", game_id, MAX_GAME_ID_LEN)?;

    if !game_id
        .trim()
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::invalid_format(
            "game id",
            "must contain only letters, numbers, hyphens, and underscores",
        ));
    }

    Ok(())
}

pub fn validate_game_name(name: &str) -> ValidationResult<()> {
    required("game name", name, MAX_TEXT_LEN)
}

pub fn validate_genre(genre: &str) -> ValidationResult<()> {
    required("genre", genre, MAX_TEXT_LEN)
}

pub fn validate_favorite_games(favorites: &str) -> ValidationResult<()> {
    optional("favorite games", favorites, MAX_FAVORITES_LEN)
}

/// Validates a phone number.
///
/// ## Rules
/// - At most 20 characters
/// - Digits plus `+ - ( ) .` and spaces, with at least one digit
///
/// ## Example
/// ```rust
/// use rental_core::validation::validate_phone_number;
///
/// assert!(validate_phone_number("(951) 555-0100").is_ok());
/// assert!(validate_phone_number("+44 20 7946 0958").is_ok());
/// assert!(validate_phone_number("call me").is_err());
/// ```
pub fn validate_phone_number(phone: &str) -> ValidationResult<()> {
    required("phone number", phone, MAX_PHONE_LEN)?;

    let phone = phone.trim();
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | '.' | ' '));

    if !allowed || !phone.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::invalid_format(
            "phone number",
            "must contain digits and only + - ( ) . or spaces",
        ));
    }

    Ok(())
}

/// Validates free-text tracking fields (status, location, courier, comments).
pub fn validate_tracking_text(field: &str, value: &str) -> ValidationResult<()> {
    required(field, value, MAX_TEXT_LEN)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Parses and validates a quantity typed at the order prompt.
///
/// ## User Workflow
/// ```text
/// "How many?" ──► "3"  ──► parse_quantity ──► Ok(3)
///                 "0"  ──►                ──► Err(MustBePositive)
///                 "x"  ──►                ──► Err(InvalidFormat)
/// ```
pub fn parse_quantity(input: &str) -> ValidationResult<i32> {
    let qty: i64 = input
        .trim()
        .parse()
        .map_err(|_| ValidationError::invalid_format("quantity", "must be a whole number"))?;

    validate_quantity(qty)?;

    // Bounded by MAX_ITEM_QUANTITY above.
    Ok(qty as i32)
}

/// Validates a price in cents. Zero is allowed, anything above
/// [`MAX_PRICE_CENTS`] is not.
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Parses a number-of-overdue-games answer. Must be a whole number ≥ 0.
pub fn parse_overdue_count(input: &str) -> ValidationResult<i32> {
    let count: i64 = input.trim().parse().map_err(|_| {
        ValidationError::invalid_format("number of overdue games", "must be a whole number")
    })?;

    if !(0..=i32::MAX as i64).contains(&count) {
        return Err(ValidationError::OutOfRange {
            field: "number of overdue games".to_string(),
            min: 0,
            max: i32::MAX as i64,
        });
    }

    Ok(count as i32)
}

// =============================================================================
// Identifier Validators
// =============================================================================

/// Validates a generated record id (rental order id, tracking id).
///
/// ## Example
/// ```rust
/// use rental_core::validation::validate_record_id;
///
/// assert!(validate_record_id("order id", "550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_record_id("order id", "not-a-uuid").is_err());
/// ```
pub fn validate_record_id(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    uuid::Uuid::parse_str(id.trim())
        .map_err(|_| ValidationError::invalid_format(field, "must be a valid UUID"))?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_login() {
        assert!(validate_login("alice").is_ok());
        assert!(validate_login("bob_99").is_ok());

        assert!(validate_login("").is_err());
        assert!(validate_login("   ").is_err());
        assert!(validate_login("two words").is_err());
        assert!(validate_login(&"a".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("hunter2").is_ok());
        assert!(validate_password(" spaced ").is_ok());
        assert!(validate_password("").is_err());
        assert!(validate_password(&"p".repeat(129)).is_err());
    }

    #[test]
    fn test_validate_game_id() {
        assert!(validate_game_id("G1").is_ok());
        assert!(validate_game_id("ZELDA-BOTW").is_ok());
        assert!(validate_game_id("").is_err());
        assert!(validate_game_id("G 1").is_err());
        assert!(validate_game_id("G1;DROP").is_err());
    }

    #[test]
    fn test_validate_phone_number() {
        assert!(validate_phone_number("951-555-0100").is_ok());
        assert!(validate_phone_number("").is_err());
        assert!(validate_phone_number("---").is_err());
        assert!(validate_phone_number("555-CALL-NOW").is_err());
        assert!(validate_phone_number(&"1".repeat(21)).is_err());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("1").unwrap(), 1);
        assert_eq!(parse_quantity(" 999 ").unwrap(), 999);

        assert!(matches!(
            parse_quantity("0"),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            parse_quantity("-2"),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            parse_quantity("1000"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            parse_quantity("two"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(parse_quantity("1.5").is_err());
    }

    #[test]
    fn test_parse_overdue_count() {
        assert_eq!(parse_overdue_count("0").unwrap(), 0);
        assert_eq!(parse_overdue_count("12").unwrap(), 12);
        assert!(parse_overdue_count("-1").is_err());
        assert!(parse_overdue_count("many").is_err());
        assert!(parse_overdue_count("99999999999").is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(999).is_ok());
        assert!(validate_price_cents(-1).is_err());
        assert!(validate_price_cents(MAX_PRICE_CENTS).is_ok());
        assert!(validate_price_cents(MAX_PRICE_CENTS + 1).is_err());
        assert!(validate_price_cents(i64::MAX).is_err());
    }

    #[test]
    fn test_validate_record_id() {
        assert!(validate_record_id("order id", "550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_record_id("order id", "").is_err());
        assert!(validate_record_id("tracking id", "123").is_err());
    }
}
