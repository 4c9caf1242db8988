//! # Parameterized Statements
//!
//! SQL text plus an ordered list of typed parameters. User input only ever
//! travels in [`SqlParam`] values; the SQL text is assembled from fixed
//! table and column names.
//!
//! ## Partial Updates
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UpdateStatement::new("tracking_info")                                  │
//! │      .set_opt("status", Some("Shipped"))        ──► counted field       │
//! │      .set_opt("courier_name", None)             ──► skipped             │
//! │      .touch("last_update_date", now)            ──► stamped, not counted│
//! │      .filter("tracking_id", id)                                         │
//! │      .build()                                                           │
//! │                                                                         │
//! │  ──► Some(UPDATE tracking_info SET status = $1, last_update_date = $2  │
//! │           WHERE tracking_id = $3)                                       │
//! │                                                                         │
//! │  No counted field ──► None (nothing is sent to the database)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `$N` placeholders are understood by both SQLite and PostgreSQL.

use chrono::{DateTime, Utc};
use rental_core::{Money, Role};

// =============================================================================
// Parameters
// =============================================================================

/// A bound statement parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Text(String),
    OptText(Option<String>),
    Int(i32),
    BigInt(i64),
    Timestamp(DateTime<Utc>),
}

impl From<String> for SqlParam {
    fn from(value: String) -> Self {
        SqlParam::Text(value)
    }
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        SqlParam::Text(value.to_string())
    }
}

impl From<&String> for SqlParam {
    fn from(value: &String) -> Self {
        SqlParam::Text(value.clone())
    }
}

impl From<Option<String>> for SqlParam {
    fn from(value: Option<String>) -> Self {
        SqlParam::OptText(value)
    }
}

impl From<i32> for SqlParam {
    fn from(value: i32) -> Self {
        SqlParam::Int(value)
    }
}

impl From<i64> for SqlParam {
    fn from(value: i64) -> Self {
        SqlParam::BigInt(value)
    }
}

impl From<DateTime<Utc>> for SqlParam {
    fn from(value: DateTime<Utc>) -> Self {
        SqlParam::Timestamp(value)
    }
}

/// Money is stored as cents.
impl From<Money> for SqlParam {
    fn from(value: Money) -> Self {
        SqlParam::BigInt(value.cents())
    }
}

/// Roles are stored as their lowercase name.
impl From<Role> for SqlParam {
    fn from(value: Role) -> Self {
        SqlParam::Text(value.as_str().to_string())
    }
}

// =============================================================================
// Statement
// =============================================================================

/// SQL text with its parameters, ready for [`crate::executor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    sql: String,
    params: Vec<SqlParam>,
}

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Statement {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Appends the next positional parameter.
    pub fn bind(mut self, param: impl Into<SqlParam>) -> Self {
        self.params.push(param.into());
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }
}

// =============================================================================
// Update Builder
// =============================================================================

/// Builds a single-table UPDATE covering exactly the supplied fields.
#[derive(Debug, Clone)]
pub struct UpdateStatement {
    table: &'static str,
    fields: Vec<(&'static str, SqlParam)>,
    stamps: Vec<(&'static str, SqlParam)>,
    filters: Vec<(&'static str, SqlParam)>,
}

impl UpdateStatement {
    pub fn new(table: &'static str) -> Self {
        UpdateStatement {
            table,
            fields: Vec::new(),
            stamps: Vec::new(),
            filters: Vec::new(),
        }
    }

    /// Sets `column` unconditionally.
    pub fn set(mut self, column: &'static str, value: impl Into<SqlParam>) -> Self {
        self.fields.push((column, value.into()));
        self
    }

    /// Sets `column` only when `value` is present.
    pub fn set_opt<V: Into<SqlParam>>(self, column: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(column, value),
            None => self,
        }
    }

    /// Stamps `column` with `at` whenever the statement is built. A stamp
    /// alone does not make an update.
    pub fn touch(mut self, column: &'static str, at: DateTime<Utc>) -> Self {
        self.stamps.push((column, SqlParam::Timestamp(at)));
        self
    }

    /// Adds an equality condition to the WHERE clause.
    pub fn filter(mut self, column: &'static str, value: impl Into<SqlParam>) -> Self {
        self.filters.push((column, value.into()));
        self
    }

    /// Number of supplied fields, stamps excluded.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Returns `None` when no field was supplied.
    pub fn build(self) -> Option<Statement> {
        if self.fields.is_empty() {
            return None;
        }

        let mut params = Vec::with_capacity(
            self.fields.len() + self.stamps.len() + self.filters.len(),
        );

        let mut placeholder = |param: SqlParam| {
            params.push(param);
            format!("${}", params.len())
        };

        let assignments = self
            .fields
            .into_iter()
            .chain(self.stamps)
            .map(|(column, param)| format!("{column} = {}", placeholder(param)))
            .collect::<Vec<_>>()
            .join(", ");

        let conditions = self
            .filters
            .into_iter()
            .map(|(column, param)| format!("{column} = {}", placeholder(param)))
            .collect::<Vec<_>>()
            .join(" AND ");

        let mut sql = format!("UPDATE {} SET {}", self.table, assignments);
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions);
        }

        Some(Statement { sql, params })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_statement_binds_in_order() {
        let stmt = Statement::new("SELECT * FROM users WHERE login = $1 AND role = $2")
            .bind("amy")
            .bind(Role::Manager);

        assert_eq!(
            stmt.params(),
            &[
                SqlParam::Text("amy".to_string()),
                SqlParam::Text("manager".to_string())
            ]
        );
    }

    #[test]
    fn test_update_covers_only_supplied_fields() {
        let now = Utc.with_ymd_and_hms(2026, 4, 2, 8, 0, 0).unwrap();
        let stmt = UpdateStatement::new("tracking_info")
            .set_opt("status", Some("Shipped".to_string()))
            .set_opt::<String>("current_location", None)
            .set_opt::<String>("courier_name", None)
            .touch("last_update_date", now)
            .filter("tracking_id", "t-1")
            .build()
            .unwrap();

        assert_eq!(
            stmt.sql(),
            "UPDATE tracking_info SET status = $1, last_update_date = $2 WHERE tracking_id = $3"
        );
        assert_eq!(stmt.params().len(), 3);
        assert_eq!(stmt.params()[1], SqlParam::Timestamp(now));
    }

    #[test]
    fn test_update_without_fields_builds_nothing() {
        let update = UpdateStatement::new("users")
            .set_opt::<String>("phone_number", None)
            .touch("last_update_date", Utc::now())
            .filter("login", "amy");

        assert_eq!(update.field_count(), 0);
        assert!(update.build().is_none());
    }

    #[test]
    fn test_user_input_never_reaches_sql_text() {
        let hostile = "x'; DROP TABLE users; --";
        let stmt = UpdateStatement::new("users")
            .set("favorite_games", hostile)
            .filter("login", hostile)
            .build()
            .unwrap();

        assert!(!stmt.sql().contains("DROP"));
        assert_eq!(stmt.params()[0], SqlParam::Text(hostile.to_string()));
    }

    #[test]
    fn test_money_binds_as_cents() {
        assert_eq!(
            SqlParam::from(Money::from_cents(999)),
            SqlParam::BigInt(999)
        );
    }
}
