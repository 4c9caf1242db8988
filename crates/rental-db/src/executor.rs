//! # Statement Execution
//!
//! Runs a [`Statement`] against any executor of the selected backend: the
//! pool (`&DbPool`) or an open transaction (`&mut *tx`).
//!
//! ```text
//! read   fetch_all / fetch_optional ──► Vec<T> / Option<T>   (T: FromRow)
//! write  execute                    ──► rows affected
//! ```
//!
//! Engine rejections come back as [`DbError`](crate::DbError); the caller
//! reports them and moves on.

use sqlx::{Executor, FromRow};
use tracing::debug;

use crate::error::DbResult;
use crate::pool::{Backend, DbRow};
use crate::statement::{SqlParam, Statement};

macro_rules! bind_params {
    ($query:expr, $params:expr) => {{
        let mut query = $query;
        for param in $params {
            query = match param {
                SqlParam::Text(value) => query.bind(value.clone()),
                SqlParam::OptText(value) => query.bind(value.clone()),
                SqlParam::Int(value) => query.bind(*value),
                SqlParam::BigInt(value) => query.bind(*value),
                SqlParam::Timestamp(value) => query.bind(*value),
            };
        }
        query
    }};
}

/// Runs a write statement and returns the affected-row count.
pub async fn execute<'c, E>(executor: E, statement: &Statement) -> DbResult<u64>
where
    E: Executor<'c, Database = Backend>,
{
    debug!(sql = %statement.sql(), params = statement.params().len(), "Executing statement");

    let query = bind_params!(sqlx::query(statement.sql()), statement.params());
    let result = query.execute(executor).await?;

    debug!(rows_affected = result.rows_affected(), "Statement executed");
    Ok(result.rows_affected())
}

/// Runs a read statement and returns every row.
pub async fn fetch_all<'c, E, T>(executor: E, statement: &Statement) -> DbResult<Vec<T>>
where
    E: Executor<'c, Database = Backend>,
    T: for<'r> FromRow<'r, DbRow> + Send + Unpin,
{
    debug!(sql = %statement.sql(), params = statement.params().len(), "Fetching rows");

    let query = bind_params!(sqlx::query_as::<_, T>(statement.sql()), statement.params());
    let rows = query.fetch_all(executor).await?;

    debug!(count = rows.len(), "Rows fetched");
    Ok(rows)
}

/// Runs a read statement expected to match at most one row.
pub async fn fetch_optional<'c, E, T>(executor: E, statement: &Statement) -> DbResult<Option<T>>
where
    E: Executor<'c, Database = Backend>,
    T: for<'r> FromRow<'r, DbRow> + Send + Unpin,
{
    debug!(sql = %statement.sql(), params = statement.params().len(), "Fetching row");

    let query = bind_params!(sqlx::query_as::<_, T>(statement.sql()), statement.params());
    Ok(query.fetch_optional(executor).await?)
}

// =============================================================================
// Unit Tests
// =============================================================================
