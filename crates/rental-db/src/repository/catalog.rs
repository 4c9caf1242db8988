//! # Catalog Repository
//!
//! Browse, filter and maintain the games the store rents out.
//!
//! ## Queries
//! ```text
//! CatalogQuery { filter, sort }
//!     filter: None           → every game
//!             GameId(id)     → WHERE game_id = ?
//!             Genre(g)       → WHERE genre = ?
//!             MaxPrice(m)    → WHERE price_cents <= ?
//!     sort:   Unsorted       → ORDER BY game_id
//!             Ascending      → ORDER BY price_cents ASC, game_id
//!             Descending     → ORDER BY price_cents DESC, game_id
//! ```

use rental_core::validation::validate_price_cents;
use rental_core::{
    CatalogFilter, CatalogItem, CatalogQuery, CatalogUpdate, CoreError, NewCatalogItem, PriceSort,
};
use sqlx::QueryBuilder;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::executor::{execute, fetch_optional};
use crate::pool::{Backend, DbPool};
use crate::statement::{Statement, UpdateStatement};

const CATALOG_SELECT: &str = "SELECT game_id, game_name, genre, price_cents FROM catalog";

/// Repository for catalog operations.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: DbPool,
}

impl CatalogRepository {
    pub fn new(pool: DbPool) -> Self {
        CatalogRepository { pool }
    }

    /// Lists catalog entries matching `query`.
    ///
    /// An empty result is not an error.
    pub async fn search(&self, query: &CatalogQuery) -> DbResult<Vec<CatalogItem>> {
        debug!(filter = ?query.filter, sort = ?query.sort, "Searching catalog");

        let mut builder: QueryBuilder<'_, Backend> = QueryBuilder::new(CATALOG_SELECT);

        match &query.filter {
            None => {}
            Some(CatalogFilter::GameId(id)) => {
                builder.push(" WHERE game_id = ").push_bind(id.clone());
            }
            Some(CatalogFilter::Genre(genre)) => {
                builder.push(" WHERE genre = ").push_bind(genre.clone());
            }
            Some(CatalogFilter::MaxPrice(max)) => {
                builder.push(" WHERE price_cents <= ").push_bind(max.cents());
            }
        }

        builder.push(match query.sort {
            PriceSort::Unsorted => " ORDER BY game_id",
            PriceSort::Ascending => " ORDER BY price_cents ASC, game_id",
            PriceSort::Descending => " ORDER BY price_cents DESC, game_id",
        });

        let items = builder
            .build_query_as::<CatalogItem>()
            .fetch_all(&self.pool)
            .await?;

        debug!(count = items.len(), "Catalog search complete");
        Ok(items)
    }

    /// Gets one game by id.
    pub async fn get(&self, game_id: &str) -> DbResult<Option<CatalogItem>> {
        let stmt = Statement::new(format!("{CATALOG_SELECT} WHERE game_id = $1")).bind(game_id);
        fetch_optional(&self.pool, &stmt).await
    }

    /// Adds a game to the catalog.
    ///
    /// ## Errors
    /// - `DbError::UniqueViolation` when the game id is already listed
    /// - `DbError::Core` when the price is out of range
    pub async fn add(&self, item: &NewCatalogItem) -> DbResult<()> {
        validate_price_cents(item.price.cents())?;

        let stmt = Statement::new(
            "INSERT INTO catalog (game_id, game_name, genre, price_cents) VALUES ($1, $2, $3, $4)",
        )
        .bind(&item.game_id)
        .bind(&item.game_name)
        .bind(&item.genre)
        .bind(item.price);

        execute(&self.pool, &stmt).await.map_err(|e| match e {
            DbError::UniqueViolation { .. } => DbError::duplicate("game_id", &item.game_id),
            other => other,
        })?;

        info!(game_id = %item.game_id, price = %item.price, "Game added to catalog");
        Ok(())
    }

    /// Changes name, genre or price of a listed game.
    ///
    /// ## Errors
    /// - `CoreError::NoUpdates` when the set is empty
    /// - `DbError::Core` when the new price is out of range
    /// - `DbError::NotFound` when the game is not listed
    pub async fn update(&self, game_id: &str, update: &CatalogUpdate) -> DbResult<u64> {
        if let Some(price) = update.price {
            validate_price_cents(price.cents())?;
        }

        let stmt = UpdateStatement::new("catalog")
            .set_opt("game_name", update.game_name.clone())
            .set_opt("genre", update.genre.clone())
            .set_opt("price_cents", update.price)
            .filter("game_id", game_id)
            .build()
            .ok_or(CoreError::NoUpdates)?;

        let rows = execute(&self.pool, &stmt).await?;
        if rows == 0 {
            return Err(DbError::not_found("Game", game_id));
        }

        info!(game_id = %game_id, "Catalog entry updated");
        Ok(rows)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
