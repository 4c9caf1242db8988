//! # Catalog Browsing Criteria
//!
//! At most one filter and an optional price sort per catalog query.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Menu choice        Filter                  Sort prompt      │
//! │  ─────────────────  ──────────────────────  ───────────────  │
//! │  1. Genre           CatalogFilter::Genre     ASC / DESC      │
//! │  2. Price           CatalogFilter::MaxPrice  ASC / DESC      │
//! │  3. Game ID         CatalogFilter::GameId    (none)          │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// The single filter dimension of a catalog query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogFilter {
    /// Exact game id.
    GameId(String),
    /// Exact genre.
    Genre(String),
    /// Price at or below this amount.
    MaxPrice(Money),
}

/// Ordering of catalog results by price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceSort {
    #[default]
    Unsorted,
    Ascending,
    Descending,
}

impl PriceSort {
    /// Interprets the answer to "Sort by price (ASC/DESC)".
    ///
    /// `asc` in any case sorts ascending, any other non-empty answer sorts
    /// descending, and an empty answer leaves the rows unsorted.
    ///
    /// ## Example
    /// ```rust
    /// use rental_core::catalog::PriceSort;
    ///
    /// assert_eq!(PriceSort::parse("Asc"), PriceSort::Ascending);
    /// assert_eq!(PriceSort::parse("desc"), PriceSort::Descending);
    /// assert_eq!(PriceSort::parse("whatever"), PriceSort::Descending);
    /// assert_eq!(PriceSort::parse("  "), PriceSort::Unsorted);
    /// ```
    pub fn parse(input: &str) -> Self {
        let input = input.trim();

        if input.is_empty() {
            PriceSort::Unsorted
        } else if input.eq_ignore_ascii_case("asc") {
            PriceSort::Ascending
        } else {
            PriceSort::Descending
        }
    }
}

/// A catalog query: optional filter plus sort.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub filter: Option<CatalogFilter>,
    pub sort: PriceSort,
}

impl CatalogQuery {
    /// Every game, unsorted.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_game_id(game_id: impl Into<String>) -> Self {
        CatalogQuery {
            filter: Some(CatalogFilter::GameId(game_id.into().trim().to_string())),
            sort: PriceSort::Unsorted,
        }
    }

    pub fn by_genre(genre: impl Into<String>, sort: PriceSort) -> Self {
        CatalogQuery {
            filter: Some(CatalogFilter::Genre(genre.into().trim().to_string())),
            sort,
        }
    }

    pub fn by_max_price(max: Money, sort: PriceSort) -> Self {
        CatalogQuery {
            filter: Some(CatalogFilter::MaxPrice(max)),
            sort,
        }
    }
}
