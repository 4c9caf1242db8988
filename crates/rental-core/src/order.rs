//! # Order Drafting and Pricing
//!
//! The in-memory side of checkout: lines are collected into an
//! [`OrderDraft`], priced against catalog prices read at placement time,
//! and stamped with the rental period.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Checkout                                       │
//! │                                                                         │
//! │  prompt (game, qty) ──► add_line ──► draft.lines (merged by game id)   │
//! │        ▲                   │                                            │
//! │        └── unknown game ───┘ reported, loop continues                   │
//! │                                                                         │
//! │  "done" ──► price_with(catalog lookup) ──► PricedOrder { total, units } │
//! │                                                                         │
//! │  order_timestamp(now) ──► due_date = timestamp + RENTAL_PERIOD_DAYS    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::{validate_game_id, validate_quantity};
use crate::{MAX_ITEM_QUANTITY, RENTAL_PERIOD_DAYS};

// =============================================================================
// Draft
// =============================================================================

/// One distinct game in a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub game_id: String,
    pub quantity: i32,
}

/// The lines collected before an order is placed.
///
/// ## Invariants
/// - Game ids are unique (adding the same game again sums the quantity)
/// - Every quantity is within `1..=MAX_ITEM_QUANTITY`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    lines: Vec<OrderLine>,
}

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` units of `game_id`, merging with an existing line.
    ///
    /// On error the draft is left unchanged.
    pub fn add_line(&mut self, game_id: &str, quantity: i64) -> CoreResult<()> {
        let game_id = game_id.trim();
        validate_game_id(game_id)?;
        validate_quantity(quantity)?;

        if let Some(line) = self.lines.iter_mut().find(|l| l.game_id == game_id) {
            let merged = line.quantity as i64 + quantity;
            if merged > MAX_ITEM_QUANTITY {
                return Err(ValidationError::OutOfRange {
                    field: "quantity".to_string(),
                    min: 1,
                    max: MAX_ITEM_QUANTITY,
                }
                .into());
            }
            line.quantity = merged as i32;
            return Ok(());
        }

        self.lines.push(OrderLine {
            game_id: game_id.to_string(),
            quantity: quantity as i32,
        });
        Ok(())
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct games.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines.
    pub fn total_units(&self) -> i32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Prices every line with `price_of`, which returns `None` for a game
    /// that is not in the catalog.
    ///
    /// ## Errors
    /// - [`CoreError::EmptyOrder`] when the draft has no lines
    /// - [`CoreError::UnknownGame`] for the first line without a price
    /// - [`CoreError::Validation`] when a line or the total overflows
    pub fn price_with<F>(&self, price_of: F) -> CoreResult<PricedOrder>
    where
        F: Fn(&str) -> Option<Money>,
    {
        if self.lines.is_empty() {
            return Err(CoreError::EmptyOrder);
        }

        let lines = self
            .lines
            .iter()
            .map(|line| {
                let unit_price = price_of(&line.game_id)
                    .ok_or_else(|| CoreError::UnknownGame(line.game_id.clone()))?;
                let line_total = unit_price
                    .multiply_quantity(i64::from(line.quantity))
                    .ok_or_else(total_too_large)?;
                Ok(PricedLine {
                    game_id: line.game_id.clone(),
                    quantity: line.quantity,
                    unit_price,
                    line_total,
                })
            })
            .collect::<CoreResult<Vec<_>>>()?;

        let total = lines.iter().try_fold(Money::zero(), |total, l| {
            total.checked_add(l.line_total).ok_or_else(total_too_large)
        })?;

        Ok(PricedOrder {
            total,
            units: self.total_units(),
            lines,
        })
    }
}

fn total_too_large() -> CoreError {
    ValidationError::invalid_format("order total", "amount is too large").into()
}

// =============================================================================
// Priced Order
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedLine {
    pub game_id: String,
    pub quantity: i32,
    pub unit_price: Money,
    pub line_total: Money,
}

/// A draft with catalog prices applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedOrder {
    pub lines: Vec<PricedLine>,
    /// Σ(unit price × quantity).
    pub total: Money,
    /// Total units, stored as `no_of_games`.
    pub units: i32,
}

// =============================================================================
// Rental Period
// =============================================================================

/// Normalizes `now` to the precision every supported engine stores.
pub fn order_timestamp(now: DateTime<Utc>) -> DateTime<Utc> {
    now.trunc_subsecs(6)
}

/// Due date of an order placed at `ordered_at`.
///
/// ## Example
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use rental_core::order::due_date;
///
/// let placed = Utc.with_ymd_and_hms(2026, 1, 28, 9, 0, 0).unwrap();
/// assert_eq!(due_date(placed), Utc.with_ymd_and_hms(2026, 2, 4, 9, 0, 0).unwrap());
/// ```
pub fn due_date(ordered_at: DateTime<Utc>) -> DateTime<Utc> {
    ordered_at + Duration::days(RENTAL_PERIOD_DAYS)
}

// =============================================================================
// Unit Tests
// =============================================================================
