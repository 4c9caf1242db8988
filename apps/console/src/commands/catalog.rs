//! # Catalog Commands
//!
//! ```text
//! View Catalog (any account)
//!   1. Genre        → genre, then "Sort by price (ASC/DESC)"
//!   2. Price        → maximum price, then sort
//!   3. Game ID      → exact id
//!   4. All games
//!
//! Update Catalog / Add Game (manager only)
//! ```

use std::io::{BufRead, Write};

use rental_core::validation::{validate_game_id, validate_game_name, validate_genre};
use rental_core::{Capability, CatalogQuery, CatalogUpdate, Money, NewCatalogItem, PriceSort};
use rental_db::Database;
use tracing::info;

use super::CommandResult;
use crate::console::Console;
use crate::formatting::format_rows;
use crate::guard::{authorize, Session};

pub async fn view_catalog<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    console: &mut Console<R, W>,
) -> CommandResult {
    authorize(db, session, Capability::SelfOnly).await?;

    console.say("How would you like to view the catalog?")?;
    console.say("1. Genre")?;
    console.say("2. Price")?;
    console.say("3. Search Game ID")?;
    console.say("4. All games")?;

    let Some(choice) = console.read_choice()? else {
        return Ok(());
    };

    let query = match choice {
        1 => {
            let genre = console.prompt("Enter genre")?;
            validate_genre(&genre)?;
            let sort = PriceSort::parse(&console.prompt("Sort by price (ASC/DESC, blank for none)")?);
            CatalogQuery::by_genre(genre, sort)
        }
        2 => {
            let max = Money::parse(&console.prompt("Enter maximum price")?)?;
            let sort = PriceSort::parse(&console.prompt("Sort by price (ASC/DESC, blank for none)")?);
            CatalogQuery::by_max_price(max, sort)
        }
        3 => {
            let game_id = console.prompt("Enter game ID")?;
            validate_game_id(&game_id)?;
            CatalogQuery::by_game_id(game_id)
        }
        4 => CatalogQuery::all(),
        _ => {
            console.say("Invalid choice")?;
            return Ok(());
        }
    };

    let items = db.catalog().search(&query).await?;
    if items.is_empty() {
        console.say("No games match.")?;
    } else {
        console.say(format_rows(&items))?;
    }
    Ok(())
}

pub async fn update_catalog<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    console: &mut Console<R, W>,
) -> CommandResult {
    authorize(db, session, Capability::ManagerOnly).await?;

    let game_id = console.prompt("Enter game ID to update")?;
    validate_game_id(&game_id)?;

    let mut update = CatalogUpdate::default();

    if let Some(name) = console.optional("New game name (blank to keep)")? {
        validate_game_name(&name)?;
        update.game_name = Some(name);
    }
    if let Some(genre) = console.optional("New genre (blank to keep)")? {
        validate_genre(&genre)?;
        update.genre = Some(genre);
    }
    if let Some(price) = console.optional("New price (blank to keep)")? {
        update.price = Some(Money::parse(&price)?);
    }

    db.catalog().update(&game_id, &update).await?;

    info!(login = %session.login, game_id = %game_id, "Catalog updated");
    console.say("Catalog updated.")?;
    Ok(())
}

pub async fn add_game<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    console: &mut Console<R, W>,
) -> CommandResult {
    authorize(db, session, Capability::ManagerOnly).await?;

    let game_id = console.prompt("Enter game ID")?;
    validate_game_id(&game_id)?;

    let game_name = console.prompt("Enter game name")?;
    validate_game_name(&game_name)?;

    let genre = console.prompt("Enter genre")?;
    validate_genre(&genre)?;

    let price = Money::parse(&console.prompt("Enter price")?)?;

    db.catalog()
        .add(&NewCatalogItem {
            game_id: game_id.clone(),
            game_name,
            genre,
            price,
        })
        .await?;

    info!(login = %session.login, game_id = %game_id, "Game added");
    console.say(format!("Game {} added to the catalog.", game_id))?;
    Ok(())
}
