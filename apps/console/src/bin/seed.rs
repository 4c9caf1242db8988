//! # Seed Data Generator
//!
//! Populates a store database with staff accounts and a starter catalog.
//!
//! ## Usage
//! ```bash
//! # Seed ./rentals.db
//! cargo run -p rental-console --bin seed -- rentals 5432 store
//!
//! # Different data directory
//! RENTAL_DATA_DIR=./data cargo run -p rental-console --bin seed -- rentals 5432 store
//! ```
//!
//! ## Generated Data
//! - `manager` / `manager` (manager) and `employee` / `employee` (employee)
//! - A catalog of games across several genres, ids `G1`, `G2`, ...
//!
//! Seeding is skipped when the catalog already has games.

use anyhow::Context;
use clap::Parser;
use rental_console::auth::hash_password;
use rental_console::cli::Args;
use rental_console::config::RentalConfig;
use rental_core::{CatalogQuery, Money, NewCatalogItem, NewUser, PriceSort, Role};
use rental_db::{Database, DbError};

/// Games for realistic test data: (name, genre, price in cents)
const GAMES: &[(&str, &str, i64)] = &[
    ("Space Miner", "Action", 999),
    ("Dungeon Deep", "RPG", 1499),
    ("Farm Life", "Simulation", 450),
    ("Kart Rally", "Racing", 799),
    ("Block Drop", "Puzzle", 299),
    ("Star Legion", "Strategy", 1299),
    ("Shadow Blade", "Action", 1199),
    ("Hoop Stars", "Sports", 699),
    ("Haunted Manor", "Horror", 899),
    ("Sky Quest", "RPG", 1999),
    ("Word Garden", "Puzzle", 199),
    ("Pit Lane", "Racing", 1099),
];

/// Staff accounts: (login, role)
const STAFF: &[(&str, Role)] = &[("manager", Role::Manager), ("employee", Role::Employee)];

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = RentalConfig::load(&args)?;
    let db_config = config.db_config();

    println!("🌱 Game Rental Seed Data Generator");
    println!("==================================");
    println!("Database: {}", db_config.describe());
    println!();

    let db = Database::new(db_config)
        .await
        .context("Could not connect to the database")?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    for (login, role) in STAFF {
        let result = db
            .users()
            .create(&NewUser {
                login: login.to_string(),
                password: hash_password(login)?,
                role: *role,
                favorite_games: None,
                phone_number: None,
            })
            .await;

        match result {
            Ok(()) => println!("✓ Created {} account '{}'", role, login),
            Err(DbError::UniqueViolation { .. }) => println!("  Account '{}' already exists", login),
            Err(e) => return Err(e.into()),
        }
    }

    let existing = db.catalog().search(&CatalogQuery::all()).await?;
    if !existing.is_empty() {
        println!("⚠ Catalog already has {} games", existing.len());
        println!("  Skipping catalog seed to avoid duplicates.");
        return Ok(());
    }

    println!();
    println!("Generating catalog...");

    for (index, (name, genre, cents)) in GAMES.iter().enumerate() {
        let item = NewCatalogItem {
            game_id: format!("G{}", index + 1),
            game_name: name.to_string(),
            genre: genre.to_string(),
            price: Money::from_cents(*cents),
        };

        if let Err(e) = db.catalog().add(&item).await {
            eprintln!("Failed to insert {}: {}", item.game_id, e);
        }
    }

    let rpg = db
        .catalog()
        .search(&CatalogQuery::by_genre("RPG", PriceSort::Ascending))
        .await?;
    println!("✓ Generated {} games", GAMES.len());
    println!("  Genre 'RPG': {} games", rpg.len());

    db.close().await;
    println!();
    println!("✓ Seed complete!");

    Ok(())
}
