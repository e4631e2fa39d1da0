//! # Seed Data Generator
//!
//! Populates the database with sample restaurant products for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default development database
//! cargo run -p caisse-db --bin seed
//!
//! # Specify restaurant and database path
//! cargo run -p caisse-db --bin seed -- --db ./data/caisse.db --restaurant resto-1
//! ```
//!
//! Each product gets a UUID v4 id and a plausible starting stock level so
//! stock-purchase expenses have something to increment.

use chrono::Utc;
use std::env;
use tracing::info;
use uuid::Uuid;

use caisse_core::Product;
use caisse_db::{Database, DbConfig};

/// Catalog items typical of a small restaurant's operational stock.
const CATALOG: &[(&str, i64)] = &[
    ("Riz 25kg", 4),
    ("Huile 5L", 6),
    ("Poulet entier", 15),
    ("Poisson capitaine", 8),
    ("Tomates (cagette)", 3),
    ("Oignons (sac)", 2),
    ("Piment (kg)", 5),
    ("Farine 10kg", 3),
    ("Coca-Cola 33cl", 48),
    ("Fanta 33cl", 36),
    ("Eau minérale 1.5L", 60),
    ("Jus d'ananas 1L", 12),
    ("Bière locale 65cl", 24),
    ("Charbon (sac)", 2),
    ("Serviettes (paquet)", 10),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let db_path = arg_value(&args, "--db").unwrap_or_else(|| "./caisse.db".to_string());
    let restaurant_id = arg_value(&args, "--restaurant").unwrap_or_else(|| "resto-1".to_string());

    info!(db = %db_path, restaurant = %restaurant_id, "Seeding products");

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let products = db.products();
    let now = Utc::now();

    let mut inserted = 0usize;
    for (name, stock) in CATALOG {
        let product = Product {
            id: Uuid::new_v4().to_string(),
            restaurant_id: restaurant_id.clone(),
            name: (*name).to_string(),
            stock_quantity: *stock,
            created_at: now,
            updated_at: now,
        };
        products.insert(&product).await?;
        inserted += 1;
    }

    info!(inserted, "Seed complete");
    db.close().await;
    Ok(())
}

/// Returns the value following `flag` in the argument list, if any.
fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
