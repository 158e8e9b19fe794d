//! # Seed Data Generator
//!
//! Populates the database with demo receipts for development.
//!
//! ## Usage
//! ```bash
//! # Generate 50 receipts (default)
//! cargo run -p shrinkshield-db --bin seed
//!
//! # Generate custom amount into a specific file
//! cargo run -p shrinkshield-db --bin seed -- --count 500 --db ./data/shrinkshield.db
//! ```
//!
//! Each receipt gets a header line, 3-8 product lines built from the
//! catalogue below, and a total line. Product lines go through the same
//! parse → normalize → unit price path as real uploads, so some sizes
//! ("6-Pack", "12 ct") are deliberately unparseable.

use std::env;

use shrinkshield_core::line::parse_line_items;
use shrinkshield_core::NewReceipt;
use shrinkshield_db::{Database, DbConfig};
use tracing_subscriber::EnvFilter;

/// Product names for realistic receipt lines
const PRODUCTS: &[&str] = &[
    "Distilled Water",
    "Sparkling Water",
    "Orange Juice",
    "Apple Juice",
    "Whole Milk",
    "Oat Milk",
    "Cola",
    "Lemonade",
    "Iced Tea",
    "Olive Oil",
    "Dish Soap",
    "Shampoo",
    "Eggs",
    "Bananas",
];

/// Size variants, including ones the normalizer rejects
const SIZES: &[&str] = &[
    "1 L", "2 L", "500 mL", "355 ml", "1.5L", "12 oz", "16 OZ", "750ml", "6-Pack", "12 ct", "",
];

const STORES: &[&str] = &["FRESH MART #12", "CORNER GROCER", "VALUE FOODS"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args: Vec<String> = env::args().collect();

    let mut count: usize = 50;
    let mut db_path = String::from("./shrinkshield_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(50);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("ShrinkShield Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of receipts to generate (default: 50)");
                println!("  -d, --db <PATH>    Database file path (default: ./shrinkshield_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 ShrinkShield Seed Data Generator");
    println!("===================================");
    println!("Database: {}", db_path);
    println!("Receipts: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database, migrations applied");

    let existing = db.receipts().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} receipts", existing);
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    let start = std::time::Instant::now();
    let mut products = 0usize;
    let mut unit_priced = 0usize;

    for seed in 0..count {
        let lines = generate_receipt_lines(seed);
        let items: Vec<_> = parse_line_items(lines.iter().map(String::as_str))
            .into_iter()
            .map(|item| item.enrich())
            .collect();

        products += items.len();
        unit_priced += items.iter().filter(|i| i.unit_price_per_ml.is_some()).count();

        let text_len: usize = lines.iter().map(|l| l.len() + 1).sum();
        let new_receipt = NewReceipt {
            user_id: None,
            filename: format!("seed-{:04}.txt", seed),
            content_type: "text/plain".to_string(),
            byte_size: text_len as i64,
            ocr_engine: "seed".to_string(),
        };

        if let Err(e) = db.receipts().ingest(new_receipt, &lines, &items).await {
            eprintln!("Failed to insert receipt {}: {}", seed, e);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} receipts in {:?}", count, elapsed);
    println!("  Product lines: {}", products);
    println!("  With unit price: {}", unit_priced);
    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Builds the text lines of one demo receipt.
fn generate_receipt_lines(seed: usize) -> Vec<String> {
    let mut lines = vec![STORES[seed % STORES.len()].to_string()];

    let item_count = 3 + seed % 6;
    let mut total_cents = 0usize;

    for n in 0..item_count {
        let k = seed * 31 + n * 7;
        let name = PRODUCTS[k % PRODUCTS.len()];
        let size = SIZES[(k / 3) % SIZES.len()];
        let price_cents = 99 + (k * 137) % 900;
        total_cents += price_cents;

        let line = if size.is_empty() {
            format!("{} {}.{:02}", name, price_cents / 100, price_cents % 100)
        } else {
            format!("{} {} {}.{:02}", name, size, price_cents / 100, price_cents % 100)
        };
        lines.push(line);
    }

    lines.push(format!("TOTAL ${}.{:02}", total_cents / 100, total_cents % 100));
    lines
}
