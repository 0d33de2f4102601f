//! # Demo Data Seeder
//!
//! Writes the default catalog and discount codes to a database file and
//! fills the sales history with demo orders, so the reports screen has
//! something to show during development.
//!
//! ## Usage
//! ```bash
//! # 50 demo sales spread over the last 7 days (default)
//! cargo run -p brew-store --bin seed -- --db ./brew.db
//!
//! # Custom amount and spread
//! cargo run -p brew-store --bin seed -- --db ./brew.db --sales 200 --days 30
//! ```
//!
//! Demo orders cycle deterministically through the catalog, payment methods
//! and discount codes. Stock is decremented exactly as a real checkout would.

use chrono::{Duration, Local};
use clap::Parser;
use std::path::PathBuf;

use brew_core::{Cart, Catalog, DiscountBook, PaymentMethod, SalesLedger};
use brew_store::{Storage, StoreConfig, StoreResult};

#[derive(Debug, Parser)]
#[command(name = "seed", about = "Seed a Brew POS database with demo data")]
struct Args {
    /// Database file to write.
    #[arg(long, default_value = "brew.db")]
    db: PathBuf,

    /// Number of demo sales to generate.
    #[arg(long, default_value_t = 50)]
    sales: usize,

    /// Spread the demo sales over this many days, ending today.
    #[arg(long, default_value_t = 7)]
    days: i64,
}

const CODES: [Option<&str>; 5] = [None, Some("WELCOME10"), None, Some("SAVE5"), Some("COFFEE20")];

#[tokio::main]
async fn main() -> StoreResult<()> {
    let args = Args::parse();

    println!("Seeding {} ...", args.db.display());

    let storage = Storage::open_sqlite(StoreConfig::new(&args.db)).await?;
    let mut catalog = Catalog::from_products(storage.products().initialize().await?);
    let (book, _) = DiscountBook::from_codes(storage.discounts().initialize().await?);
    let mut ledger = SalesLedger::from_sales(storage.sales().load().await?);

    let products = catalog.products().to_vec();
    if products.is_empty() {
        println!("⚠ Catalog is empty; no demo sales written");
        return Ok(());
    }

    let now = Local::now();
    let span = Duration::days(args.days.max(1));
    let step = span / args.sales.max(1) as i32;

    // Oldest first, so stock runs down in the order the orders happened
    for i in 0..args.sales {
        let mut cart = Cart::new();
        for offset in 0..(i % 3 + 1) {
            let product = &products[(i * 7 + offset * 5) % products.len()];
            if product.stock <= 0 {
                continue;
            }
            if let Err(e) = cart.add_item(product) {
                eprintln!("Order {}: failed to add {}: {}", i, product.name, e);
            }
        }
        if cart.is_empty() {
            continue;
        }
        if let Some(code) = CODES[i % CODES.len()] {
            if let Err(e) = cart.apply_discount(&book, code) {
                eprintln!("Order {}: {}", i, e);
            }
        }

        let method = PaymentMethod::ALL[i % PaymentMethod::ALL.len()];
        let at = now - span + step * (i as i32 + 1);
        let sale = match cart.build_sale(method, &at) {
            Ok(sale) => sale,
            Err(e) => {
                eprintln!("Order {}: {}", i, e);
                continue;
            }
        };

        if let Err(e) = catalog.check_stock(&sale.items) {
            eprintln!("Order {} skipped: {}", i, e);
            continue;
        }
        catalog.apply_stock_delta(&sale.items);
        ledger.append(sale);
    }

    // Earlier runs may have left newer sales behind
    let ledger = SalesLedger::from_unordered(ledger.into_sales());

    storage
        .commit_sale(catalog.products(), ledger.all())
        .await?;

    println!(
        "Done: {} products, {} codes, {} sales",
        catalog.len(),
        book.len(),
        ledger.len()
    );
    Ok(())
}
