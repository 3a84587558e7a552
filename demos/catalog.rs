//! Seeded catalog walkthrough.
//!
//! Loads the sample clothing catalog, runs a few cart operations and prints
//! the resulting catalog and cart. Pick the backend with `--chaining`.
//!
//! **Usage**:
//! ```bash
//! cargo run --example catalog
//! cargo run --example catalog -- --chaining --initial-capacity 10 -v
//! ```

use catalog_rs::cart::CartLedger;
use catalog_rs::config::{DeletionStrategy, StoreConfig};
use catalog_rs::store::CatalogStore;
use catalog_rs::table::{ChainedTable, OpenTable, Table};
use clap::Parser;

const SAMPLE: &[(i64, &str, f64, u32)] = &[
    (1, "Regata Básica", 49.90, 1000),
    (2, "Camiseta Básica", 59.90, 1000),
    (3, "Camiseta Estampada", 69.90, 1000),
    (4, "Camisa Polo", 89.90, 1000),
    (5, "Camisa Social", 119.90, 1000),
    (6, "Bermuda Jeans", 159.90, 1000),
    (7, "Bermuda Sarja", 139.90, 1000),
    (8, "Calça Jeans", 199.90, 1000),
    (9, "Calça Sarja", 179.90, 1000),
    (10, "Calça Chino", 189.90, 1000),
    (11, "Cinto de Couro", 79.90, 1000),
    (12, "Gravata", 59.90, 1000),
    (13, "Tênis Esportivo", 299.90, 1000),
    (14, "Tênis Casual", 249.90, 1000),
    (15, "Sapato Social", 219.90, 1000),
];

#[derive(Debug, Parser)]
#[command(author, version, about = "Product catalog walkthrough")]
struct Cli {
    /// Use separate chaining instead of linear probing
    #[arg(long)]
    chaining: bool,

    /// Initial table capacity
    #[arg(long, default_value = "20")]
    initial_capacity: usize,

    /// Use backward-shift deletion instead of tombstones
    #[arg(long)]
    backward_shift: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    simplelog::TermLogger::init(
        if cli.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let mut config = StoreConfig::default().with_initial_capacity(cli.initial_capacity);
    if cli.backward_shift {
        config = config.with_deletion(DeletionStrategy::BackwardShift);
    }

    if cli.chaining {
        run(CatalogStore::<ChainedTable>::with_config(config)?)
    } else {
        run(CatalogStore::<OpenTable>::with_config(config)?)
    }
}

fn run<T: Table>(mut store: CatalogStore<T>) -> color_eyre::Result<()> {
    println!("=== Catalog ({}) ===\n", T::KIND);

    for &(id, name, price, stock) in SAMPLE {
        store.insert(id, name, price, stock)?;
    }
    println!("{:?}\n", store);

    let mut cart = CartLedger::new();
    cart.reserve(&mut store, 2, 3)?;
    cart.reserve(&mut store, 8, 1)?;
    cart.reserve(&mut store, 2, 2)?;
    cart.release(&mut store, 8, 1)?;
    cart.reserve(&mut store, 13, 1)?;

    if let Err(e) = cart.reserve(&mut store, 12, 5000) {
        println!("rejected: {}", e);
    }
    if let Err(e) = cart.release(&mut store, 99, 1) {
        println!("rejected: {}", e);
    }

    let removed = store.delete(11)?;
    println!("removed: {}\n", removed);

    print_catalog(&store);

    println!("─── Cart ───\n");
    for line in cart.lines(&store) {
        println!("{} x{} - {:.2}", line.name, line.quantity, line.subtotal);
    }
    println!("Total: {:.2}", cart.total(&store));

    Ok(())
}

fn print_catalog<T: Table>(store: &CatalogStore<T>) {
    println!("{:>4} | {:<25} | {:>8} | {:>7}", "ID", "Name", "Price", "Stock");
    println!("{}", "-".repeat(55));
    for p in store.list_all() {
        println!("{:>4} | {:<25} | {:>8.2} | {:>7}", p.id(), p.name(), p.price(), p.stock());
    }
    println!();
}
