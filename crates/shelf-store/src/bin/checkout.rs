//! # Checkout Runner
//!
//! Loads the catalog, carefully moves the default shopping list from the
//! broken cart to a working cart, rings it up and prints the receipt.
//!
//! ## Usage
//! ```bash
//! # Use ./database.txt (or whatever the config / env says)
//! cargo run -p shelf-store --bin checkout
//!
//! # Print the three-cart table after every move
//! cargo run -p shelf-store --bin checkout -- --trace
//!
//! # Machine-readable receipt
//! cargo run -p shelf-store --bin checkout -- --catalog ./data/database.txt --json
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=debug` to see every move.

use std::env;
use std::io;
use std::path::PathBuf;

use shelf_core::checkout::default_shopping_list;
use shelf_core::transfer::TraceObserver;
use shelf_core::CheckoutSession;
use shelf_store::trace::{LogObserver, TableObserver};
use shelf_store::StoreConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

struct Args {
    catalog: Option<PathBuf>,
    config: Option<PathBuf>,
    trace: bool,
    json: bool,
}

fn print_help() {
    println!("Shelf Checkout");
    println!();
    println!("Usage: checkout [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --catalog <PATH>   Catalog record file (default: database.txt)");
    println!("      --config <PATH>    Config file (default: platform config dir)");
    println!("  -t, --trace            Print the cart table after every move");
    println!("      --json             Print the receipt as JSON");
    println!("  -h, --help             Show this help message");
}

/// Returns `None` when help was requested.
fn parse_args() -> Option<Args> {
    let argv: Vec<String> = env::args().collect();
    let mut args = Args {
        catalog: None,
        config: None,
        trace: false,
        json: false,
    };

    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "--catalog" | "-c" => {
                if i + 1 < argv.len() {
                    args.catalog = Some(PathBuf::from(&argv[i + 1]));
                    i += 1;
                }
            }
            "--config" => {
                if i + 1 < argv.len() {
                    args.config = Some(PathBuf::from(&argv[i + 1]));
                    i += 1;
                }
            }
            "--trace" | "-t" => args.trace = true,
            "--json" => args.json = true,
            "--help" | "-h" => {
                print_help();
                return None;
            }
            other => eprintln!("Ignoring unknown argument: {other}"),
        }
        i += 1;
    }

    Some(args)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Some(args) = parse_args() else {
        return Ok(());
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let mut config = StoreConfig::load(args.config)?;
    if let Some(path) = args.catalog {
        config.catalog.path = path;
    }
    if args.trace {
        config.trace.enabled = true;
    }
    config.validate()?;

    let catalog = shelf_store::instance_with(&config)?;
    info!(books = catalog.size(), "Catalog ready");

    let mut table;
    let mut log = LogObserver;
    let observer: &mut dyn TraceObserver = if config.trace.enabled {
        table = TableObserver::new(io::stdout(), config.trace.title_width);
        &mut table
    } else {
        &mut log
    };

    let mut session = CheckoutSession::new(catalog);
    let receipt = session.run(default_shopping_list()?, observer)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&receipt)?);
    } else {
        for line in &receipt.lines {
            println!("{line}");
            println!();
        }
        println!("Total: {}", receipt.amount_due);
    }

    Ok(())
}
