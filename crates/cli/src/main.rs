//! Bazaar CLI - Catalog inspection and store management.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! bazaar catalog list --category hoodie --page 2
//! bazaar catalog search "gold series"
//! bazaar catalog show zip-hoodie
//!
//! # Drive the cart
//! bazaar cart add 3 --size M
//! bazaar cart increase 0
//! bazaar cart list
//!
//! # Recently viewed
//! bazaar recent list
//! bazaar recent clear
//! ```
//!
//! # Commands
//!
//! - `catalog` - List, search and show catalog products
//! - `cart` - Add, change, remove and list cart lines
//! - `recent` - List or clear recently viewed products

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::Context;
use commands::cart::LineAction;

#[derive(Parser)]
#[command(name = "bazaar")]
#[command(author, version, about = "Bazaar CLI tools")]
struct Cli {
    /// Product catalog JSON (defaults to `STOREFRONT_CATALOG_PATH`)
    #[arg(long = "catalog", global = true)]
    catalog_path: Option<PathBuf>,

    /// Directory holding cart and recently viewed state
    #[arg(long, global = true, env = "STOREFRONT_DATA_DIR", default_value = "data/state")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage recently viewed products
    Recent {
        #[command(subcommand)]
        action: RecentAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products, 16 per page
    List {
        /// Subcategory slug (bere, gold-series, hoodie, sac-bandi, corap)
        #[arg(short, long)]
        category: Option<String>,

        /// Page number
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Search products by name or category
    Search {
        /// Search text
        query: String,
    },
    /// Show a product and record it as viewed
    Show {
        /// Product slug
        slug: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart and checkout summary
    List,
    /// Add a product
    Add {
        /// Product id
        product_id: i64,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Size (XS, S, M, L, XL, XXL) for sized products
        #[arg(short, long, conflicts_with = "quick")]
        size: Option<String>,

        /// Add without choosing a size, as from a listing card
        #[arg(long)]
        quick: bool,
    },
    /// Increase a line's quantity by one
    Increase {
        /// Line index as shown by `cart list`
        index: usize,
    },
    /// Decrease a line's quantity by one (stops at 1)
    Decrease {
        /// Line index as shown by `cart list`
        index: usize,
    },
    /// Remove a line
    Remove {
        /// Line index as shown by `cart list`
        index: usize,
    },
    /// Remove every line
    Clear,
}

#[derive(Subcommand)]
enum RecentAction {
    /// Show recently viewed products
    List,
    /// Forget recently viewed products
    Clear,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::open(cli.catalog_path, cli.data_dir)?;

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List { category, page } => commands::catalog::list(&ctx, category, page),
            CatalogAction::Search { query } => commands::catalog::search(&ctx, &query),
            CatalogAction::Show { slug } => commands::catalog::show(&ctx, &slug)?,
        },
        Commands::Cart { action } => match action {
            CartAction::List => commands::cart::list(&ctx)?,
            CartAction::Add {
                product_id,
                quantity,
                size,
                quick,
            } => commands::cart::add(&ctx, product_id, quantity, size.as_deref(), quick)?,
            CartAction::Increase { index } => {
                commands::cart::update(&ctx, LineAction::Increase, index)?;
            }
            CartAction::Decrease { index } => {
                commands::cart::update(&ctx, LineAction::Decrease, index)?;
            }
            CartAction::Remove { index } => {
                commands::cart::update(&ctx, LineAction::Remove, index)?;
            }
            CartAction::Clear => commands::cart::clear(&ctx)?,
        },
        Commands::Recent { action } => match action {
            RecentAction::List => commands::recent::list(&ctx)?,
            RecentAction::Clear => commands::recent::clear(&ctx)?,
        },
    }
    Ok(())
}
