//! CLI command implementations.

pub mod cart;
pub mod config;
pub mod featured;
pub mod product;
pub mod search;

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Free-text query (name, brand or category).
    pub query: Option<String>,

    /// Category key (electronics, fashion, cameras, audio, watches, all).
    #[arg(long = "cat")]
    pub category: Option<String>,

    /// Allowed brand; repeat for several.
    #[arg(short, long = "brand")]
    pub brands: Vec<String>,

    /// Price ceiling, e.g. 200 or 49.99.
    #[arg(short, long)]
    pub max_price: Option<String>,

    /// Sort order (relevance, price_asc, price_desc, name_asc).
    #[arg(short, long)]
    pub sort: Option<String>,

    /// Page number; out-of-range pages are clamped.
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    pub page: i64,

    /// Read the query from a URL query string (e.g. "q=watch&cat=watches").
    /// Other flags override its values.
    #[arg(long)]
    pub url: Option<String>,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product id. Unknown ids show the first product.
    pub id: String,
}

/// Arguments for the featured command.
#[derive(Args)]
pub struct FeaturedArgs {
    /// Number of products (default: catalog.featured_count).
    #[arg(short = 'n', long)]
    pub count: Option<usize>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Add a product to the cart.
    Add {
        /// Product id.
        id: String,

        /// Quantity to add.
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        qty: i64,

        /// Variant, e.g. a size.
        #[arg(long)]
        variant: Option<String>,
    },
    /// Remove a cart line.
    Remove {
        /// Product id.
        id: String,

        /// Variant of the line to remove.
        #[arg(long)]
        variant: Option<String>,
    },
    /// Set a line's quantity; 0 removes it.
    Set {
        /// Product id.
        id: String,

        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        qty: i64,

        /// Variant of the line.
        #[arg(long)]
        variant: Option<String>,
    },
    /// Fold a saved cart payload (a JSON array of `{id, qty, size}` lines) into the cart.
    Merge {
        /// Path to the cart payload, e.g. another data directory's `ec_cart.json`.
        file: PathBuf,
    },
    /// Show cart contents and totals.
    Show,
    /// Remove every line.
    Clear,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
