//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod contact;
pub mod products;

use clap::{Args, Subcommand};
use shop_commerce::search::SortOption;

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Case-insensitive text matched against title and tags.
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Sort order: name-asc, price-asc or price-desc.
    #[arg(short, long, default_value_t = SortOption::NameAsc)]
    pub sort: SortOption,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product id.
    pub id: String,

    /// Add the product to the cart after showing it.
    #[arg(long)]
    pub add: bool,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart with prices.
    Show,
    /// Add one of a product.
    Add {
        /// Product id.
        id: String,
    },
    /// Remove a product entirely.
    Remove {
        /// Product id.
        id: String,
    },
    /// Set a product's quantity; zero or less removes it.
    Set {
        /// Product id.
        id: String,
        /// New quantity.
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the contact command.
#[derive(Args)]
pub struct ContactArgs {
    /// Full name.
    #[arg(long)]
    pub name: Option<String>,

    /// Subject.
    #[arg(long)]
    pub subject: Option<String>,

    /// Email address.
    #[arg(long)]
    pub email: Option<String>,

    /// Message body.
    #[arg(long)]
    pub message: Option<String>,

    /// Never prompt; missing fields stay empty.
    #[arg(long)]
    pub no_input: bool,
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
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
