//! Shop CLI - terminal storefront for the online shop catalog.
//!
//! Commands:
//! - `shop products` - Browse, search and sort the catalog
//! - `shop product <id>` - Show a single product
//! - `shop cart` - Show and edit the cart
//! - `shop checkout` - Complete checkout and empty the cart
//! - `shop contact` - Send the contact form
//! - `shop config` - Show or create configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::{CartArgs, ConfigArgs, ContactArgs, ProductArgs, ProductsArgs};

/// Shop CLI - browse products and manage your cart
#[derive(Parser)]
#[command(name = "shop")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log line format on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Human)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Human,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List products, optionally filtered and sorted
    Products(ProductsArgs),

    /// Show a single product
    Product(ProductArgs),

    /// Show or edit the cart
    Cart(CartArgs),

    /// Complete checkout
    Checkout,

    /// Send the contact form
    Contact(ContactArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool, format: LogFormat) {
    let default = if verbose {
        "shop=debug,shop_commerce=debug,shop_data=debug,shop_cache=debug"
    } else {
        "shop=info,shop_commerce=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into());

    let json_layer = matches!(format, LogFormat::Json).then(|| {
        fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = matches!(format, LogFormat::Human)
        .then(|| fmt::layer().with_target(false).with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.log_format);

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    let result = match cli.command {
        Commands::Products(args) => commands::products::list(args, &ctx).await,
        Commands::Product(args) => commands::products::show(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Checkout => commands::checkout::run(&ctx).await,
        Commands::Contact(args) => commands::contact::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
