//! Ipswich CLI - Command line storefront for Ipswich Retail.
//!
//! Commands:
//! - `ipswich seed` - Load the sample catalog
//! - `ipswich products` - Browse and search products
//! - `ipswich product` - Show a product
//! - `ipswich categories` - List categories or show one
//! - `ipswich cart` - Manage the session cart
//! - `ipswich users` - Register customers and edit profiles
//! - `ipswich checkout` - Place an order for the cart
//! - `ipswich orders` - Order history
//! - `ipswich admin` - Fulfilment and store health
//! - `ipswich config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    AdminArgs, CartArgs, CategoriesArgs, CheckoutArgs, ConfigArgs, OrdersArgs, ProductArgs,
    ProductsArgs, UsersArgs,
};

/// Ipswich CLI - Browse the catalog, fill a cart and place orders
#[derive(Parser)]
#[command(name = "ipswich")]
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

    /// Environment whose overrides apply
    #[arg(short, long, global = true, env = "IPSWICH_ENV")]
    env: Option<String>,

    /// Browsing session that owns the cart (defaults to the last one used)
    #[arg(short, long, global = true, env = "IPSWICH_SESSION")]
    session: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the sample catalog into the store
    Seed,

    /// List available products
    Products(ProductsArgs),

    /// Show one product
    Product(ProductArgs),

    /// List categories, or show one with its products
    Categories(CategoriesArgs),

    /// Manage the cart for the current session
    Cart(CartArgs),

    /// Register customers and manage their details
    Users(UsersArgs),

    /// Place an order for the cart's contents
    Checkout(CheckoutArgs),

    /// Show your order history
    Orders(OrdersArgs),

    /// Staff tools
    Admin(AdminArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config and open the store
    let ctx = match context::Context::load(
        cli.config.as_deref(),
        cli.env.as_deref(),
        cli.session.as_deref(),
        output.clone(),
    ) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    if let Err(e) = ipswich_observability::init(&ctx.logging_config()) {
        ctx.output.warn(&e.to_string());
    }

    // Execute command
    let result = match cli.command {
        Commands::Seed => commands::seed::run(&ctx),
        Commands::Products(args) => commands::catalog::products(args, &ctx),
        Commands::Product(args) => commands::catalog::product(args, &ctx),
        Commands::Categories(args) => commands::catalog::categories(args, &ctx),
        Commands::Cart(args) => commands::cart::run(args, &ctx),
        Commands::Users(args) => commands::users::run(args, &ctx),
        Commands::Checkout(args) => commands::checkout::run(args, &ctx),
        Commands::Orders(args) => commands::orders::run(args, &ctx),
        Commands::Admin(args) => commands::admin::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
