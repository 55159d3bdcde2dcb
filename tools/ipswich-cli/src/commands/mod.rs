//! CLI command implementations.

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod orders;
pub mod seed;
pub mod users;

use clap::{Args, Subcommand};

/// Sign-in flags shared by commands that act for a customer.
#[derive(Args)]
pub struct LoginArgs {
    /// Username to sign in as.
    #[arg(short, long, env = "IPSWICH_USER")]
    pub user: String,

    /// Password (prompted for when omitted).
    #[arg(long, env = "IPSWICH_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Search text matched against names, descriptions and category names.
    #[arg(short, long)]
    pub q: Option<String>,

    /// Category slug to narrow to.
    #[arg(long)]
    pub category: Option<String>,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product slug.
    pub slug: String,
}

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {
    /// Show this category with its products and related categories.
    pub slug: Option<String>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart.
    Show,
    /// Add a product.
    Add {
        /// Product slug.
        slug: String,
        /// Quantity to add.
        #[arg(short = 'n', long, default_value_t = 1)]
        quantity: i64,
    },
    /// Remove a product.
    Remove {
        /// Product slug.
        slug: String,
    },
    /// Set a line's quantity. Zero or less removes the line.
    Set {
        /// Product slug.
        slug: String,
        /// New quantity.
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Empty the cart.
    Clear,
}

/// Arguments for the users command.
#[derive(Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Subcommand)]
pub enum UsersCommand {
    /// Create a customer account.
    Register {
        /// Username.
        username: String,
        /// Email address.
        email: String,
        /// Password (prompted for when omitted).
        #[arg(long, env = "IPSWICH_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Show or update the signed-in customer's profile.
    Profile {
        #[command(flatten)]
        login: LoginArgs,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        postal_code: Option<String>,
        #[arg(long)]
        country: Option<String>,
    },
    /// Replace a user's roles (customer, staff, admin).
    Roles {
        /// Username.
        username: String,
        /// Roles to grant.
        #[arg(required = true)]
        roles: Vec<String>,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    #[command(flatten)]
    pub login: LoginArgs,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    /// Defaults to the account email.
    #[arg(long)]
    pub email: Option<String>,

    /// Defaults to the profile address.
    #[arg(long)]
    pub address: Option<String>,

    /// Defaults to the profile postal code.
    #[arg(long)]
    pub postal_code: Option<String>,

    /// Defaults to the profile city.
    #[arg(long)]
    pub city: Option<String>,
}

/// Arguments for the orders command.
#[derive(Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: OrdersCommand,
}

#[derive(Subcommand)]
pub enum OrdersCommand {
    /// List your orders, newest first.
    List {
        #[command(flatten)]
        login: LoginArgs,
    },
    /// Show one of your orders.
    Show {
        /// Order number.
        order: String,
        #[command(flatten)]
        login: LoginArgs,
    },
}

/// Arguments for the admin command.
#[derive(Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Move an order to a new status.
    Status {
        /// Order number.
        order: String,
        /// pending, processing, shipped, delivered or cancelled.
        status: String,
        #[command(flatten)]
        login: LoginArgs,
    },
    /// List every order.
    Orders {
        /// Only orders in this status.
        #[arg(long)]
        status: Option<String>,
        #[command(flatten)]
        login: LoginArgs,
    },
    /// Set a product's stock level.
    Stock {
        /// Product slug.
        slug: String,
        /// Units on hand.
        stock: i64,
        #[command(flatten)]
        login: LoginArgs,
    },
    /// Show store health.
    Health,
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
    /// Write a default ipswich.toml to the current directory.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}
