//! Storefront domain core for Ipswich Retail.
//!
//! - **Catalog**: products and categories
//! - **Search**: storefront filtering and ordering
//! - **Cart**: per-session carts with add-time price snapshots
//! - **Checkout**: order ids, shipping details, orders, and the orchestrator
//!   that turns a cart into an order atomically
//! - **Store**: the traits a storage engine implements
//!
//! # Example
//!
//! ```rust,ignore
//! use ipswich_commerce::prelude::*;
//!
//! let storefront = Storefront::new(&db);
//! let mut cart = Cart::new(session_id.as_str());
//! storefront.add_to_cart(&mut cart, &laptop.id, 2)?;
//! println!("Total: {}", cart.total_price()?);
//!
//! let order = storefront.checkout(&user, &mut cart, shipping)?;
//! println!("Placed order {}", order.id);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod search;
pub mod store;
pub mod storefront;

#[cfg(feature = "storage")]
pub mod session;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Category, Product};

    // Cart
    pub use crate::cart::{Cart, CartLine, CartLineView};

    // Checkout
    pub use crate::checkout::{Checkout, Order, OrderItem, OrderStatus, ShippingInfo};

    // Search
    pub use crate::search::{Filter, SearchQuery};

    // Storage
    pub use crate::store::{CatalogStore, OrderStore, OrderWriter, StoreError};
    pub use crate::storefront::{CategoryPage, ProductListing, Storefront};

    #[cfg(feature = "storage")]
    pub use crate::session::CartSessions;
}
