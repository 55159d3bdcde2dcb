//! Commerce error types.

use thiserror::Error;

use crate::ids::ProductId;
use crate::store::StoreError;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Checkout attempted with nothing in the cart.
    #[error("Your cart is empty")]
    EmptyCart,

    /// Not enough stock to satisfy a cart line.
    #[error("Sorry, only {available} of {product_name} available (requested {requested})")]
    InsufficientStock {
        product_id: ProductId,
        product_name: String,
        requested: i64,
        available: i64,
    },

    /// Product not found (or not currently offered).
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Category not found.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Order not found for this customer.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// The operation needs a logged-in customer.
    #[error("You must be logged in to do that")]
    AuthenticationRequired,

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// A stored cart snapshot is inconsistent.
    #[error("Invalid cart: {0}")]
    InvalidCart(String),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// A monetary amount could not be parsed.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// A shipping form field is missing or malformed.
    #[error("Invalid {field}: {reason}")]
    InvalidShippingInfo { field: &'static str, reason: String },

    /// Unknown order status name.
    #[error("Unknown order status: {0}")]
    InvalidOrderStatus(String),

    /// Any storage-layer failure while reading or writing orders.
    #[error("Could not save your order: {0}")]
    Persistence(#[from] StoreError),

    /// Session storage failure.
    #[error("Session error: {0}")]
    Session(String),
}

impl CommerceError {
    /// Whether this error is meant to be shown to the shopper as-is.
    ///
    /// Everything except persistence and session failures is a message about
    /// the shopper's own request.
    pub fn is_user_facing(&self) -> bool {
        !matches!(
            self,
            CommerceError::Persistence(_) | CommerceError::Session(_) | CommerceError::Overflow
        )
    }
}

#[cfg(feature = "storage")]
impl From<ipswich_cache::CacheError> for CommerceError {
    fn from(e: ipswich_cache::CacheError) -> Self {
        CommerceError::Session(e.to_string())
    }
}
