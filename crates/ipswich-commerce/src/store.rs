//! Storage interfaces the storefront core is written against.
//!
//! The core never touches a concrete database. It reads the catalog through
//! [`CatalogStore`] and places orders through [`OrderStore::transaction`],
//! whose writer either commits every write or none of them.

use thiserror::Error;

use crate::catalog::{Category, Product};
use crate::checkout::{Order, OrderId, OrderItem};
use crate::ids::{ProductId, UserId};
use crate::money::Money;
use crate::search::SearchQuery;

/// Failures reported by a store implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A referenced record does not exist.
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// A uniqueness constraint was violated.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other backend failure.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        StoreError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict(_))
    }
}

/// Read access to products and categories.
pub trait CatalogStore {
    fn get_product(&self, id: &ProductId) -> Result<Option<Product>, StoreError>;

    /// Look a product up by slug, whether or not it is available.
    fn get_product_by_slug(&self, slug: &str) -> Result<Option<Product>, StoreError>;

    /// Products matching `query`, in the query's sort order.
    fn list_products(&self, query: &SearchQuery) -> Result<Vec<Product>, StoreError>;

    /// Look a category up by slug.
    fn get_category(&self, slug: &str) -> Result<Option<Category>, StoreError>;

    /// All categories sorted by name.
    fn list_categories(&self) -> Result<Vec<Category>, StoreError>;
}

/// Writes available inside an order transaction.
pub trait OrderWriter {
    /// Read a product as seen by this transaction.
    fn get_product(&mut self, id: &ProductId) -> Result<Option<Product>, StoreError>;

    /// Insert an order header. A duplicate id fails with
    /// [`StoreError::Conflict`] and writes nothing.
    fn create_order(&mut self, order: &Order) -> Result<(), StoreError>;

    /// Insert an order item for an order created in this transaction.
    fn create_order_item(&mut self, item: &OrderItem) -> Result<(), StoreError>;

    /// Change a product's stock by `delta`.
    ///
    /// Returns `Ok(false)` and leaves the stock untouched if the result would
    /// be negative. The check and the write are one atomic step.
    fn update_product_stock(&mut self, id: &ProductId, delta: i64) -> Result<bool, StoreError>;

    fn set_order_total(&mut self, order_id: &OrderId, total: Money) -> Result<(), StoreError>;
}

/// Order persistence.
pub trait OrderStore {
    /// Run `f` as one atomic, isolated unit of work.
    ///
    /// If `f` returns `Err`, every write it made is rolled back and the error
    /// is returned unchanged. Transactions do not observe each other's
    /// uncommitted writes.
    fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        E: From<StoreError>,
        F: FnOnce(&mut dyn OrderWriter) -> Result<T, E>;

    /// A customer's orders, newest first.
    fn get_orders_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, StoreError>;

    /// One order with its items.
    fn get_order(&self, order_id: &OrderId) -> Result<Option<Order>, StoreError>;
}

impl<S: CatalogStore + ?Sized> CatalogStore for &S {
    fn get_product(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        (**self).get_product(id)
    }

    fn get_product_by_slug(&self, slug: &str) -> Result<Option<Product>, StoreError> {
        (**self).get_product_by_slug(slug)
    }

    fn list_products(&self, query: &SearchQuery) -> Result<Vec<Product>, StoreError> {
        (**self).list_products(query)
    }

    fn get_category(&self, slug: &str) -> Result<Option<Category>, StoreError> {
        (**self).get_category(slug)
    }

    fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        (**self).list_categories()
    }
}

impl<S: OrderStore> OrderStore for &S {
    fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        E: From<StoreError>,
        F: FnOnce(&mut dyn OrderWriter) -> Result<T, E>,
    {
        (**self).transaction(f)
    }

    fn get_orders_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, StoreError> {
        (**self).get_orders_for_user(user_id)
    }

    fn get_order(&self, order_id: &OrderId) -> Result<Option<Order>, StoreError> {
        (**self).get_order(order_id)
    }
}
