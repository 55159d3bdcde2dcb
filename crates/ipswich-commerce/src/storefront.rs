//! Storefront operations: what a shopper can do from the product pages,
//! the cart page and their order history.

use ipswich_auth::User;
use serde::Serialize;

use crate::cart::Cart;
use crate::catalog::{Category, Product};
use crate::checkout::{Checkout, Order, OrderId, ShippingInfo};
use crate::error::CommerceError;
use crate::ids::{ProductId, UserId};
use crate::search::SearchQuery;
use crate::store::{CatalogStore, OrderStore};

/// The product list page.
#[derive(Debug, Clone, Serialize)]
pub struct ProductListing {
    pub products: Vec<Product>,
    /// All categories, for navigation.
    pub categories: Vec<Category>,
    pub category: Option<Category>,
    pub query: Option<String>,
}

/// A category page with its neighbours.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryPage {
    pub category: Category,
    pub products: Vec<Product>,
    pub related: Vec<Category>,
}

/// Storefront facade over a store.
#[derive(Debug, Clone)]
pub struct Storefront<S> {
    store: S,
}

impl<S> Storefront<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: CatalogStore> Storefront<S> {
    /// Available products, optionally narrowed by a text query and a
    /// category slug. An unknown slug is an error, not an empty page.
    pub fn list_products(
        &self,
        text: Option<&str>,
        category_slug: Option<&str>,
    ) -> Result<ProductListing, CommerceError> {
        let mut query = SearchQuery::storefront();
        if let Some(text) = text {
            query = query.with_text(text);
        }

        let category = match category_slug {
            Some(slug) => {
                let category = self.require_category(slug)?;
                query = query.with_category(category.id.clone());
                Some(category)
            }
            None => None,
        };

        Ok(ProductListing {
            products: self.store.list_products(&query)?,
            categories: self.store.list_categories()?,
            category,
            query: query.text().map(str::to_string),
        })
    }

    /// An available product by slug.
    pub fn product_detail(&self, slug: &str) -> Result<Product, CommerceError> {
        self.store
            .get_product_by_slug(slug)?
            .filter(|p| p.available)
            .ok_or_else(|| CommerceError::ProductNotFound(slug.to_string()))
    }

    /// A category with its available products and up to four related
    /// categories.
    pub fn category_page(&self, slug: &str) -> Result<CategoryPage, CommerceError> {
        let category = self.require_category(slug)?;
        let products = self
            .store
            .list_products(&SearchQuery::storefront().with_category(category.id.clone()))?;
        let all = self.store.list_categories()?;
        let related = category.related(&all).into_iter().cloned().collect();
        Ok(CategoryPage {
            category,
            products,
            related,
        })
    }

    /// All categories sorted by name.
    pub fn categories(&self) -> Result<Vec<Category>, CommerceError> {
        Ok(self.store.list_categories()?)
    }

    /// Add a product to the cart.
    ///
    /// The product must exist and be available, and current stock must cover
    /// the requested quantity. Checkout re-checks stock authoritatively.
    pub fn add_to_cart(
        &self,
        cart: &mut Cart,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<(), CommerceError> {
        let product = self
            .store
            .get_product(product_id)?
            .filter(|p| p.available)
            .ok_or_else(|| CommerceError::ProductNotFound(product_id.to_string()))?;

        if !product.can_fulfill(quantity) {
            return Err(CommerceError::InsufficientStock {
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                requested: quantity,
                available: product.stock,
            });
        }
        cart.add(&product, quantity)
    }

    /// Remove a product from the cart. Absent products are ignored.
    pub fn remove_from_cart(&self, cart: &mut Cart, product_id: &ProductId) -> bool {
        cart.remove(product_id)
    }

    fn require_category(&self, slug: &str) -> Result<Category, CommerceError> {
        self.store
            .get_category(slug)?
            .ok_or_else(|| CommerceError::CategoryNotFound(slug.to_string()))
    }
}

impl<S: OrderStore> Storefront<S> {
    /// Place an order for the cart's contents.
    pub fn checkout(
        &self,
        user: &User,
        cart: &mut Cart,
        shipping: ShippingInfo,
    ) -> Result<Order, CommerceError> {
        Checkout::new(&self.store).checkout(user, cart, shipping)
    }

    /// The customer's orders, newest first.
    pub fn orders_for_user(&self, user: &User) -> Result<Vec<Order>, CommerceError> {
        let user_id = require_login(user)?;
        Ok(self.store.get_orders_for_user(user_id)?)
    }

    /// One of the customer's orders. Orders belonging to someone else are
    /// reported as not found.
    pub fn order_for_user(&self, user: &User, order_id: &OrderId) -> Result<Order, CommerceError> {
        let user_id = require_login(user)?;
        self.store
            .get_order(order_id)?
            .filter(|o| o.is_owned_by(user_id))
            .ok_or_else(|| CommerceError::OrderNotFound(order_id.to_string()))
    }
}

fn require_login(user: &User) -> Result<&UserId, CommerceError> {
    user.user_id().ok_or(CommerceError::AuthenticationRequired)
}
