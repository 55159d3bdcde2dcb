//! In-memory tables and the undo log used to roll transactions back.

use std::collections::BTreeMap;

use ipswich_auth::{UserCredentials, UserId, UserProfile};
use ipswich_commerce::catalog::{Category, Product};
use ipswich_commerce::checkout::{Order, OrderId, OrderItem};
use ipswich_commerce::ids::{CategoryId, ProductId};
use ipswich_commerce::money::Money;
use serde::{Deserialize, Serialize};

/// Snapshot format version.
pub(crate) const SNAPSHOT_VERSION: u32 = 1;

/// Every table in the store. Order rows are kept without their items;
/// items live in `order_items` and are joined on read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct Tables {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub categories: BTreeMap<CategoryId, Category>,
    #[serde(default)]
    pub products: BTreeMap<ProductId, Product>,
    #[serde(default)]
    pub orders: BTreeMap<OrderId, Order>,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
    #[serde(default)]
    pub users: BTreeMap<UserId, UserCredentials>,
    #[serde(default)]
    pub profiles: BTreeMap<UserId, UserProfile>,
}

impl Tables {
    pub fn new() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            ..Self::default()
        }
    }

    pub fn product_by_slug(&self, slug: &str) -> Option<&Product> {
        self.products.values().find(|p| p.slug == slug)
    }

    pub fn category_by_slug(&self, slug: &str) -> Option<&Category> {
        self.categories.values().find(|c| c.slug == slug)
    }

    /// An order joined with its items.
    pub fn order_with_items(&self, id: &OrderId) -> Option<Order> {
        let mut order = self.orders.get(id)?.clone();
        order.items = self
            .order_items
            .iter()
            .filter(|i| &i.order_id == id)
            .cloned()
            .collect();
        Some(order)
    }

    /// Categories sorted by name.
    pub fn sorted_categories(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = self.categories.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        categories
    }

    /// Revert one logged write.
    pub fn undo(&mut self, entry: Undo) {
        match entry {
            Undo::RemoveOrder(id) => {
                self.orders.remove(&id);
            }
            Undo::PopOrderItem => {
                self.order_items.pop();
            }
            Undo::RestoreStock(id, stock) => {
                if let Some(product) = self.products.get_mut(&id) {
                    product.stock = stock;
                }
            }
            Undo::RestoreOrderTotal(id, total) => {
                if let Some(order) = self.orders.get_mut(&id) {
                    order.total_cost = total;
                }
            }
        }
    }
}

/// The inverse of one write made inside a transaction.
#[derive(Debug, Clone)]
pub(crate) enum Undo {
    RemoveOrder(OrderId),
    PopOrderItem,
    RestoreStock(ProductId, i64),
    RestoreOrderTotal(OrderId, Money),
}
