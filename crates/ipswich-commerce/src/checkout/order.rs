//! Order types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::checkout::{OrderId, ShippingInfo};
use crate::error::CommerceError;
use crate::ids::{OrderItemId, ProductId, UserId};
use crate::money::{Currency, Money};

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order placed, awaiting processing.
    #[default]
    Pending,
    /// Order being prepared.
    Processing,
    /// Order shipped.
    Shipped,
    /// Order delivered.
    Delivered,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for OrderStatus {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| CommerceError::InvalidOrderStatus(s.to_string()))
    }
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: OrderId,
    /// Customer who placed the order.
    pub user_id: UserId,
    /// Shipping details as entered at checkout.
    pub shipping: ShippingInfo,
    /// Sum of item costs.
    pub total_cost: Money,
    pub status: OrderStatus,
    /// Items in the order.
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// A new pending order with no items and a zero total.
    pub fn new(id: OrderId, user_id: UserId, shipping: ShippingInfo, currency: Currency) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            shipping,
            total_cost: Money::zero(currency),
            status: OrderStatus::Pending,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Total number of units across all items.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of item costs, recomputed from the items.
    pub fn computed_total(&self) -> Result<Money, CommerceError> {
        self.items
            .iter()
            .try_fold(Money::zero(self.total_cost.currency), |acc, item| {
                acc.checked_add(&item.cost()?).ok_or(CommerceError::Overflow)
            })
    }

    /// Check if this order belongs to a customer.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}

/// One product line of a placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    /// Product name at the time of purchase.
    pub product_name: String,
    /// Unit price charged.
    pub price: Money,
    pub quantity: i64,
}

impl OrderItem {
    pub fn new(
        order_id: OrderId,
        product_id: ProductId,
        product_name: impl Into<String>,
        price: Money,
        quantity: i64,
    ) -> Self {
        Self {
            id: OrderItemId::generate(),
            order_id,
            product_id,
            product_name: product_name.into(),
            price,
            quantity,
        }
    }

    /// `price * quantity`.
    pub fn cost(&self) -> Result<Money, CommerceError> {
        self.price
            .checked_mul(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shipping() -> ShippingInfo {
        ShippingInfo::new(
            "Ada",
            "Lovelace",
            "ada@example.com",
            "1 Tavern Street",
            "IP1 3AA",
            "Ipswich",
        )
        .unwrap()
    }

    #[test]
    fn test_new_order_is_pending_and_empty() {
        let order = Order::new(
            OrderId::new("ABC"),
            UserId::new("u1"),
            shipping(),
            Currency::GBP,
        );
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.total_cost.is_zero());
        assert_eq!(order.item_count(), 0);
        assert!(order.is_owned_by(&UserId::new("u1")));
        assert!(!order.is_owned_by(&UserId::new("u2")));
    }

    #[test]
    fn test_item_cost_and_total() {
        let mut order = Order::new(
            OrderId::new("ABC"),
            UserId::new("u1"),
            shipping(),
            Currency::GBP,
        );
        order.items.push(OrderItem::new(
            order.id.clone(),
            ProductId::new("laptop"),
            "Laptop",
            Money::from_minor(99999, Currency::GBP),
            2,
        ));
        order.items.push(OrderItem::new(
            order.id.clone(),
            ProductId::new("mouse"),
            "Mouse",
            Money::from_minor(1999, Currency::GBP),
            1,
        ));

        assert_eq!(order.items[0].cost().unwrap().display_amount(), "1999.98");
        assert_eq!(order.item_count(), 3);
        assert_eq!(order.computed_total().unwrap().display_amount(), "2019.97");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("shipped".parse::<OrderStatus>().unwrap(), OrderStatus::Shipped);
        assert_eq!(" Cancelled ".parse::<OrderStatus>().unwrap(), OrderStatus::Cancelled);
        assert!("lost".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_terminal_states() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
    }
}
