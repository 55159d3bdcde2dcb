//! Product types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::ids::{CategoryId, ProductId};
use crate::money::Money;

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// URL-friendly slug (unique).
    pub slug: String,
    pub category_id: CategoryId,
    #[serde(default)]
    pub description: String,
    /// Current list price. Carts snapshot this when a line is first added.
    pub price: Money,
    /// Path or URL of the product image.
    #[serde(default)]
    pub image: Option<String>,
    /// Units on hand. Never negative.
    pub stock: i64,
    /// Whether the product is offered in the storefront.
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Create a new available product with no stock.
    pub fn new(
        name: impl Into<String>,
        slug: impl Into<String>,
        category_id: CategoryId,
        price: Money,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ProductId::generate(),
            name: name.into(),
            slug: slug.into(),
            category_id,
            description: String::new(),
            price,
            image: None,
            stock: 0,
            available: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the stock level.
    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }

    /// Check that the record can be stored.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.price.is_negative() {
            return Err(CommerceError::InvalidAmount(format!(
                "price of {} is negative",
                self.name
            )));
        }
        if self.stock < 0 {
            return Err(CommerceError::InvalidQuantity(self.stock));
        }
        Ok(())
    }

    /// Check if the product has any stock.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Check if a specific quantity can be supplied from current stock.
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn laptop() -> Product {
        Product::new(
            "Laptop",
            "laptop",
            CategoryId::new("electronics"),
            Money::from_minor(99999, Currency::GBP),
        )
        .with_description("High-performance laptop")
        .with_stock(10)
    }

    #[test]
    fn test_product_creation() {
        let product = laptop();
        assert_eq!(product.name, "Laptop");
        assert_eq!(product.price.display_amount(), "999.99");
        assert_eq!(product.stock, 10);
        assert!(product.available);
        assert!(product.validate().is_ok());
    }

    #[test]
    fn test_can_fulfill() {
        let product = laptop();
        assert!(product.can_fulfill(10));
        assert!(!product.can_fulfill(11));
        assert!(product.in_stock());
        assert!(!product.with_stock(0).in_stock());
    }

    #[test]
    fn test_validate_rejects_negative_values() {
        assert!(laptop().with_stock(-1).validate().is_err());

        let mut product = laptop();
        product.price = Money::from_minor(-1, Currency::GBP);
        assert!(product.validate().is_err());
    }
}
