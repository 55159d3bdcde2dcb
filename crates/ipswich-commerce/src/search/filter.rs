//! Search filter types.

use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Product};
use crate::ids::CategoryId;

/// A catalog filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Filter {
    /// Only products offered in the storefront.
    Available,
    /// Filter by category.
    Category(CategoryId),
    /// Case-insensitive match on product name, description or category name.
    Text(String),
}

impl Filter {
    /// Create a category filter.
    pub fn category(id: impl Into<CategoryId>) -> Self {
        Filter::Category(id.into())
    }

    /// Create a text search filter.
    pub fn text(query: impl Into<String>) -> Self {
        Filter::Text(query.into())
    }

    /// Check a product against this filter.
    ///
    /// `category` is the product's category, when known; text search also
    /// looks at its name.
    pub fn matches(&self, product: &Product, category: Option<&Category>) -> bool {
        match self {
            Filter::Available => product.available,
            Filter::Category(id) => &product.category_id == id,
            Filter::Text(query) => {
                let needle = query.to_lowercase();
                product.name.to_lowercase().contains(&needle)
                    || product.description.to_lowercase().contains(&needle)
                    || category
                        .map(|c| c.name.to_lowercase().contains(&needle))
                        .unwrap_or(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    fn fixture() -> (Category, Product) {
        let category = Category::new("Electronics", "electronics");
        let product = Product::new(
            "Laptop",
            "laptop",
            category.id.clone(),
            Money::from_minor(99999, Currency::GBP),
        )
        .with_description("High-performance laptop")
        .with_stock(3);
        (category, product)
    }

    #[test]
    fn test_text_matches_name_description_and_category() {
        let (category, product) = fixture();
        assert!(Filter::text("LAPTOP").matches(&product, Some(&category)));
        assert!(Filter::text("performance").matches(&product, Some(&category)));
        assert!(Filter::text("electro").matches(&product, Some(&category)));
        assert!(!Filter::text("electro").matches(&product, None));
        assert!(!Filter::text("garden").matches(&product, Some(&category)));
    }

    #[test]
    fn test_availability_filter_ignores_stock() {
        let (_, mut product) = fixture();
        assert!(Filter::Available.matches(&product, None));

        product.stock = 0;
        assert!(Filter::Available.matches(&product, None));
        product.available = false;
        assert!(!Filter::Available.matches(&product, None));
    }

    #[test]
    fn test_category_filter() {
        let (category, product) = fixture();
        assert!(Filter::Category(category.id.clone()).matches(&product, None));
        assert!(!Filter::category("books").matches(&product, None));
    }
}
