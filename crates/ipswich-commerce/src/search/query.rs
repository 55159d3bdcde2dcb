//! Search query builder.

use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Product};
use crate::ids::CategoryId;
use crate::search::Filter;

/// A catalog query: every filter must match. Results come newest first.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SearchQuery {
    pub filters: Vec<Filter>,
}

impl SearchQuery {
    /// An unfiltered query over the whole catalog.
    pub fn all() -> Self {
        Self::default()
    }

    /// The storefront's base query: only available products.
    pub fn storefront() -> Self {
        Self {
            filters: vec![Filter::Available],
        }
    }

    /// Add a text search. Blank queries are ignored.
    pub fn with_text(mut self, query: &str) -> Self {
        let query = query.trim();
        if !query.is_empty() {
            self.filters.push(Filter::text(query));
        }
        self
    }

    /// Restrict to one category.
    pub fn with_category(mut self, id: CategoryId) -> Self {
        self.filters.push(Filter::category(id));
        self
    }

    /// The free-text part of the query, if any.
    pub fn text(&self) -> Option<&str> {
        self.filters.iter().find_map(|f| match f {
            Filter::Text(q) => Some(q.as_str()),
            _ => None,
        })
    }

    /// Check whether a product satisfies every filter.
    pub fn matches(&self, product: &Product, category: Option<&Category>) -> bool {
        self.filters.iter().all(|f| f.matches(product, category))
    }

    /// Filter `products` and order them newest first, resolving categories through `category_of`.
    pub fn apply<'c, I, F>(&self, products: I, category_of: F) -> Vec<Product>
    where
        I: IntoIterator<Item = Product>,
        F: Fn(&CategoryId) -> Option<&'c Category>,
    {
        let mut matched: Vec<Product> = products
            .into_iter()
            .filter(|p| self.matches(p, category_of(&p.category_id)))
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};
    use chrono::Duration;

    fn catalog() -> (Vec<Category>, Vec<Product>) {
        let electronics = Category::new("Electronics", "electronics");
        let books = Category::new("Books", "books");

        let mut laptop = Product::new(
            "Laptop",
            "laptop",
            electronics.id.clone(),
            Money::from_minor(99999, Currency::GBP),
        );
        let mut novel = Product::new(
            "Novel",
            "novel",
            books.id.clone(),
            Money::from_minor(1299, Currency::GBP),
        )
        .with_description("A gripping read");
        let mut retired = Product::new(
            "Old Phone",
            "old-phone",
            electronics.id.clone(),
            Money::from_minor(5000, Currency::GBP),
        );
        retired.available = false;

        laptop.created_at -= Duration::days(2);
        novel.created_at -= Duration::days(1);

        (vec![books, electronics], vec![laptop, novel, retired])
    }

    fn lookup<'a>(categories: &'a [Category]) -> impl Fn(&CategoryId) -> Option<&'a Category> {
        move |id| categories.iter().find(|c| &c.id == id)
    }

    #[test]
    fn test_storefront_hides_unavailable_and_orders_newest_first() {
        let (categories, products) = catalog();
        let result = SearchQuery::storefront().apply(products, lookup(&categories));
        let names: Vec<_> = result.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Novel", "Laptop"]);
    }

    #[test]
    fn test_text_search_uses_category_name() {
        let (categories, products) = catalog();
        let result = SearchQuery::storefront()
            .with_text("electronics")
            .apply(products, lookup(&categories));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Laptop");
    }

    #[test]
    fn test_blank_text_is_ignored() {
        let query = SearchQuery::storefront().with_text("   ");
        assert_eq!(query.filters, vec![Filter::Available]);
        assert!(query.text().is_none());
    }

    #[test]
    fn test_category_filter_without_availability() {
        let (categories, products) = catalog();
        let electronics = categories[1].id.clone();
        let result = SearchQuery::all()
            .with_category(electronics)
            .apply(products, lookup(&categories));
        let names: Vec<_> = result.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Old Phone", "Laptop"]);
    }
}
