//! Catalog tables: categories and products.

use ipswich_commerce::catalog::{Category, Product};
use ipswich_commerce::ids::ProductId;
use ipswich_commerce::money::Money;
use ipswich_commerce::search::SearchQuery;
use ipswich_commerce::store::{CatalogStore, StoreError};

use crate::{Database, DbError};

impl Database {
    /// Insert a category. Names and slugs must be unique.
    pub fn insert_category(&self, category: Category) -> Result<Category, DbError> {
        self.write(|tables| {
            if let Some(existing) = tables
                .categories
                .values()
                .find(|c| c.name == category.name || c.slug == category.slug)
            {
                return Err(DbError::Conflict(format!(
                    "category {} already exists",
                    existing.slug
                )));
            }
            tables
                .categories
                .insert(category.id.clone(), category.clone());
            tracing::debug!(category = %category.slug, "category created");
            Ok(category)
        })
    }

    /// Insert a product. The slug must be unique and the category must exist.
    pub fn insert_product(&self, product: Product) -> Result<Product, DbError> {
        product
            .validate()
            .map_err(|e| DbError::Invalid(e.to_string()))?;
        self.write(|tables| {
            if !tables.categories.contains_key(&product.category_id) {
                return Err(DbError::not_found("category", &product.category_id));
            }
            if tables.product_by_slug(&product.slug).is_some() {
                return Err(DbError::Conflict(format!(
                    "product {} already exists",
                    product.slug
                )));
            }
            tables.products.insert(product.id.clone(), product.clone());
            tracing::debug!(product = %product.slug, stock = product.stock, "product created");
            Ok(product)
        })
    }

    /// Set a product's stock level outright (restocking, stock takes).
    pub fn set_product_stock(&self, id: &ProductId, stock: i64) -> Result<(), DbError> {
        if stock < 0 {
            return Err(DbError::Invalid(format!("stock cannot be negative ({})", stock)));
        }
        self.write(|tables| {
            let product = tables
                .products
                .get_mut(id)
                .ok_or_else(|| DbError::not_found("product", id))?;
            product.stock = stock;
            product.updated_at = chrono::Utc::now();
            Ok(())
        })
    }

    /// Change a product's list price. Lines already in carts keep their
    /// snapshot.
    pub fn set_product_price(&self, id: &ProductId, price: Money) -> Result<(), DbError> {
        if price.is_negative() {
            return Err(DbError::Invalid(format!("price cannot be negative ({})", price)));
        }
        self.write(|tables| {
            let product = tables
                .products
                .get_mut(id)
                .ok_or_else(|| DbError::not_found("product", id))?;
            product.price = price;
            product.updated_at = chrono::Utc::now();
            Ok(())
        })
    }

    /// Offer or withdraw a product in the storefront.
    pub fn set_product_available(&self, id: &ProductId, available: bool) -> Result<(), DbError> {
        self.write(|tables| {
            let product = tables
                .products
                .get_mut(id)
                .ok_or_else(|| DbError::not_found("product", id))?;
            product.available = available;
            product.updated_at = chrono::Utc::now();
            Ok(())
        })
    }
}

impl CatalogStore for Database {
    fn get_product(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self.read(|t| t.products.get(id).cloned())?)
    }

    fn get_product_by_slug(&self, slug: &str) -> Result<Option<Product>, StoreError> {
        Ok(self.read(|t| t.product_by_slug(slug).cloned())?)
    }

    fn list_products(&self, query: &SearchQuery) -> Result<Vec<Product>, StoreError> {
        Ok(self.read(|t| {
            query.apply(t.products.values().cloned(), |id| t.categories.get(id))
        })?)
    }

    fn get_category(&self, slug: &str) -> Result<Option<Category>, StoreError> {
        Ok(self.read(|t| t.category_by_slug(slug).cloned())?)
    }

    fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.read(|t| t.sorted_categories())?)
    }
}
