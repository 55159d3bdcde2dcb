//! Category types for product organization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::CategoryId;

/// How many sibling categories a category page suggests.
pub const RELATED_CATEGORY_LIMIT: usize = 4;

/// A product category. Names and slugs are unique across the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// URL-friendly slug.
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category.
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: CategoryId::generate(),
            name: name.into(),
            slug: slug.into(),
            description: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Other categories to suggest alongside this one.
    ///
    /// `all` is expected in display order (by name); this category is skipped.
    pub fn related<'a>(&self, all: &'a [Category]) -> Vec<&'a Category> {
        all.iter()
            .filter(|c| c.id != self.id)
            .take(RELATED_CATEGORY_LIMIT)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_creation() {
        let cat = Category::new("Electronics", "electronics").with_description("Gadgets");
        assert_eq!(cat.name, "Electronics");
        assert_eq!(cat.slug, "electronics");
        assert_eq!(cat.description, "Gadgets");
    }

    #[test]
    fn test_related_excludes_self_and_limits() {
        let all: Vec<Category> = ["Books", "Clothing", "Electronics", "Garden", "Sports", "Toys"]
            .iter()
            .map(|n| Category::new(*n, n.to_lowercase()))
            .collect();

        let related = all[2].related(&all);
        assert_eq!(related.len(), RELATED_CATEGORY_LIMIT);
        assert!(related.iter().all(|c| c.id != all[2].id));
        assert_eq!(related[0].name, "Books");
    }
}
