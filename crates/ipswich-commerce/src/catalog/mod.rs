//! Product catalog module.
//!
//! Contains types for products and categories.

mod category;
mod product;

pub use category::{Category, RELATED_CATEGORY_LIMIT};
pub use product::Product;

/// Turn a display name into a URL slug ("Home & Garden" -> "home-garden").
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Home & Garden"), "home-garden");
        assert_eq!(slugify("  Laptop Pro 15\" "), "laptop-pro-15");
        assert_eq!(slugify("Books"), "books");
    }
}
