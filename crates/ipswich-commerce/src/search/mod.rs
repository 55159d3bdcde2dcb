//! Search module.
//!
//! Catalog filtering and ordering for the product list and category pages.

mod filter;
mod query;

pub use filter::Filter;
pub use query::SearchQuery;
