//! Transactional storage engine for the Ipswich Retail storefront.
//!
//! Implements the [`CatalogStore`](ipswich_commerce::store::CatalogStore) and
//! [`OrderStore`](ipswich_commerce::store::OrderStore) traits over in-memory
//! tables, optionally persisted as a JSON snapshot.
//!
//! # Example
//!
//! ```rust,ignore
//! use ipswich_commerce::prelude::*;
//! use ipswich_db::Database;
//!
//! let db = Database::open("ipswich-data.json")?;
//! db.seed_sample_catalog(Currency::GBP)?;
//!
//! let storefront = Storefront::new(db.clone());
//! let listing = storefront.list_products(Some("lamp"), None)?;
//! ```

mod catalog;
mod db;
mod error;
mod health;
mod orders;
mod seed;
mod tables;
mod transaction;
mod users;

pub use db::Database;
pub use error::DbError;
pub use health::HealthReport;
pub use seed::SeedReport;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Database, DbError, HealthReport, SeedReport};
}
