//! Type-safe key-value caching layer for the Ipswich Retail storefront.
//!
//! Values are stored as JSON, each key carrying a revision number so that
//! writers can use compare-and-swap instead of blind overwrites.
//!
//! # Example
//!
//! ```rust
//! use ipswich_cache::Cache;
//!
//! let cache = Cache::new();
//! cache.set("greeting", &"hello").unwrap();
//! let value: Option<String> = cache.get("greeting").unwrap();
//! assert_eq!(value.as_deref(), Some("hello"));
//! ```

mod error;
mod kv;
mod session;

pub use error::CacheError;
pub use kv::Cache;
pub use session::{Session, SessionData, SessionId};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{cache_key, Cache, CacheError, Session, SessionId};
}
