//! Store health summary for the status command.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{Database, DbError};

/// Row counts and backing file of the store.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub backend: String,
    pub categories: usize,
    pub products: usize,
    pub out_of_stock: usize,
    pub orders: usize,
    pub users: usize,
    pub timestamp: DateTime<Utc>,
}

impl Database {
    /// Take the table lock and count rows. Fails only if the lock is poisoned.
    pub fn health(&self) -> Result<HealthReport, DbError> {
        let backend = match self.path() {
            Some(path) => format!("file:{}", path.display()),
            None => "memory".to_string(),
        };
        self.read(|t| HealthReport {
            status: "healthy",
            backend,
            categories: t.categories.len(),
            products: t.products.len(),
            out_of_stock: t.products.values().filter(|p| !p.in_stock()).count(),
            orders: t.orders.len(),
            users: t.users.len(),
            timestamp: Utc::now(),
        })
    }
}
