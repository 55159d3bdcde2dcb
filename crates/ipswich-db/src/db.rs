//! Database handle, snapshot persistence and transactions.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use ipswich_commerce::store::{OrderWriter, StoreError};

use crate::tables::{Tables, SNAPSHOT_VERSION};
use crate::transaction::Transaction;
use crate::DbError;

/// Handle to the storefront database.
///
/// Cloning is cheap and every clone shares the same tables. All writes,
/// including whole order transactions, run one at a time under a single
/// table lock, so transactions are serializable. A file-backed database
/// rewrites its JSON snapshot before a write is reported as committed.
///
/// # Example
///
/// ```rust
/// use ipswich_db::Database;
///
/// let db = Database::in_memory();
/// assert_eq!(db.health().unwrap().products, 0);
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    tables: Mutex<Tables>,
    path: Option<PathBuf>,
}

impl Database {
    /// A database that lives only in memory.
    pub fn in_memory() -> Self {
        Self::from_tables(Tables::new(), None)
    }

    /// Open the database persisted at `path`, or an empty one if the file
    /// does not exist yet. The file is created on the first write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no snapshot yet, starting empty");
            return Ok(Self::from_tables(Tables::new(), Some(path.to_path_buf())));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| DbError::OpenError(format!("{}: {}", path.display(), e)))?;
        let tables: Tables = serde_json::from_str(&content)?;
        if tables.version > SNAPSHOT_VERSION {
            return Err(DbError::OpenError(format!(
                "{} was written by a newer version (format {})",
                path.display(),
                tables.version
            )));
        }
        tracing::debug!(
            path = %path.display(),
            products = tables.products.len(),
            orders = tables.orders.len(),
            "database snapshot loaded"
        );
        Ok(Self::from_tables(tables, Some(path.to_path_buf())))
    }

    fn from_tables(tables: Tables, path: Option<PathBuf>) -> Self {
        Self {
            inner: Arc::new(Inner {
                tables: Mutex::new(tables),
                path,
            }),
        }
    }

    /// Path of the backing snapshot file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.inner.path.as_deref()
    }

    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, Tables>, DbError> {
        self.inner.tables.lock().map_err(|_| DbError::Poisoned)
    }

    /// Read-only access to the tables.
    pub(crate) fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> Result<T, DbError> {
        let tables = self.lock()?;
        Ok(f(&tables))
    }

    /// A single-step write outside an order transaction.
    ///
    /// `f` must validate before mutating. If the snapshot cannot be written
    /// the tables are restored to their previous state.
    pub(crate) fn write<T>(
        &self,
        f: impl FnOnce(&mut Tables) -> Result<T, DbError>,
    ) -> Result<T, DbError> {
        let mut tables = self.lock()?;
        let backup = self.inner.path.as_ref().map(|_| tables.clone());
        let out = f(&mut tables)?;
        if let Err(e) = self.persist(&tables) {
            if let Some(backup) = backup {
                *tables = backup;
            }
            return Err(e);
        }
        Ok(out)
    }

    /// Run `f` as one transaction.
    ///
    /// The table lock is held for the whole closure. Every write goes
    /// through the transaction's undo log; if `f` fails, or the commit
    /// cannot be persisted, the log is replayed backwards.
    pub(crate) fn run_transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        E: From<StoreError>,
        F: FnOnce(&mut dyn OrderWriter) -> Result<T, E>,
    {
        let mut tables = self.lock().map_err(StoreError::from)?;
        let mut tx = Transaction::new(&mut *tables);

        let out = match f(&mut tx) {
            Ok(out) => out,
            Err(e) => {
                let undone = tx.rollback();
                tracing::warn!(writes = undone, "transaction rolled back");
                return Err(e);
            }
        };

        let writes = tx.commit_len();
        if let Err(e) = self.persist(tx.tables()) {
            tx.rollback();
            tracing::error!(error = %e, "commit could not be persisted, rolled back");
            return Err(StoreError::from(e).into());
        }
        tracing::debug!(writes, "transaction committed");
        Ok(out)
    }

    fn persist(&self, tables: &Tables) -> Result<(), DbError> {
        let Some(path) = &self.inner.path else {
            return Ok(());
        };
        let content =
            serde_json::to_vec_pretty(tables).map_err(|e| DbError::PersistError(e.to_string()))?;

        // Sibling file first, then renamed over the old snapshot.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content)
            .and_then(|()| fs::rename(&tmp, path))
            .map_err(|e| DbError::PersistError(format!("{}: {}", path.display(), e)))
    }
}
