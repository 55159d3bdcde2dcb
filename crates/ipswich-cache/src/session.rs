//! Session management on top of the key-value cache.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{Cache, CacheError};

/// Maximum retry attempts for optimistic concurrency control.
const MAX_UPDATE_RETRIES: u32 = 3;

/// Default key namespace for sessions.
const DEFAULT_NAMESPACE: &str = "session";

/// A unique session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Create a new session ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new cryptographically secure session ID.
    pub fn generate() -> Self {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
        use rand::Rng;

        let bytes: [u8; 18] = rand::thread_rng().gen();
        Self(format!("sess_{}", URL_SAFE_NO_PAD.encode(bytes)))
    }

    /// Get the session ID as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Session data stored in the cache.
///
/// Generic over the user data type `T`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData<T> {
    /// The session ID.
    pub id: SessionId,
    /// User-defined session data.
    pub data: T,
    /// Number of writes this session has seen.
    pub version: u64,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// When the session was last written.
    pub last_accessed: DateTime<Utc>,
}

/// Typed session store.
///
/// # Example
///
/// ```rust
/// use ipswich_cache::{Cache, Session, SessionId};
///
/// let sessions = Session::<Vec<String>>::new(Cache::new());
/// let id = SessionId::from("abc123");
///
/// sessions.update(&id, |viewed| viewed.push("laptop".to_string())).unwrap();
///
/// assert_eq!(sessions.get(&id).unwrap(), Some(vec!["laptop".to_string()]));
/// ```
#[derive(Debug, Clone)]
pub struct Session<T> {
    cache: Cache,
    namespace: String,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Session<T>
where
    T: Serialize + DeserializeOwned + Default + Clone,
{
    /// Create a session store in the default namespace.
    pub fn new(cache: Cache) -> Self {
        Self::with_namespace(cache, DEFAULT_NAMESPACE)
    }

    /// Create a session store whose keys live under `namespace`.
    pub fn with_namespace(cache: Cache, namespace: impl Into<String>) -> Self {
        Self {
            cache,
            namespace: namespace.into(),
            _phantom: std::marker::PhantomData,
        }
    }

    /// Get session data if it exists.
    pub fn get(&self, id: &SessionId) -> Result<Option<T>, CacheError> {
        Ok(self.get_versioned(id)?.map(|s| s.data))
    }

    /// Get full session data including version.
    pub fn get_versioned(&self, id: &SessionId) -> Result<Option<SessionData<T>>, CacheError> {
        let key = self.session_key(id);
        self.cache.get::<SessionData<T>>(&key)
    }

    /// Set session data (unconditional write).
    pub fn set(&self, id: &SessionId, data: &T) -> Result<(), CacheError> {
        let previous = self.get_versioned(id)?;
        let version = previous.as_ref().map(|s| s.version + 1).unwrap_or(1);
        let created_at = previous.map(|s| s.created_at);
        let key = self.session_key(id);
        self.cache
            .set(&key, &self.wrap(id, data, version, created_at))
    }

    /// Delete a session.
    pub fn delete(&self, id: &SessionId) -> Result<(), CacheError> {
        let key = self.session_key(id);
        self.cache.delete(&key)
    }

    /// Check if a session exists.
    pub fn exists(&self, id: &SessionId) -> Result<bool, CacheError> {
        let key = self.session_key(id);
        self.cache.exists(&key)
    }

    /// Update session data with a closure, using optimistic concurrency control.
    ///
    /// The closure may run more than once: it is re-applied to fresh data
    /// each time a concurrent write is detected, up to `MAX_UPDATE_RETRIES`.
    ///
    /// # Returns
    /// - `Ok(T)` - The updated data after successful write
    /// - `Err(CacheError::ConcurrentModification)` - If all retries failed
    pub fn update<F>(&self, id: &SessionId, f: F) -> Result<T, CacheError>
    where
        F: Fn(&mut T),
    {
        let key = self.session_key(id);

        for attempt in 0..MAX_UPDATE_RETRIES {
            let current = self.cache.get_with_revision::<SessionData<T>>(&key)?;

            let (mut data, version, created_at, revision) = match current {
                Some((session, revision)) => (
                    session.data,
                    session.version,
                    Some(session.created_at),
                    Some(revision),
                ),
                None => (T::default(), 0, None, None),
            };

            f(&mut data);

            let session_data = self.wrap(id, &data, version + 1, created_at);
            if self.cache.compare_and_set(&key, revision, &session_data)? {
                return Ok(data);
            }
            tracing::debug!(session = %id, attempt, "session write conflict, retrying");
        }

        Err(CacheError::ConcurrentModification(
            "max retries exceeded".to_string(),
        ))
    }

    fn wrap(
        &self,
        id: &SessionId,
        data: &T,
        version: u64,
        created_at: Option<DateTime<Utc>>,
    ) -> SessionData<T> {
        let now = Utc::now();
        SessionData {
            id: id.clone(),
            data: data.clone(),
            version,
            created_at: created_at.unwrap_or(now),
            last_accessed: now,
        }
    }

    fn session_key(&self, id: &SessionId) -> String {
        crate::cache_key!(self.namespace.as_str(), id)
    }
}
