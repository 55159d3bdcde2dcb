//! Session-backed cart storage.
//!
//! A request loads the shopper's cart, mutates the value, and saves it back
//! explicitly. Nothing is written implicitly.

use ipswich_cache::{Cache, Session, SessionId};

use crate::cart::Cart;
use crate::error::CommerceError;
use crate::money::Currency;

/// Key namespace for carts in the cache.
const CART_NAMESPACE: &str = "cart";

/// Carts keyed by browsing session.
#[derive(Debug, Clone)]
pub struct CartSessions {
    sessions: Session<Cart>,
    currency: Currency,
}

impl CartSessions {
    pub fn new(cache: Cache) -> Self {
        Self {
            sessions: Session::with_namespace(cache, CART_NAMESPACE),
            currency: Currency::default(),
        }
    }

    /// Currency for newly created carts.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// The session's cart, or a fresh empty cart bound to it.
    pub fn load(&self, session_id: &SessionId) -> Result<Cart, CommerceError> {
        match self.sessions.get(session_id)? {
            Some(cart) => Ok(cart),
            None => Ok(Cart::new(session_id.as_str()).with_currency(self.currency)),
        }
    }

    /// Write the cart back under its own session.
    ///
    /// The write is a compare-and-swap on the session revision, so a save
    /// racing another writer retries rather than clobbering a half-written
    /// record.
    pub fn save(&self, cart: &Cart) -> Result<(), CommerceError> {
        let id = SessionId::from(cart.session_id.as_str());
        self.sessions.update(&id, |stored| *stored = cart.clone())?;
        tracing::debug!(session = %id, lines = cart.distinct_lines(), "cart saved");
        Ok(())
    }

    /// Forget the session's cart.
    pub fn discard(&self, session_id: &SessionId) -> Result<(), CommerceError> {
        Ok(self.sessions.delete(session_id)?)
    }
}
