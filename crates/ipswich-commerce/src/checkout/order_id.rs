//! Externally visible order identifiers.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Symbols used in order ids: Crockford base32, without I, L, O and U.
pub const ORDER_ID_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Length of a generated order id (50 random bits).
pub const ORDER_ID_LEN: usize = 10;

/// The short token a customer sees on receipts and in their order history.
///
/// Generated ids are random, not sequential, so one id says nothing about
/// how many orders exist or what the next one will be. Uniqueness is
/// enforced by the order store; a collision is retried by the checkout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Wrap an existing id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random id.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let id = (0..ORDER_ID_LEN)
            .map(|_| char::from(ORDER_ID_ALPHABET[rng.gen_range(0..ORDER_ID_ALPHABET.len())]))
            .collect();
        Self(id)
    }

    /// Normalize user input: trims, uppercases and maps the look-alike
    /// letters I/L to 1 and O to 0.
    pub fn parse(input: &str) -> Self {
        let id = input
            .trim()
            .chars()
            .map(|c| match c.to_ascii_uppercase() {
                'I' | 'L' => '1',
                'O' => '0',
                other => other,
            })
            .collect();
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for OrderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_format() {
        let id = OrderId::generate();
        assert_eq!(id.as_str().len(), ORDER_ID_LEN);
        assert!(id.as_str().bytes().all(|b| ORDER_ID_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_no_ambiguous_symbols() {
        for c in [b'I', b'L', b'O', b'U'] {
            assert!(!ORDER_ID_ALPHABET.contains(&c));
        }
    }

    #[test]
    fn test_ten_thousand_ids_are_distinct() {
        let ids: HashSet<_> = (0..10_000).map(|_| OrderId::generate()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_parse_normalizes_input() {
        assert_eq!(OrderId::parse(" 7k2q0ilmzx "), OrderId::new("7K2Q011MZX"));
        assert_eq!(OrderId::parse("ABCDEFGH12").as_str(), "ABCDEFGH12");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&OrderId::new("7K2Q0M1ZXA")).unwrap();
        assert_eq!(json, r#""7K2Q0M1ZXA""#);
    }
}
