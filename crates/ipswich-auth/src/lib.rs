//! Authentication primitives for the Ipswich Retail storefront.
//!
//! The storefront core never authenticates anyone itself; it only checks
//! that the [`User`] handed to it is [`User::Authenticated`]. This crate
//! provides that type, stored credentials, customer profiles and password
//! hashing for whichever front end does the login.

mod error;
mod password;
mod profile;
mod user;

pub use error::AuthError;
pub use password::PasswordHasher;
pub use profile::UserProfile;
pub use user::{Role, User, UserCredentials, UserId};
