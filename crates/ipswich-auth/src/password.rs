//! Password hashing backed by Argon2id.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher as _, PasswordVerifier};

use crate::AuthError;

/// Minimum accepted password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Password hasher producing PHC-format Argon2id strings.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a hasher with the default Argon2id parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash a password.
    ///
    /// Returns a string in PHC format: `$argon2id$v=19$m=...,t=...,p=...$salt$hash`
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self.argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    /// Verify a password against a stored hash.
    ///
    /// A well-formed hash that does not match yields `Ok(false)`; a hash that
    /// cannot be parsed is an error.
    pub fn verify(&self, password: &str, hash_str: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash_str)?;
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Validate password strength.
    pub fn validate_password(password: &str) -> Result<(), AuthError> {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::WeakPassword(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let has_letter = password.chars().any(char::is_alphabetic);
        let has_digit = password.chars().any(|c| c.is_ascii_digit());

        if !has_letter || !has_digit {
            return Err(AuthError::WeakPassword(
                "Password must contain letters and numbers".to_string(),
            ));
        }

        Ok(())
    }
}
