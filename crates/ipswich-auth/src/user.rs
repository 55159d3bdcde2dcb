//! User types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AuthError, PasswordHasher};

/// Identifier of a registered customer account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Create a new ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random user ID.
    pub fn generate() -> Self {
        Self(format!("usr_{:016x}", rand::random::<u64>()))
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// User role for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular customer.
    #[default]
    Customer,
    /// Store staff who may move orders through fulfilment.
    Staff,
    /// Store administrator.
    Admin,
}

impl Role {
    /// Get role as string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Staff => "staff",
            Role::Admin => "admin",
        }
    }

    /// Check if this role has at least the given permission level.
    pub fn has_permission(&self, required: Role) -> bool {
        self.level() >= required.level()
    }

    fn level(&self) -> u8 {
        match self {
            Role::Customer => 0,
            Role::Staff => 1,
            Role::Admin => 2,
        }
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "staff" => Ok(Role::Staff),
            "admin" => Ok(Role::Admin),
            other => Err(AuthError::InvalidField {
                field: "role",
                reason: format!("unknown role '{}'", other),
            }),
        }
    }
}

/// The party making a request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum User {
    /// Anonymous/guest visitor identified only by their browsing session.
    Anonymous {
        /// Session identifier.
        session_id: String,
    },
    /// Logged-in customer or staff member.
    Authenticated {
        id: UserId,
        username: String,
        email: String,
        roles: Vec<Role>,
    },
}

impl User {
    /// Create a new anonymous user.
    pub fn anonymous(session_id: impl Into<String>) -> Self {
        User::Anonymous {
            session_id: session_id.into(),
        }
    }

    /// Create a new authenticated user.
    pub fn authenticated(
        id: UserId,
        username: impl Into<String>,
        email: impl Into<String>,
        roles: Vec<Role>,
    ) -> Self {
        User::Authenticated {
            id,
            username: username.into(),
            email: email.into(),
            roles,
        }
    }

    /// Check if user is authenticated.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, User::Authenticated { .. })
    }

    /// Get user ID if authenticated.
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            User::Authenticated { id, .. } => Some(id),
            User::Anonymous { .. } => None,
        }
    }

    /// Get email if authenticated.
    pub fn email(&self) -> Option<&str> {
        match self {
            User::Authenticated { email, .. } => Some(email),
            User::Anonymous { .. } => None,
        }
    }

    /// Get display name.
    pub fn display_name(&self) -> &str {
        match self {
            User::Authenticated { username, .. } => username,
            User::Anonymous { session_id } => session_id,
        }
    }

    /// Check if user has at least the given permission level.
    pub fn has_permission(&self, required: Role) -> bool {
        match self {
            User::Authenticated { roles, .. } => roles.iter().any(|r| r.has_permission(required)),
            User::Anonymous { .. } => false,
        }
    }
}

/// Stored user credentials (for the account table).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCredentials {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    /// PHC-format Argon2 hash.
    pub password_hash: String,
    pub roles: Vec<Role>,
    pub created_at: DateTime<Utc>,
}

impl UserCredentials {
    /// Validate the inputs, hash the password and build a customer account.
    pub fn register(
        hasher: &PasswordHasher,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, AuthError> {
        let username = username.trim();
        if username.is_empty() || username.len() > 150 {
            return Err(AuthError::InvalidField {
                field: "username",
                reason: "must be between 1 and 150 characters".to_string(),
            });
        }
        if !username
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
        {
            return Err(AuthError::InvalidField {
                field: "username",
                reason: "may contain only letters, digits and @.+-_".to_string(),
            });
        }
        if !email.contains('@') {
            return Err(AuthError::InvalidField {
                field: "email",
                reason: "is not a valid address".to_string(),
            });
        }
        PasswordHasher::validate_password(password)?;

        Ok(Self {
            user_id: UserId::generate(),
            username: username.to_string(),
            email: email.trim().to_string(),
            password_hash: hasher.hash(password)?,
            roles: vec![Role::Customer],
            created_at: Utc::now(),
        })
    }

    /// Check a password and produce the authenticated user on success.
    pub fn authenticate(&self, hasher: &PasswordHasher, password: &str) -> Result<User, AuthError> {
        if !hasher.verify(password, &self.password_hash)? {
            tracing::warn!(username = %self.username, "rejected login attempt");
            return Err(AuthError::InvalidCredentials);
        }
        Ok(self.to_user())
    }

    /// The authenticated user these credentials belong to.
    pub fn to_user(&self) -> User {
        User::authenticated(
            self.user_id.clone(),
            self.username.clone(),
            self.email.clone(),
            self.roles.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_user() {
        let user = User::anonymous("sess_abc");
        assert!(!user.is_authenticated());
        assert!(user.user_id().is_none());
        assert_eq!(user.display_name(), "sess_abc");
    }

    #[test]
    fn test_role_permissions() {
        assert!(Role::Admin.has_permission(Role::Staff));
        assert!(Role::Staff.has_permission(Role::Customer));
        assert!(!Role::Customer.has_permission(Role::Staff));
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("staff".parse::<Role>().unwrap(), Role::Staff);
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn test_register_and_authenticate() {
        let hasher = PasswordHasher::new();
        let creds =
            UserCredentials::register(&hasher, "testuser", "test@example.com", "testpass123")
                .unwrap();

        let user = creds.authenticate(&hasher, "testpass123").unwrap();
        assert!(user.is_authenticated());
        assert_eq!(user.display_name(), "testuser");
        assert!(!user.has_permission(Role::Staff));

        let err = creds.authenticate(&hasher, "wrong-pass-1").unwrap_err();
        assert!(err.is_auth_failure());
    }

    #[test]
    fn test_register_rejects_bad_username() {
        let hasher = PasswordHasher::new();
        let result = UserCredentials::register(&hasher, "bad name", "a@b.com", "testpass123");
        assert!(matches!(
            result,
            Err(AuthError::InvalidField { field: "username", .. })
        ));
    }

    #[test]
    fn test_user_serialization() {
        let user = User::authenticated(UserId::new("u-1"), "jane", "jane@example.com", vec![]);
        let json = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }
}
