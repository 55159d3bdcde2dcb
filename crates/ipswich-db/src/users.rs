//! Customer accounts and profiles.

use ipswich_auth::{AuthError, PasswordHasher, Role, User, UserCredentials, UserId, UserProfile};

use crate::{Database, DbError};

impl Database {
    /// Create a customer account. Usernames and emails are unique
    /// (case-insensitive).
    pub fn register_user(
        &self,
        hasher: &PasswordHasher,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserCredentials, DbError> {
        // Hash before taking the table lock.
        let credentials = UserCredentials::register(hasher, username, email, password)?;
        self.write(|tables| {
            let taken = tables.users.values().any(|u| {
                u.username.eq_ignore_ascii_case(&credentials.username)
                    || u.email.eq_ignore_ascii_case(&credentials.email)
            });
            if taken {
                return Err(AuthError::UserAlreadyExists(credentials.username.clone()).into());
            }
            tables
                .users
                .insert(credentials.user_id.clone(), credentials.clone());
            tables.profiles.insert(
                credentials.user_id.clone(),
                UserProfile::for_user(credentials.user_id.clone()),
            );
            tracing::info!(user = %credentials.user_id, username = %credentials.username, "user registered");
            Ok(credentials)
        })
    }

    pub fn find_user_by_username(&self, username: &str) -> Result<Option<UserCredentials>, DbError> {
        self.read(|t| {
            t.users
                .values()
                .find(|u| u.username.eq_ignore_ascii_case(username))
                .cloned()
        })
    }

    pub fn get_user(&self, user_id: &UserId) -> Result<Option<UserCredentials>, DbError> {
        self.read(|t| t.users.get(user_id).cloned())
    }

    /// Check a username and password. Unknown usernames fail exactly like
    /// wrong passwords.
    pub fn authenticate(
        &self,
        hasher: &PasswordHasher,
        username: &str,
        password: &str,
    ) -> Result<User, DbError> {
        match self.find_user_by_username(username)? {
            Some(credentials) => Ok(credentials.authenticate(hasher, password)?),
            None => {
                tracing::warn!(username, "login attempt for unknown user");
                Err(AuthError::InvalidCredentials.into())
            }
        }
    }

    /// Replace a user's roles.
    pub fn set_user_roles(&self, username: &str, roles: Vec<Role>) -> Result<(), DbError> {
        self.write(|tables| {
            let user = tables
                .users
                .values_mut()
                .find(|u| u.username.eq_ignore_ascii_case(username))
                .ok_or_else(|| AuthError::UserNotFound(username.to_string()))?;
            user.roles = roles;
            Ok(())
        })
    }

    /// The user's saved profile (blank if never filled in).
    pub fn get_profile(&self, user_id: &UserId) -> Result<UserProfile, DbError> {
        self.read(|t| {
            t.profiles
                .get(user_id)
                .cloned()
                .unwrap_or_else(|| UserProfile::for_user(user_id.clone()))
        })
    }

    pub fn save_profile(&self, profile: UserProfile) -> Result<(), DbError> {
        let user_id = profile
            .user_id
            .clone()
            .ok_or_else(|| DbError::Invalid("profile has no owner".to_string()))?;
        self.write(|tables| {
            if !tables.users.contains_key(&user_id) {
                return Err(DbError::not_found("user", &user_id));
            }
            tables.profiles.insert(user_id, profile);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_authenticate() {
        let db = Database::in_memory();
        let hasher = PasswordHasher::new();
        let creds = db
            .register_user(&hasher, "ada", "ada@example.com", "analytical1")
            .unwrap();

        let user = db.authenticate(&hasher, "ADA", "analytical1").unwrap();
        assert_eq!(user.user_id(), Some(&creds.user_id));

        assert!(matches!(
            db.authenticate(&hasher, "ada", "wrong-password1"),
            Err(DbError::Auth(AuthError::InvalidCredentials))
        ));
        assert!(matches!(
            db.authenticate(&hasher, "nobody", "analytical1"),
            Err(DbError::Auth(AuthError::InvalidCredentials))
        ));

        assert!(matches!(
            db.register_user(&hasher, "Ada", "other@example.com", "analytical1"),
            Err(DbError::Auth(AuthError::UserAlreadyExists(_)))
        ));
    }

    #[test]
    fn test_profile_round_trip() {
        let db = Database::in_memory();
        let hasher = PasswordHasher::new();
        let creds = db
            .register_user(&hasher, "ada", "ada@example.com", "analytical1")
            .unwrap();

        assert!(db.get_profile(&creds.user_id).unwrap().is_blank());

        let mut profile = db.get_profile(&creds.user_id).unwrap();
        profile.city = "Ipswich".to_string();
        db.save_profile(profile).unwrap();
        assert_eq!(db.get_profile(&creds.user_id).unwrap().city, "Ipswich");

        let stranger = UserProfile::for_user(UserId::new("ghost"));
        assert!(db.save_profile(stranger).is_err());
    }
}
