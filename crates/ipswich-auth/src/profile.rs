//! Customer profile: contact and delivery details kept alongside the account.

use serde::{Deserialize, Serialize};

use crate::UserId;

/// Optional contact details a customer can store for faster checkout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
}

impl UserProfile {
    /// Create an empty profile for a user.
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::default()
        }
    }

    /// True when nothing beyond the owner has been filled in.
    pub fn is_blank(&self) -> bool {
        [
            &self.phone_number,
            &self.address,
            &self.city,
            &self.postal_code,
            &self.country,
        ]
        .iter()
        .all(|field| field.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_profile() {
        let mut profile = UserProfile::for_user(UserId::new("u-1"));
        assert!(profile.is_blank());

        profile.city = "Ipswich".to_string();
        assert!(!profile.is_blank());
    }
}
