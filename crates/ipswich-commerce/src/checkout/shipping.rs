//! Shipping details captured at checkout.

use std::collections::HashMap;

use ipswich_auth::{User, UserProfile};
use serde::{Deserialize, Serialize};

use crate::error::CommerceError;

/// Maximum length of name and city fields.
const MAX_NAME_LEN: usize = 100;
/// Maximum length of the postal code.
const MAX_POSTAL_CODE_LEN: usize = 20;
/// Maximum length of the street address.
const MAX_ADDRESS_LEN: usize = 500;
/// Maximum length of an email address.
const MAX_EMAIL_LEN: usize = 254;

/// Where and to whom an order ships.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShippingInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
}

impl ShippingInfo {
    /// Build and validate shipping details.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
        postal_code: impl Into<String>,
        city: impl Into<String>,
    ) -> Result<Self, CommerceError> {
        let info = Self {
            first_name: first_name.into().trim().to_string(),
            last_name: last_name.into().trim().to_string(),
            email: email.into().trim().to_string(),
            address: address.into().trim().to_string(),
            postal_code: postal_code.into().trim().to_string(),
            city: city.into().trim().to_string(),
        };
        info.validate()?;
        Ok(info)
    }

    /// Build from submitted form fields.
    ///
    /// Missing keys are reported as missing fields rather than treated as
    /// empty strings that slip through.
    pub fn from_form(form: &HashMap<String, String>) -> Result<Self, CommerceError> {
        let field = |name: &'static str| -> Result<&str, CommerceError> {
            form.get(name)
                .map(String::as_str)
                .ok_or(CommerceError::InvalidShippingInfo {
                    field: name,
                    reason: "is required".to_string(),
                })
        };
        Self::new(
            field("first_name")?,
            field("last_name")?,
            field("email")?,
            field("address")?,
            field("postal_code")?,
            field("city")?,
        )
    }

    /// A draft pre-filled from the customer's account and saved profile.
    ///
    /// The draft is not validated; names are left for the customer to fill in.
    pub fn from_profile(user: &User, profile: &UserProfile) -> Self {
        Self {
            email: user.email().unwrap_or_default().to_string(),
            address: profile.address.clone(),
            postal_code: profile.postal_code.clone(),
            city: profile.city.clone(),
            ..Self::default()
        }
    }

    /// Check every field.
    pub fn validate(&self) -> Result<(), CommerceError> {
        required("first_name", &self.first_name, MAX_NAME_LEN)?;
        required("last_name", &self.last_name, MAX_NAME_LEN)?;
        required("email", &self.email, MAX_EMAIL_LEN)?;
        required("address", &self.address, MAX_ADDRESS_LEN)?;
        required("postal_code", &self.postal_code, MAX_POSTAL_CODE_LEN)?;
        required("city", &self.city, MAX_NAME_LEN)?;

        if !looks_like_email(&self.email) {
            return Err(CommerceError::InvalidShippingInfo {
                field: "email",
                reason: "is not a valid email address".to_string(),
            });
        }
        Ok(())
    }

    /// Get full name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Format as single line.
    pub fn one_line(&self) -> String {
        format!("{}, {} {}", self.address, self.city, self.postal_code)
    }
}

fn required(field: &'static str, value: &str, max_len: usize) -> Result<(), CommerceError> {
    if value.trim().is_empty() {
        return Err(CommerceError::InvalidShippingInfo {
            field,
            reason: "is required".to_string(),
        });
    }
    if value.chars().count() > max_len {
        return Err(CommerceError::InvalidShippingInfo {
            field,
            reason: format!("must be at most {} characters", max_len),
        });
    }
    Ok(())
}

fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, _)| !host.is_empty())
        && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipswich_auth::{Role, UserId};

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn complete_form() -> HashMap<String, String> {
        form(&[
            ("first_name", "Ada"),
            ("last_name", "Lovelace"),
            ("email", "ada@example.com"),
            ("address", "1 Tavern Street"),
            ("postal_code", "IP1 3AA"),
            ("city", "Ipswich"),
        ])
    }

    #[test]
    fn test_from_form() {
        let info = ShippingInfo::from_form(&complete_form()).unwrap();
        assert_eq!(info.full_name(), "Ada Lovelace");
        assert_eq!(info.one_line(), "1 Tavern Street, Ipswich IP1 3AA");
    }

    #[test]
    fn test_missing_field_is_reported() {
        let mut f = complete_form();
        f.remove("city");
        match ShippingInfo::from_form(&f) {
            Err(CommerceError::InvalidShippingInfo { field, .. }) => assert_eq!(field, "city"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_blank_field_is_rejected() {
        let mut f = complete_form();
        f.insert("first_name".to_string(), "   ".to_string());
        assert!(matches!(
            ShippingInfo::from_form(&f),
            Err(CommerceError::InvalidShippingInfo { field: "first_name", .. })
        ));
    }

    #[test]
    fn test_overlong_postal_code() {
        let mut f = complete_form();
        f.insert("postal_code".to_string(), "X".repeat(21));
        assert!(matches!(
            ShippingInfo::from_form(&f),
            Err(CommerceError::InvalidShippingInfo { field: "postal_code", .. })
        ));
    }

    #[test]
    fn test_email_shape() {
        assert!(looks_like_email("ada@example.com"));
        assert!(!looks_like_email("ada.example.com"));
        assert!(!looks_like_email("@example.com"));
        assert!(!looks_like_email("ada@localhost"));
        assert!(!looks_like_email("ada@.com"));
        assert!(!looks_like_email("ada@example."));
        assert!(!looks_like_email("a da@example.com"));
    }

    #[test]
    fn test_fields_are_trimmed() {
        let info = ShippingInfo::new(
            " Ada ",
            "Lovelace",
            " ada@example.com",
            "1 Tavern Street",
            "IP1 3AA",
            "Ipswich ",
        )
        .unwrap();
        assert_eq!(info.first_name, "Ada");
        assert_eq!(info.email, "ada@example.com");
        assert_eq!(info.city, "Ipswich");
    }

    #[test]
    fn test_from_profile_prefills_draft() {
        let user = User::authenticated(
            UserId::new("u1"),
            "ada",
            "ada@example.com",
            vec![Role::Customer],
        );
        let mut profile = UserProfile::for_user(UserId::new("u1"));
        profile.address = "1 Tavern Street".to_string();
        profile.city = "Ipswich".to_string();
        profile.postal_code = "IP1 3AA".to_string();

        let mut draft = ShippingInfo::from_profile(&user, &profile);
        assert_eq!(draft.email, "ada@example.com");
        assert!(draft.validate().is_err());

        draft.first_name = "Ada".to_string();
        draft.last_name = "Lovelace".to_string();
        assert!(draft.validate().is_ok());
    }
}
