//! Money type for representing monetary values.
//!
//! Amounts are exact base-10 decimals (`rust_decimal::Decimal`), so prices
//! such as 999.99 add and multiply without binary floating-point drift.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CommerceError;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    GBP,
    USD,
    EUR,
    JPY,
}

impl Currency {
    /// Get the currency code (e.g., "GBP").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::GBP => "GBP",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::JPY => "JPY",
        }
    }

    /// Get the currency symbol (e.g., "£").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::GBP => "\u{00a3}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::JPY => "\u{00a5}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "GBP" => Some(Currency::GBP),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "JPY" => Some(Currency::JPY),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Exact decimal amount in major units (e.g., pounds).
    pub amount: Decimal,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value.
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Create a Money value from an amount in minor units (e.g., pence).
    ///
    /// ```
    /// use ipswich_commerce::money::{Currency, Money};
    /// let price = Money::from_minor(99999, Currency::GBP);
    /// assert_eq!(price.display(), "\u{00a3}999.99");
    /// ```
    pub fn from_minor(minor_units: i64, currency: Currency) -> Self {
        Self::new(Decimal::new(minor_units, currency.decimal_places()), currency)
    }

    /// Parse a decimal string such as `"999.99"`.
    pub fn parse(amount: &str, currency: Currency) -> Result<Self, CommerceError> {
        let amount = Decimal::from_str(amount.trim())
            .map_err(|e| CommerceError::InvalidAmount(format!("{}: {}", amount, e)))?;
        Ok(Self::new(amount, currency))
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Add another Money value, returning `None` on currency mismatch or overflow.
    pub fn checked_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount
            .checked_add(other.amount)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply by a quantity, returning `None` on overflow.
    pub fn checked_mul(&self, quantity: i64) -> Option<Money> {
        self.amount
            .checked_mul(Decimal::from(quantity))
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Sum an iterator of Money values.
    ///
    /// Returns `None` if any value is in a different currency or the sum overflows.
    pub fn try_sum<'a>(iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.fold(Some(Money::zero(currency)), |acc, m| acc?.checked_add(m))
    }

    /// The amount rounded and padded to the currency's decimal places.
    pub fn rounded(&self) -> Decimal {
        let places = self.currency.decimal_places();
        let mut amount = self.amount.round_dp(places);
        amount.rescale(places);
        amount
    }

    /// Format as a display string (e.g., "£49.99").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.rounded())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        self.rounded().to_string()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gbp(s: &str) -> Money {
        Money::parse(s, Currency::GBP).unwrap()
    }

    #[test]
    fn test_money_from_minor() {
        let m = Money::from_minor(4999, Currency::GBP);
        assert_eq!(m.amount, Decimal::new(4999, 2));
        assert_eq!(m.currency, Currency::GBP);

        let m = Money::from_minor(100, Currency::JPY);
        assert_eq!(m.amount, Decimal::from(100));
    }

    #[test]
    fn test_money_parse() {
        assert_eq!(gbp("999.99").amount, Decimal::new(99999, 2));
        assert!(Money::parse("twelve", Currency::GBP).is_err());
    }

    #[test]
    fn test_money_display() {
        assert_eq!(gbp("49.99").display(), "\u{00a3}49.99");
        assert_eq!(gbp("100").display(), "\u{00a3}100.00");
        assert_eq!(Money::from_minor(100, Currency::JPY).display(), "\u{00a5}100");
    }

    #[test]
    fn test_money_multiply_is_exact() {
        let total = gbp("999.99").checked_mul(2).unwrap();
        assert_eq!(total, gbp("1999.98"));
        assert_eq!(total.display_amount(), "1999.98");
    }

    #[test]
    fn test_money_sum_has_no_representation_error() {
        // 0.1 has no exact binary representation; a float sum would drift.
        let dime = gbp("0.10");
        let many = vec![dime; 1000];
        let total = Money::try_sum(many.iter(), Currency::GBP).unwrap();
        assert_eq!(total, gbp("100.00"));

        let prices = [gbp("0.01"), gbp("0.02"), gbp("0.07")];
        let mut sum = Money::zero(Currency::GBP);
        for _ in 0..10_000 {
            for p in &prices {
                sum = sum.checked_add(p).unwrap();
            }
        }
        assert_eq!(sum, gbp("1000.00"));
    }

    #[test]
    fn test_money_currency_mismatch() {
        let gbp = Money::from_minor(1000, Currency::GBP);
        let eur = Money::from_minor(1000, Currency::EUR);
        assert!(gbp.checked_add(&eur).is_none());
        assert!(Money::try_sum([gbp, eur].iter(), Currency::GBP).is_none());
    }

    #[test]
    fn test_money_negative() {
        assert!(gbp("-1.00").is_negative());
        assert!(!gbp("0").is_negative());
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("GBP"), Some(Currency::GBP));
        assert_eq!(Currency::from_code("eur"), Some(Currency::EUR));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
