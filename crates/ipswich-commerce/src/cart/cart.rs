//! Cart and cart line types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::CartLines;
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// Maximum quantity allowed per cart line.
pub const MAX_QUANTITY_PER_LINE: i64 = 9999;

/// A shopping cart bound to one browsing session.
///
/// Snapshots are re-validated on deserialization: every line must hold
/// 1..=[`MAX_QUANTITY_PER_LINE`] units in the cart's currency, each product
/// appears once, and line totals are recomputed from the unit price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "CartSnapshot")]
pub struct Cart {
    /// Session the cart belongs to.
    pub session_id: String,
    /// Lines in insertion order, at most one per product.
    lines: Vec<CartLine>,
    /// Cart currency.
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Create a new empty cart for a session.
    pub fn new(session_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            session_id: session_id.into(),
            lines: Vec::new(),
            currency: Currency::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the currency of an empty cart.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Add `quantity` units of `product`.
    ///
    /// An existing line for the product grows by `quantity`; otherwise a new
    /// line is appended with the product's current price as its unit price.
    /// Stock is not consulted here.
    ///
    /// Returns an error if:
    /// - Quantity is not positive
    /// - The line would exceed MAX_QUANTITY_PER_LINE
    /// - The product is priced in a different currency
    pub fn add(&mut self, product: &Product, quantity: i64) -> Result<(), CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        if let Some(existing) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            let new_quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;
            existing.set_quantity(new_quantity)?;
            self.touch();
            tracing::debug!(product = %product.id, quantity = new_quantity, "cart line increased");
            return Ok(());
        }

        if product.price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: product.price.currency.code().to_string(),
            });
        }

        let line = CartLine::new(product, quantity)?;
        self.lines.push(line);
        self.touch();
        tracing::debug!(product = %product.id, quantity, "cart line added");
        Ok(())
    }

    /// Remove the line for a product. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| &l.product_id != product_id);
        let removed = self.lines.len() < len_before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Overwrite the quantity of a product's line.
    ///
    /// A quantity of zero or less removes the line. Returns whether the
    /// product had a line in the cart.
    pub fn set_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return Ok(self.remove(product_id));
        }

        match self.lines.iter_mut().find(|l| &l.product_id == product_id) {
            Some(line) => {
                line.set_quantity(quantity)?;
                self.touch();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Iterate over the lines in insertion order.
    pub fn lines(&self) -> CartLines<'_> {
        CartLines::new(&self.lines)
    }

    /// Get the line for a product.
    pub fn get_line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product_id == product_id)
    }

    /// Quantity of a product currently in the cart (0 if absent).
    pub fn quantity_of(&self, product_id: &ProductId) -> i64 {
        self.get_line(product_id).map(|l| l.quantity).unwrap_or(0)
    }

    /// Number of items: the sum of quantities, not the number of lines.
    pub fn len(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Number of distinct products.
    pub fn distinct_lines(&self) -> usize {
        self.lines.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Exact sum of all line totals; zero for an empty cart.
    pub fn total_price(&self) -> Result<Money, CommerceError> {
        Money::try_sum(self.lines.iter().map(|l| &l.line_total), self.currency)
            .ok_or(CommerceError::Overflow)
    }

    /// Remove all lines.
    pub fn clear(&mut self) {
        if !self.lines.is_empty() {
            self.lines.clear();
            self.touch();
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new("anonymous")
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = crate::cart::CartLineView<'a>;
    type IntoIter = CartLines<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines()
    }
}

/// Unchecked form of a [`Cart`] as read from a session snapshot.
#[derive(Deserialize)]
struct CartSnapshot {
    session_id: String,
    #[serde(default)]
    lines: Vec<CartLineSnapshot>,
    currency: Currency,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct CartLineSnapshot {
    product_id: ProductId,
    product_name: String,
    quantity: i64,
    unit_price: Money,
}

impl TryFrom<CartSnapshot> for Cart {
    type Error = CommerceError;

    fn try_from(snapshot: CartSnapshot) -> Result<Self, Self::Error> {
        let mut lines: Vec<CartLine> = Vec::with_capacity(snapshot.lines.len());
        for raw in snapshot.lines {
            if raw.quantity <= 0 {
                return Err(CommerceError::InvalidQuantity(raw.quantity));
            }
            if raw.unit_price.currency != snapshot.currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: snapshot.currency.code().to_string(),
                    got: raw.unit_price.currency.code().to_string(),
                });
            }
            if lines.iter().any(|l| l.product_id == raw.product_id) {
                return Err(CommerceError::InvalidCart(format!(
                    "duplicate line for product {}",
                    raw.product_id
                )));
            }
            let mut line = CartLine {
                product_id: raw.product_id,
                product_name: raw.product_name,
                quantity: 0,
                unit_price: raw.unit_price,
                line_total: Money::zero(raw.unit_price.currency),
            };
            line.set_quantity(raw.quantity)?;
            lines.push(line);
        }

        Ok(Self {
            session_id: snapshot.session_id,
            lines,
            currency: snapshot.currency,
            created_at: snapshot.created_at,
            updated_at: snapshot.updated_at,
        })
    }
}

/// One product's entry in a cart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CartLine {
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub product_name: String,
    /// Always at least 1.
    pub quantity: i64,
    /// Price snapshot taken when the line was created.
    pub unit_price: Money,
    /// `unit_price * quantity`.
    pub line_total: Money,
}

impl CartLine {
    fn new(product: &Product, quantity: i64) -> Result<Self, CommerceError> {
        let mut line = Self {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            quantity: 0,
            unit_price: product.price,
            line_total: Money::zero(product.price.currency),
        };
        line.set_quantity(quantity)?;
        Ok(line)
    }

    fn set_quantity(&mut self, quantity: i64) -> Result<(), CommerceError> {
        if quantity > MAX_QUANTITY_PER_LINE {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_LINE,
            ));
        }
        self.line_total = self
            .unit_price
            .checked_mul(quantity)
            .ok_or(CommerceError::Overflow)?;
        self.quantity = quantity;
        Ok(())
    }
}
