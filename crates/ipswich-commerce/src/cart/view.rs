//! Read-only views of cart lines for presentation.

use serde::Serialize;

use crate::cart::CartLine;
use crate::ids::ProductId;
use crate::money::Money;

/// One cart line as shown to the shopper.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CartLineView<'a> {
    pub product_id: &'a ProductId,
    pub product_name: &'a str,
    pub quantity: i64,
    /// Price captured when the product was first added.
    pub unit_price: Money,
    /// `unit_price * quantity`.
    pub line_total: Money,
}

impl<'a> From<&'a CartLine> for CartLineView<'a> {
    fn from(line: &'a CartLine) -> Self {
        Self {
            product_id: &line.product_id,
            product_name: &line.product_name,
            quantity: line.quantity,
            unit_price: line.unit_price,
            line_total: line.line_total,
        }
    }
}

/// Lazy iterator over a cart's lines in insertion order.
///
/// Cheap to clone; call [`Cart::lines`](crate::cart::Cart::lines) again to
/// start over.
#[derive(Debug, Clone)]
pub struct CartLines<'a> {
    inner: std::slice::Iter<'a, CartLine>,
}

impl<'a> CartLines<'a> {
    pub(crate) fn new(lines: &'a [CartLine]) -> Self {
        Self { inner: lines.iter() }
    }
}

impl<'a> Iterator for CartLines<'a> {
    type Item = CartLineView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(CartLineView::from)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for CartLines<'_> {}
