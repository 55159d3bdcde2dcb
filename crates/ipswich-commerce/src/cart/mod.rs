//! Shopping cart module.
//!
//! A cart maps products to quantities and add-time price snapshots. It is a
//! plain value: callers load it from the shopper's session at the start of
//! a request and write it back explicitly at the end.

mod cart;
mod view;

pub use cart::{Cart, CartLine, MAX_QUANTITY_PER_LINE};
pub use view::{CartLineView, CartLines};
