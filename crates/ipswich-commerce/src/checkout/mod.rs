//! Checkout module.
//!
//! Turns a session cart into a persisted order: shipping details, order
//! identifiers, the order records themselves and the orchestrator that ties
//! them together inside one store transaction.

mod order;
mod order_id;
mod orchestrator;
mod shipping;

pub use orchestrator::{Checkout, MAX_ORDER_ID_ATTEMPTS};
pub use order::{Order, OrderItem, OrderStatus};
pub use order_id::{OrderId, ORDER_ID_ALPHABET, ORDER_ID_LEN};
pub use shipping::ShippingInfo;
