//! Checkout orchestrator: cart in, persisted order out.

use ipswich_auth::User;

use crate::cart::{Cart, CartLineView};
use crate::checkout::{Order, OrderId, OrderItem, ShippingInfo};
use crate::error::CommerceError;
use crate::ids::UserId;
use crate::store::{OrderStore, OrderWriter, StoreError};

/// How many fresh order ids to try before giving up on a run of collisions.
pub const MAX_ORDER_ID_ATTEMPTS: usize = 5;

/// Places orders against an [`OrderStore`].
#[derive(Debug, Clone)]
pub struct Checkout<S> {
    store: S,
}

impl<S: OrderStore> Checkout<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Convert the cart into an order.
    ///
    /// Stock checks, the order header, the items, the stock decrements and
    /// the total are written in one store transaction. On any error nothing
    /// is persisted and the cart is left as it was. On success the cart is
    /// emptied after the transaction has committed.
    pub fn checkout(
        &self,
        user: &User,
        cart: &mut Cart,
        shipping: ShippingInfo,
    ) -> Result<Order, CommerceError> {
        let user_id = user
            .user_id()
            .ok_or(CommerceError::AuthenticationRequired)?
            .clone();
        if cart.len() <= 0 {
            return Err(CommerceError::EmptyCart);
        }
        shipping.validate()?;

        let snapshot: &Cart = cart;
        let order = self
            .store
            .transaction(|tx| place_order(tx, &user_id, snapshot, shipping))?;

        cart.clear();
        tracing::info!(
            order_id = %order.id,
            user = %user_id,
            items = order.item_count(),
            total = %order.total_cost,
            "order placed"
        );
        Ok(order)
    }
}

fn place_order(
    tx: &mut dyn OrderWriter,
    user_id: &UserId,
    cart: &Cart,
    shipping: ShippingInfo,
) -> Result<Order, CommerceError> {
    for line in cart.lines() {
        if line.quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(line.quantity));
        }
        let product = tx
            .get_product(line.product_id)?
            .ok_or_else(|| CommerceError::ProductNotFound(line.product_id.to_string()))?;
        if product.stock < line.quantity {
            tracing::warn!(
                product = %product.id,
                requested = line.quantity,
                available = product.stock,
                "checkout rejected: insufficient stock"
            );
            return Err(insufficient_stock(&line, product.stock));
        }
    }

    let mut order = create_order(tx, user_id, shipping, cart)?;

    for line in cart.lines() {
        let item = OrderItem::new(
            order.id.clone(),
            line.product_id.clone(),
            line.product_name,
            line.unit_price,
            line.quantity,
        );
        tx.create_order_item(&item)?;

        if !tx.update_product_stock(line.product_id, -line.quantity)? {
            // Stock changed after the check above; report what is there now.
            let available = tx.get_product(line.product_id)?.map_or(0, |p| p.stock);
            tracing::warn!(
                product = %line.product_id,
                requested = line.quantity,
                available,
                "stock decrement refused, rolling back"
            );
            return Err(insufficient_stock(&line, available));
        }
        order.items.push(item);
    }

    let total = order.computed_total()?;
    tx.set_order_total(&order.id, total)?;
    order.total_cost = total;
    Ok(order)
}

/// Insert the order header under a fresh id, retrying on id collisions.
fn create_order(
    tx: &mut dyn OrderWriter,
    user_id: &UserId,
    shipping: ShippingInfo,
    cart: &Cart,
) -> Result<Order, CommerceError> {
    let mut order = Order::new(OrderId::generate(), user_id.clone(), shipping, cart.currency);
    let mut attempt = 1;
    loop {
        match tx.create_order(&order) {
            Ok(()) => return Ok(order),
            Err(StoreError::Conflict(reason)) if attempt < MAX_ORDER_ID_ATTEMPTS => {
                tracing::debug!(order_id = %order.id, attempt, %reason, "order id collision");
                order.id = OrderId::generate();
                attempt += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn insufficient_stock(line: &CartLineView<'_>, available: i64) -> CommerceError {
    CommerceError::InsufficientStock {
        product_id: line.product_id.clone(),
        product_name: line.product_name.to_string(),
        requested: line.quantity,
        available,
    }
}
