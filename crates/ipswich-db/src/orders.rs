//! Order tables and order administration.

use chrono::Utc;
use ipswich_commerce::checkout::{Order, OrderId, OrderStatus};
use ipswich_commerce::ids::UserId;
use ipswich_commerce::store::{OrderStore, OrderWriter, StoreError};

use crate::{Database, DbError};

impl Database {
    /// Change an order's status. Checkout never calls this; it is for staff.
    pub fn update_order_status(
        &self,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, DbError> {
        self.write(|tables| {
            let order = tables
                .orders
                .get_mut(order_id)
                .ok_or_else(|| DbError::not_found("order", order_id))?;
            let previous = order.status;
            order.status = status;
            order.updated_at = Utc::now();
            tracing::info!(
                order_id = %order_id,
                from = previous.as_str(),
                to = status.as_str(),
                "order status changed"
            );
            Ok(())
        })?;
        self.read(|t| t.order_with_items(order_id))?
            .ok_or_else(|| DbError::not_found("order", order_id))
    }

    /// Every order, newest first, for the staff order list.
    pub fn list_orders(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, DbError> {
        self.read(|t| {
            let mut orders: Vec<Order> = t
                .orders
                .keys()
                .filter_map(|id| t.order_with_items(id))
                .filter(|o| status.map_or(true, |s| o.status == s))
                .collect();
            orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            orders
        })
    }
}

impl OrderStore for Database {
    fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        E: From<StoreError>,
        F: FnOnce(&mut dyn OrderWriter) -> Result<T, E>,
    {
        self.run_transaction(f)
    }

    fn get_orders_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, StoreError> {
        Ok(self.read(|t| {
            let mut orders: Vec<Order> = t
                .orders
                .values()
                .filter(|o| o.is_owned_by(user_id))
                .filter_map(|o| t.order_with_items(&o.id))
                .collect();
            orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            orders
        })?)
    }

    fn get_order(&self, order_id: &OrderId) -> Result<Option<Order>, StoreError> {
        Ok(self.read(|t| t.order_with_items(order_id))?)
    }
}
