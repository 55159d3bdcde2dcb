//! Order transactions over the locked tables.

use ipswich_commerce::catalog::Product;
use ipswich_commerce::checkout::{Order, OrderId, OrderItem};
use ipswich_commerce::ids::ProductId;
use ipswich_commerce::money::Money;
use ipswich_commerce::store::{OrderWriter, StoreError};

use crate::tables::{Tables, Undo};

/// Writes made while the table lock is held, each paired with its inverse.
pub(crate) struct Transaction<'a> {
    tables: &'a mut Tables,
    undo: Vec<Undo>,
}

impl<'a> Transaction<'a> {
    pub fn new(tables: &'a mut Tables) -> Self {
        Self {
            tables,
            undo: Vec::new(),
        }
    }

    pub fn tables(&self) -> &Tables {
        self.tables
    }

    /// Number of writes that would be committed.
    pub fn commit_len(&self) -> usize {
        self.undo.len()
    }

    /// Revert every write, newest first. Returns how many were reverted.
    pub fn rollback(&mut self) -> usize {
        let count = self.undo.len();
        while let Some(entry) = self.undo.pop() {
            self.tables.undo(entry);
        }
        count
    }
}

impl OrderWriter for Transaction<'_> {
    fn get_product(&mut self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self.tables.products.get(id).cloned())
    }

    fn create_order(&mut self, order: &Order) -> Result<(), StoreError> {
        if self.tables.orders.contains_key(&order.id) {
            return Err(StoreError::Conflict(format!("order id {} already exists", order.id)));
        }
        let mut header = order.clone();
        header.items.clear();
        self.tables.orders.insert(order.id.clone(), header);
        self.undo.push(Undo::RemoveOrder(order.id.clone()));
        Ok(())
    }

    fn create_order_item(&mut self, item: &OrderItem) -> Result<(), StoreError> {
        if !self.tables.orders.contains_key(&item.order_id) {
            return Err(StoreError::not_found("order", &item.order_id));
        }
        if !self.tables.products.contains_key(&item.product_id) {
            return Err(StoreError::not_found("product", &item.product_id));
        }
        self.tables.order_items.push(item.clone());
        self.undo.push(Undo::PopOrderItem);
        Ok(())
    }

    fn update_product_stock(&mut self, id: &ProductId, delta: i64) -> Result<bool, StoreError> {
        let product = self
            .tables
            .products
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("product", id))?;

        let previous = product.stock;
        match previous.checked_add(delta) {
            Some(stock) if stock >= 0 => {
                product.stock = stock;
                self.undo.push(Undo::RestoreStock(id.clone(), previous));
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn set_order_total(&mut self, order_id: &OrderId, total: Money) -> Result<(), StoreError> {
        let order = self
            .tables
            .orders
            .get_mut(order_id)
            .ok_or_else(|| StoreError::not_found("order", order_id))?;
        let previous = order.total_cost;
        order.total_cost = total;
        self.undo
            .push(Undo::RestoreOrderTotal(order_id.clone(), previous));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipswich_commerce::catalog::Category;
    use ipswich_commerce::checkout::ShippingInfo;
    use ipswich_commerce::ids::UserId;
    use ipswich_commerce::money::Currency;

    fn tables_with_stock(stock: i64) -> (Tables, ProductId) {
        let mut tables = Tables::new();
        let category = Category::new("Electronics", "electronics");
        let product = Product::new(
            "Laptop",
            "laptop",
            category.id.clone(),
            Money::from_minor(99999, Currency::GBP),
        )
        .with_stock(stock);
        let id = product.id.clone();
        tables.categories.insert(category.id.clone(), category);
        tables.products.insert(id.clone(), product);
        (tables, id)
    }

    fn order() -> Order {
        let shipping = ShippingInfo::new(
            "Ada",
            "Lovelace",
            "ada@example.com",
            "1 Tavern Street",
            "IP1 3AA",
            "Ipswich",
        )
        .unwrap();
        Order::new(OrderId::generate(), UserId::new("u1"), shipping, Currency::GBP)
    }

    #[test]
    fn test_conditional_decrement() {
        let (mut tables, id) = tables_with_stock(10);
        let mut tx = Transaction::new(&mut tables);

        assert!(tx.update_product_stock(&id, -6).unwrap());
        assert!(!tx.update_product_stock(&id, -6).unwrap());
        assert!(tx.update_product_stock(&id, -4).unwrap());
        assert!(!tx.update_product_stock(&id, -1).unwrap());
        assert_eq!(tx.commit_len(), 2);
        assert_eq!(tables.products[&id].stock, 0);
    }

    #[test]
    fn test_decrement_overflow_is_refused() {
        let (mut tables, id) = tables_with_stock(10);
        let mut tx = Transaction::new(&mut tables);
        assert!(!tx.update_product_stock(&id, i64::MIN).unwrap());
    }

    #[test]
    fn test_rollback_restores_everything() {
        let (mut tables, id) = tables_with_stock(10);
        let order = order();
        {
            let mut tx = Transaction::new(&mut tables);
            tx.create_order(&order).unwrap();
            let item = OrderItem::new(
                order.id.clone(),
                id.clone(),
                "Laptop",
                Money::from_minor(99999, Currency::GBP),
                3,
            );
            tx.create_order_item(&item).unwrap();
            tx.update_product_stock(&id, -3).unwrap();
            tx.set_order_total(&order.id, Money::from_minor(299997, Currency::GBP))
                .unwrap();
            assert_eq!(tx.rollback(), 4);
        }

        assert!(tables.orders.is_empty());
        assert!(tables.order_items.is_empty());
        assert_eq!(tables.products[&id].stock, 10);
    }

    #[test]
    fn test_duplicate_order_id_conflicts_without_writing() {
        let (mut tables, _) = tables_with_stock(10);
        let order = order();
        let mut tx = Transaction::new(&mut tables);
        tx.create_order(&order).unwrap();

        let err = tx.create_order(&order).unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(tx.commit_len(), 1);
    }

    #[test]
    fn test_item_requires_existing_order() {
        let (mut tables, id) = tables_with_stock(10);
        let mut tx = Transaction::new(&mut tables);
        let item = OrderItem::new(
            OrderId::new("MISSING"),
            id,
            "Laptop",
            Money::from_minor(99999, Currency::GBP),
            1,
        );
        assert!(matches!(
            tx.create_order_item(&item),
            Err(StoreError::NotFound { entity: "order", .. })
        ));
    }
}
