//! End-to-end checkout scenarios against the real storage engine.

mod common;

use common::{customer, fixture, shipping};
use ipswich_auth::User;
use ipswich_commerce::cart::Cart;
use ipswich_commerce::checkout::OrderStatus;
use ipswich_commerce::money::{Currency, Money};
use ipswich_commerce::store::{CatalogStore, OrderStore};
use ipswich_commerce::storefront::Storefront;
use ipswich_commerce::CommerceError;

#[test]
fn test_laptop_checkout() {
    let f = fixture();
    let storefront = Storefront::new(f.db.clone());
    let user = customer("ada");
    let mut cart = Cart::new("sess_1");

    storefront.add_to_cart(&mut cart, &f.laptop.id, 2).unwrap();
    assert_eq!(cart.total_price().unwrap().display_amount(), "1999.98");

    let order = storefront.checkout(&user, &mut cart, shipping()).unwrap();

    assert_eq!(order.total_cost, Money::parse("1999.98", Currency::GBP).unwrap());
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].product_name, "Laptop");
    assert_eq!(order.items[0].quantity, 2);
    assert_eq!(order.shipping.city, "Ipswich");
    assert!(cart.is_empty());
    assert_eq!(f.db.get_product(&f.laptop.id).unwrap().unwrap().stock, 8);

    let stored = f.db.get_order(&order.id).unwrap().unwrap();
    assert_eq!(stored, order);
}

#[test]
fn test_multi_line_total_is_exact() {
    let f = fixture();
    let storefront = Storefront::new(f.db.clone());
    let mut cart = Cart::new("sess_1");
    storefront.add_to_cart(&mut cart, &f.laptop.id, 1).unwrap();
    storefront.add_to_cart(&mut cart, &f.mouse.id, 3).unwrap();

    let expected = cart.total_price().unwrap();
    let order = storefront
        .checkout(&customer("ada"), &mut cart, shipping())
        .unwrap();

    assert_eq!(order.total_cost, expected);
    assert_eq!(order.total_cost.display_amount(), "1059.96");
    assert_eq!(order.computed_total().unwrap(), order.total_cost);
    assert_eq!(order.item_count(), 4);
}

#[test]
fn test_empty_cart_has_no_side_effects() {
    let f = fixture();
    let storefront = Storefront::new(f.db.clone());
    let mut cart = Cart::new("sess_1");

    let err = storefront
        .checkout(&customer("ada"), &mut cart, shipping())
        .unwrap_err();
    assert!(matches!(err, CommerceError::EmptyCart));
    assert!(f.db.list_orders(None).unwrap().is_empty());
}

#[test]
fn test_anonymous_checkout_is_rejected() {
    let f = fixture();
    let storefront = Storefront::new(f.db.clone());
    let mut cart = Cart::new("sess_1");
    storefront.add_to_cart(&mut cart, &f.laptop.id, 1).unwrap();

    let err = storefront
        .checkout(&User::anonymous("sess_1"), &mut cart, shipping())
        .unwrap_err();
    assert!(matches!(err, CommerceError::AuthenticationRequired));
    assert_eq!(cart.len(), 1);
    assert_eq!(f.db.get_product(&f.laptop.id).unwrap().unwrap().stock, 10);
}

#[test]
fn test_insufficient_stock_on_second_line_rolls_back_everything() {
    let f = fixture();
    let storefront = Storefront::new(f.db.clone());
    let mut cart = Cart::new("sess_1");
    storefront.add_to_cart(&mut cart, &f.mouse.id, 5).unwrap();
    storefront.add_to_cart(&mut cart, &f.laptop.id, 4).unwrap();

    // Someone else buys most of the laptops after they were carted.
    f.db.set_product_stock(&f.laptop.id, 3).unwrap();

    let err = storefront
        .checkout(&customer("ada"), &mut cart, shipping())
        .unwrap_err();
    match err {
        CommerceError::InsufficientStock {
            product_id,
            requested,
            available,
            ..
        } => {
            assert_eq!(product_id, f.laptop.id);
            assert_eq!(requested, 4);
            assert_eq!(available, 3);
        }
        other => panic!("unexpected: {:?}", other),
    }

    assert_eq!(cart.len(), 9);
    assert_eq!(f.db.get_product(&f.mouse.id).unwrap().unwrap().stock, 50);
    assert_eq!(f.db.get_product(&f.laptop.id).unwrap().unwrap().stock, 3);
    assert!(f.db.list_orders(None).unwrap().is_empty());
}

#[test]
fn test_price_snapshot_is_charged() {
    let f = fixture();
    let storefront = Storefront::new(f.db.clone());
    let mut cart = Cart::new("sess_1");
    storefront.add_to_cart(&mut cart, &f.laptop.id, 1).unwrap();

    // A later catalog price does not reach the carted line.
    f.db
        .set_product_price(&f.laptop.id, Money::parse("1299.00", Currency::GBP).unwrap())
        .unwrap();

    let order = storefront
        .checkout(&customer("ada"), &mut cart, shipping())
        .unwrap();
    assert_eq!(order.items[0].price.display_amount(), "999.99");
    assert_eq!(order.total_cost.display_amount(), "999.99");
}

#[test]
fn test_order_history_is_scoped_to_owner() {
    let f = fixture();
    let storefront = Storefront::new(f.db.clone());
    let ada = customer("ada");
    let bob = customer("bob");

    let mut ids = Vec::new();
    for _ in 0..3 {
        let mut cart = Cart::new("sess_ada");
        storefront.add_to_cart(&mut cart, &f.mouse.id, 1).unwrap();
        ids.push(storefront.checkout(&ada, &mut cart, shipping()).unwrap().id);
    }

    let history = storefront.orders_for_user(&ada).unwrap();
    assert_eq!(history.len(), 3);
    assert!(history
        .windows(2)
        .all(|w| w[0].created_at >= w[1].created_at));

    assert!(storefront.orders_for_user(&bob).unwrap().is_empty());
    assert!(storefront.order_for_user(&ada, &ids[0]).is_ok());
    assert!(matches!(
        storefront.order_for_user(&bob, &ids[0]),
        Err(CommerceError::OrderNotFound(_))
    ));
    assert!(matches!(
        storefront.orders_for_user(&User::anonymous("s")),
        Err(CommerceError::AuthenticationRequired)
    ));
}

#[test]
fn test_status_update_is_separate_from_checkout() {
    let f = fixture();
    let storefront = Storefront::new(f.db.clone());
    let mut cart = Cart::new("sess_1");
    storefront.add_to_cart(&mut cart, &f.mouse.id, 1).unwrap();
    let order = storefront
        .checkout(&customer("ada"), &mut cart, shipping())
        .unwrap();

    let shipped = f
        .db
        .update_order_status(&order.id, OrderStatus::Shipped)
        .unwrap();
    assert_eq!(shipped.status, OrderStatus::Shipped);
    assert_eq!(shipped.items.len(), 1);
    assert_eq!(
        f.db.list_orders(Some(OrderStatus::Shipped)).unwrap().len(),
        1
    );
    assert!(f.db.list_orders(Some(OrderStatus::Pending)).unwrap().is_empty());
}

#[test]
fn test_many_orders_have_distinct_ids() {
    let f = fixture();
    f.db.set_product_stock(&f.mouse.id, 1_000).unwrap();
    let storefront = Storefront::new(f.db.clone());
    let user = customer("ada");

    for _ in 0..300 {
        let mut cart = Cart::new("sess_1");
        storefront.add_to_cart(&mut cart, &f.mouse.id, 1).unwrap();
        storefront.checkout(&user, &mut cart, shipping()).unwrap();
    }

    let orders = f.db.list_orders(None).unwrap();
    let ids: std::collections::HashSet<_> = orders.iter().map(|o| o.id.clone()).collect();
    assert_eq!(ids.len(), 300);
    assert_eq!(f.db.get_product(&f.mouse.id).unwrap().unwrap().stock, 700);
}

#[test]
fn test_tampered_cart_snapshot_cannot_reach_checkout() {
    let f = fixture();
    let storefront = Storefront::new(f.db.clone());
    let mut cart = Cart::new("sess_1");
    storefront.add_to_cart(&mut cart, &f.laptop.id, 1).unwrap();
    let saved = serde_json::to_value(&cart).unwrap();

    for quantity in [0, -5] {
        let mut tampered = saved.clone();
        tampered["lines"][0]["quantity"] = quantity.into();
        assert!(serde_json::from_value::<Cart>(tampered).is_err());
    }

    let mut restored: Cart = serde_json::from_value(saved).unwrap();
    storefront
        .checkout(&customer("ada"), &mut restored, shipping())
        .unwrap();
    assert_eq!(f.db.get_product(&f.laptop.id).unwrap().unwrap().stock, 9);
    assert_eq!(f.db.list_orders(None).unwrap().len(), 1);
}
