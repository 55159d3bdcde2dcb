//! Snapshot persistence and commit failure.

mod common;

use std::fs;

use common::{customer, fixture_in, shipping};
use ipswich_commerce::cart::Cart;
use ipswich_commerce::store::{CatalogStore, OrderStore, StoreError};
use ipswich_commerce::storefront::Storefront;
use ipswich_commerce::CommerceError;
use ipswich_db::Database;

#[test]
fn test_committed_orders_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    let f = fixture_in(Database::open(&path).unwrap());
    let storefront = Storefront::new(f.db.clone());
    let mut cart = Cart::new("sess_1");
    storefront.add_to_cart(&mut cart, &f.laptop.id, 2).unwrap();
    let order = storefront
        .checkout(&customer("ada"), &mut cart, shipping())
        .unwrap();
    drop(storefront);
    drop(f);

    let reopened = Database::open(&path).unwrap();
    let stored = reopened.get_order(&order.id).unwrap().unwrap();
    assert_eq!(stored.total_cost.display_amount(), "1999.98");
    assert_eq!(stored.items.len(), 1);
    let laptop = reopened.get_product_by_slug("laptop").unwrap().unwrap();
    assert_eq!(laptop.stock, 8);
}

#[test]
fn test_failed_commit_is_rolled_back() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");
    fs::create_dir(&data_dir).unwrap();

    let f = fixture_in(Database::open(data_dir.join("store.json")).unwrap());
    let storefront = Storefront::new(f.db.clone());
    let mut cart = Cart::new("sess_1");
    storefront.add_to_cart(&mut cart, &f.laptop.id, 2).unwrap();

    // The snapshot can no longer be written.
    fs::remove_dir_all(&data_dir).unwrap();

    let err = storefront
        .checkout(&customer("ada"), &mut cart, shipping())
        .unwrap_err();
    assert!(matches!(
        err,
        CommerceError::Persistence(StoreError::Backend(_))
    ));
    assert!(!err.is_user_facing());

    assert_eq!(cart.len(), 2);
    assert_eq!(f.db.get_product(&f.laptop.id).unwrap().unwrap().stock, 10);
    assert!(f.db.list_orders(None).unwrap().is_empty());
}

#[test]
fn test_open_rejects_corrupt_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(Database::open(&path).is_err());
}

#[test]
fn test_missing_file_opens_empty() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open(dir.path().join("new.json")).unwrap();
    let health = db.health().unwrap();
    assert_eq!(health.products, 0);
    assert!(health.backend.starts_with("file:"));
}
