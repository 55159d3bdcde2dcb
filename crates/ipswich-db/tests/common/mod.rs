#![allow(dead_code)]

use ipswich_auth::{Role, User, UserId};
use ipswich_commerce::catalog::{Category, Product};
use ipswich_commerce::checkout::ShippingInfo;
use ipswich_commerce::money::{Currency, Money};
use ipswich_db::Database;

pub struct Fixture {
    pub db: Database,
    pub electronics: Category,
    pub laptop: Product,
    pub mouse: Product,
}

/// Electronics with a laptop (999.99, stock 10) and a mouse (19.99, stock 50).
pub fn fixture() -> Fixture {
    fixture_in(Database::in_memory())
}

pub fn fixture_in(db: Database) -> Fixture {
    let electronics = db
        .insert_category(Category::new("Electronics", "electronics").with_description("Gadgets"))
        .unwrap();
    let laptop = db
        .insert_product(
            Product::new(
                "Laptop",
                "laptop",
                electronics.id.clone(),
                Money::parse("999.99", Currency::GBP).unwrap(),
            )
            .with_description("High-performance laptop")
            .with_stock(10),
        )
        .unwrap();
    let mouse = db
        .insert_product(
            Product::new(
                "Mouse",
                "mouse",
                electronics.id.clone(),
                Money::parse("19.99", Currency::GBP).unwrap(),
            )
            .with_stock(50),
        )
        .unwrap();
    Fixture {
        db,
        electronics,
        laptop,
        mouse,
    }
}

pub fn customer(id: &str) -> User {
    User::authenticated(
        UserId::new(id),
        id,
        format!("{}@example.com", id),
        vec![Role::Customer],
    )
}

pub fn shipping() -> ShippingInfo {
    ShippingInfo::new(
        "Ada",
        "Lovelace",
        "ada@example.com",
        "1 Tavern Street",
        "IP1 3AA",
        "Ipswich",
    )
    .unwrap()
}
