//! Catalog browsing and cart admission through the storefront facade.

mod common;

use common::fixture;
use ipswich_commerce::cart::Cart;
use ipswich_commerce::catalog::Category;
use ipswich_commerce::money::Currency;
use ipswich_commerce::storefront::Storefront;
use ipswich_commerce::CommerceError;
use ipswich_db::Database;

fn seeded() -> Storefront<Database> {
    let db = Database::in_memory();
    db.seed_sample_catalog(Currency::GBP).unwrap();
    Storefront::new(db)
}

fn names(products: &[ipswich_commerce::catalog::Product]) -> Vec<&str> {
    let mut names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
    names.sort();
    names
}

#[test]
fn test_text_search_covers_name_description_and_category() {
    let storefront = seeded();

    let lamps = storefront.list_products(Some("LAMP"), None).unwrap();
    assert_eq!(names(&lamps.products), vec!["LED Desk Lamp"]);
    assert_eq!(lamps.query.as_deref(), Some("LAMP"));

    let cotton = storefront.list_products(Some("organic"), None).unwrap();
    assert_eq!(names(&cotton.products), vec!["Cotton T-Shirt"]);

    let garden = storefront.list_products(Some("garden"), None).unwrap();
    assert_eq!(names(&garden.products), vec!["LED Desk Lamp", "Plant Pot Set"]);
}

#[test]
fn test_category_filter() {
    let storefront = seeded();
    let books = storefront.list_products(None, Some("books")).unwrap();
    assert_eq!(
        names(&books.products),
        vec!["Programming Python", "The Art of Design"]
    );
    assert_eq!(books.category.map(|c| c.name), Some("Books".to_string()));
    assert_eq!(books.categories.len(), 5);

    assert!(matches!(
        storefront.list_products(None, Some("toys")),
        Err(CommerceError::CategoryNotFound(_))
    ));
}

#[test]
fn test_blank_query_lists_everything_available() {
    let storefront = seeded();
    let all = storefront.list_products(Some("   "), None).unwrap();
    assert_eq!(all.products.len(), 12);
    assert!(all.query.is_none());
}

#[test]
fn test_unavailable_products_are_hidden() {
    let f = fixture();
    f.db.set_product_available(&f.mouse.id, false).unwrap();
    let storefront = Storefront::new(f.db.clone());

    let listing = storefront.list_products(None, None).unwrap();
    assert_eq!(names(&listing.products), vec!["Laptop"]);
    assert!(matches!(
        storefront.product_detail("mouse"),
        Err(CommerceError::ProductNotFound(_))
    ));

    let mut cart = Cart::new("s");
    assert!(matches!(
        storefront.add_to_cart(&mut cart, &f.mouse.id, 1),
        Err(CommerceError::ProductNotFound(_))
    ));
    assert!(cart.is_empty());
}

#[test]
fn test_add_to_cart_checks_stock() {
    let f = fixture();
    let storefront = Storefront::new(f.db.clone());
    let mut cart = Cart::new("s");

    assert!(matches!(
        storefront.add_to_cart(&mut cart, &f.laptop.id, 11),
        Err(CommerceError::InsufficientStock { available: 10, .. })
    ));
    storefront.add_to_cart(&mut cart, &f.laptop.id, 10).unwrap();
    assert_eq!(cart.len(), 10);

    assert!(storefront.remove_from_cart(&mut cart, &f.laptop.id));
    assert!(!storefront.remove_from_cart(&mut cart, &f.laptop.id));
}

#[test]
fn test_category_page_related() {
    let storefront = seeded();
    storefront
        .store()
        .insert_category(Category::new("Toys", "toys"))
        .unwrap();

    let page = storefront.category_page("electronics").unwrap();
    assert_eq!(page.products.len(), 3);
    assert_eq!(page.related.len(), 4);
    assert!(page.related.iter().all(|c| c.slug != "electronics"));
}

#[test]
fn test_product_detail() {
    let storefront = seeded();
    let webcam = storefront.product_detail("4k-webcam").unwrap();
    assert_eq!(webcam.price.display(), "\u{00a3}129.99");
}
