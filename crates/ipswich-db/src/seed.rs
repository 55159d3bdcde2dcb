//! Sample catalog for development and demos.

use ipswich_commerce::catalog::{slugify, Category, Product};
use ipswich_commerce::money::{Currency, Money};

use crate::{Database, DbError};

struct SeedCategory {
    name: &'static str,
    description: &'static str,
}

struct SeedProduct {
    name: &'static str,
    category: &'static str,
    description: &'static str,
    price: &'static str,
    stock: i64,
}

const CATEGORIES: &[SeedCategory] = &[
    SeedCategory { name: "Electronics", description: "Latest electronic gadgets and devices" },
    SeedCategory { name: "Clothing", description: "Fashion and apparel for all ages" },
    SeedCategory { name: "Books", description: "Books across various genres" },
    SeedCategory { name: "Home & Garden", description: "Everything for your home and garden" },
    SeedCategory { name: "Sports & Outdoors", description: "Sports equipment and outdoor gear" },
];

const PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "Wireless Bluetooth Headphones",
        category: "Electronics",
        description: "High-quality wireless headphones with noise cancellation and long battery life.",
        price: "99.99",
        stock: 50,
    },
    SeedProduct {
        name: "Smartphone Stand",
        category: "Electronics",
        description: "Adjustable smartphone stand for desk use, compatible with all phone sizes.",
        price: "19.99",
        stock: 100,
    },
    SeedProduct {
        name: "4K Webcam",
        category: "Electronics",
        description: "Ultra HD webcam perfect for video calls and streaming.",
        price: "129.99",
        stock: 25,
    },
    SeedProduct {
        name: "Cotton T-Shirt",
        category: "Clothing",
        description: "100% organic cotton t-shirt, available in multiple colors.",
        price: "24.99",
        stock: 200,
    },
    SeedProduct {
        name: "Denim Jeans",
        category: "Clothing",
        description: "Classic fit denim jeans, durable and comfortable.",
        price: "59.99",
        stock: 75,
    },
    SeedProduct {
        name: "Hoodie Sweatshirt",
        category: "Clothing",
        description: "Warm and cozy hoodie perfect for casual wear.",
        price: "45.99",
        stock: 80,
    },
    SeedProduct {
        name: "Programming Python",
        category: "Books",
        description: "Comprehensive guide to Python programming for beginners and experts.",
        price: "39.99",
        stock: 30,
    },
    SeedProduct {
        name: "The Art of Design",
        category: "Books",
        description: "Explore the principles of good design in this beautifully illustrated book.",
        price: "29.99",
        stock: 40,
    },
    SeedProduct {
        name: "Plant Pot Set",
        category: "Home & Garden",
        description: "Set of 3 ceramic plant pots in different sizes with drainage holes.",
        price: "34.99",
        stock: 60,
    },
    SeedProduct {
        name: "LED Desk Lamp",
        category: "Home & Garden",
        description: "Adjustable LED desk lamp with touch control and USB charging port.",
        price: "49.99",
        stock: 45,
    },
    SeedProduct {
        name: "Yoga Mat",
        category: "Sports & Outdoors",
        description: "Non-slip yoga mat perfect for home workouts and studio sessions.",
        price: "29.99",
        stock: 90,
    },
    SeedProduct {
        name: "Water Bottle",
        category: "Sports & Outdoors",
        description: "Insulated stainless steel water bottle, keeps drinks cold for 24 hours.",
        price: "22.99",
        stock: 120,
    },
];

/// What a seeding run created.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct SeedReport {
    pub categories_created: usize,
    pub products_created: usize,
}

impl Database {
    /// Load the sample catalog. Existing categories and products (matched by
    /// slug) are left alone, so seeding twice is harmless.
    pub fn seed_sample_catalog(&self, currency: Currency) -> Result<SeedReport, DbError> {
        let mut report = SeedReport::default();

        for seed in CATEGORIES {
            let slug = slugify(seed.name);
            if self.read(|t| t.category_by_slug(&slug).is_some())? {
                continue;
            }
            self.insert_category(Category::new(seed.name, slug).with_description(seed.description))?;
            report.categories_created += 1;
        }

        for seed in PRODUCTS {
            let slug = slugify(seed.name);
            if self.read(|t| t.product_by_slug(&slug).is_some())? {
                continue;
            }
            let category_slug = slugify(seed.category);
            let category_id = self
                .read(|t| t.category_by_slug(&category_slug).map(|c| c.id.clone()))?
                .ok_or_else(|| DbError::not_found("category", &category_slug))?;
            let price = Money::parse(seed.price, currency)
                .map_err(|e| DbError::Invalid(e.to_string()))?;

            self.insert_product(
                Product::new(seed.name, slug, category_id, price)
                    .with_description(seed.description)
                    .with_stock(seed.stock),
            )?;
            report.products_created += 1;
        }

        tracing::info!(
            categories = report.categories_created,
            products = report.products_created,
            "sample catalog seeded"
        );
        Ok(report)
    }
}
