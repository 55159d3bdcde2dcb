//! Catalog browsing commands.

use anyhow::Result;
use ipswich_commerce::catalog::Product;

use super::{CategoriesArgs, ProductArgs, ProductsArgs};
use crate::context::Context;
use crate::output::stock_label;

const NAME_WIDTH: usize = 28;
const PRICE_WIDTH: usize = 10;
const SLUG_WIDTH: usize = 28;

/// Run the products command.
pub fn products(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let listing = ctx
        .storefront()
        .list_products(args.q.as_deref(), args.category.as_deref())?;

    if ctx.output.is_json() {
        ctx.output.json(&listing);
        return Ok(());
    }

    let title = match (&listing.category, &listing.query) {
        (Some(category), Some(q)) => format!("{} matching \"{}\"", category.name, q),
        (Some(category), None) => category.name.clone(),
        (None, Some(q)) => format!("Products matching \"{}\"", q),
        (None, None) => format!("{} products", ctx.config.store.name),
    };
    ctx.output.header(&title);

    if listing.products.is_empty() {
        ctx.output.info("No products found");
        return Ok(());
    }
    print_products(ctx, &listing.products);
    Ok(())
}

/// Run the product command.
pub fn product(args: ProductArgs, ctx: &Context) -> Result<()> {
    let product = ctx.storefront().product_detail(&args.slug)?;

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("slug", &product.slug);
    ctx.output.kv("price", &product.price.display());
    ctx.output.kv("stock", &stock_label(product.stock));
    if !product.description.is_empty() {
        ctx.output.kv("description", &product.description);
    }
    Ok(())
}

/// Run the categories command.
pub fn categories(args: CategoriesArgs, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront();

    let Some(slug) = args.slug else {
        let categories = storefront.categories()?;
        if ctx.output.is_json() {
            ctx.output.json(&categories);
            return Ok(());
        }
        ctx.output.header("Categories");
        for category in &categories {
            ctx.output
                .list_item(&format!("{} ({})", category.name, category.slug));
        }
        return Ok(());
    };

    let page = storefront.category_page(&slug)?;
    if ctx.output.is_json() {
        ctx.output.json(&page);
        return Ok(());
    }

    ctx.output.header(&page.category.name);
    if !page.category.description.is_empty() {
        ctx.output.info(&page.category.description);
    }
    if page.products.is_empty() {
        ctx.output.info("No products in this category yet");
    } else {
        print_products(ctx, &page.products);
    }
    if !page.related.is_empty() {
        ctx.output.header("Related categories");
        for category in &page.related {
            ctx.output.list_item(&category.slug);
        }
    }
    Ok(())
}

fn print_products(ctx: &Context, products: &[Product]) {
    let widths = [NAME_WIDTH, PRICE_WIDTH, SLUG_WIDTH];
    ctx.output.table_row(&["NAME", "PRICE", "SLUG"], &widths);
    for product in products {
        let price = product.price.display();
        ctx.output.table_row(
            &[product.name.as_str(), price.as_str(), product.slug.as_str()],
            &widths,
        );
    }
}
