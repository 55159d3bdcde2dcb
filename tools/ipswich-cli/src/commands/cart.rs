//! Session cart commands.

use anyhow::Result;
use ipswich_commerce::cart::{Cart, CartLineView};
use ipswich_commerce::catalog::Product;
use ipswich_commerce::store::CatalogStore;
use ipswich_commerce::{CommerceError, Money};
use serde::Serialize;

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Cart contents as printed with `--json`.
#[derive(Serialize)]
struct CartSummary<'a> {
    session: &'a str,
    lines: Vec<CartLineView<'a>>,
    items: i64,
    total: Money,
}

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.load_cart()?;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => return show(&cart, ctx),
        CartCommand::Add { slug, quantity } => {
            let product = ctx.storefront().product_detail(&slug)?;
            ctx.storefront().add_to_cart(&mut cart, &product.id, quantity)?;
            ctx.save_cart(&cart)?;
            ctx.output.success(&format!(
                "Added {} x {} (now {} in cart)",
                quantity,
                product.name,
                cart.quantity_of(&product.id)
            ));
        }
        CartCommand::Remove { slug } => {
            let product = find_product(ctx, &slug)?;
            if ctx.storefront().remove_from_cart(&mut cart, &product.id) {
                ctx.save_cart(&cart)?;
                ctx.output.success(&format!("Removed {}", product.name));
            } else {
                ctx.output.info(&format!("{} was not in the cart", product.name));
            }
        }
        CartCommand::Set { slug, quantity } => {
            let product = find_product(ctx, &slug)?;
            if quantity > 0 && !product.can_fulfill(quantity) {
                return Err(CommerceError::InsufficientStock {
                    product_id: product.id.clone(),
                    product_name: product.name.clone(),
                    requested: quantity,
                    available: product.stock,
                }
                .into());
            }
            if cart.set_quantity(&product.id, quantity)? {
                ctx.save_cart(&cart)?;
                ctx.output
                    .success(&format!("{} quantity set to {}", product.name, quantity.max(0)));
            } else {
                ctx.output.info(&format!("{} was not in the cart", product.name));
            }
        }
        CartCommand::Clear => {
            cart.clear();
            ctx.save_cart(&cart)?;
            ctx.output.success("Cart cleared");
        }
    }

    if ctx.output.is_json() {
        show(&cart, ctx)?;
    }
    Ok(())
}

fn show(cart: &Cart, ctx: &Context) -> Result<()> {
    let total = cart.total_price()?;

    if ctx.output.is_json() {
        ctx.output.json(&CartSummary {
            session: &cart.session_id,
            lines: cart.lines().collect(),
            items: cart.len(),
            total,
        });
        return Ok(());
    }

    ctx.output.header("Your cart");
    if cart.is_empty() {
        ctx.output.info("Your cart is empty");
        return Ok(());
    }

    let widths = [28, 6, 10, 10];
    ctx.output.table_row(&["PRODUCT", "QTY", "PRICE", "TOTAL"], &widths);
    for line in cart {
        let quantity = line.quantity.to_string();
        let unit_price = line.unit_price.display();
        let line_total = line.line_total.display();
        ctx.output.table_row(
            &[
                line.product_name,
                quantity.as_str(),
                unit_price.as_str(),
                line_total.as_str(),
            ],
            &widths,
        );
    }
    ctx.output.kv("items", &cart.len().to_string());
    ctx.output.kv("total", &total.display());
    Ok(())
}

/// Look a product up by slug, including unavailable ones, so that lines
/// for withdrawn products can still be removed.
fn find_product(ctx: &Context, slug: &str) -> Result<Product> {
    ctx.db
        .get_product_by_slug(slug)?
        .ok_or_else(|| CommerceError::ProductNotFound(slug.to_string()).into())
}
