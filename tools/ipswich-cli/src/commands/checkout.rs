//! Checkout command.

use anyhow::{Context as _, Result};
use ipswich_commerce::checkout::ShippingInfo;

use super::CheckoutArgs;
use crate::commands::orders::print_order;
use crate::context::Context;

/// Run the checkout command.
pub fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let user = ctx.login(&args.login.user, args.login.password.as_deref())?;

    // Start from the saved profile, then apply whatever was given.
    let mut draft = match user.user_id() {
        Some(user_id) => ShippingInfo::from_profile(&user, &ctx.db.get_profile(user_id)?),
        None => ShippingInfo::default(),
    };
    let overrides = [
        (&mut draft.first_name, args.first_name),
        (&mut draft.last_name, args.last_name),
        (&mut draft.email, args.email),
        (&mut draft.address, args.address),
        (&mut draft.postal_code, args.postal_code),
        (&mut draft.city, args.city),
    ];
    for (field, value) in overrides {
        if let Some(value) = value {
            *field = value;
        }
    }
    let shipping = ShippingInfo::new(
        draft.first_name,
        draft.last_name,
        draft.email,
        draft.address,
        draft.postal_code,
        draft.city,
    )?;

    let mut cart = ctx.load_cart()?;
    ctx.output.debug(&format!(
        "checking out {} item(s) for {}",
        cart.len(),
        user.display_name()
    ));
    let order = ctx
        .storefront()
        .checkout(&user, &mut cart, shipping)
        .context("Checkout failed")?;

    // The order is committed; an unsaved session only leaves stale lines.
    if let Err(e) = ctx.save_cart(&cart) {
        ctx.output.warn(&format!("Order placed but the cart was not cleared: {:#}", e));
    }

    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }
    ctx.output
        .success(&format!("Order {} placed, thank you!", order.id));
    print_order(ctx, &order);
    Ok(())
}
