//! Order history commands.

use anyhow::Result;
use ipswich_commerce::checkout::{Order, OrderId};

use super::{OrdersArgs, OrdersCommand};
use crate::context::Context;
use crate::output::status_badge;

/// Run the orders command.
pub fn run(args: OrdersArgs, ctx: &Context) -> Result<()> {
    match args.command {
        OrdersCommand::List { login } => {
            let user = ctx.login(&login.user, login.password.as_deref())?;
            let orders = ctx.storefront().orders_for_user(&user)?;
            print_orders(ctx, "Your orders", &orders);
            Ok(())
        }
        OrdersCommand::Show { order, login } => {
            let user = ctx.login(&login.user, login.password.as_deref())?;
            let order = ctx
                .storefront()
                .order_for_user(&user, &OrderId::parse(&order))?;
            if ctx.output.is_json() {
                ctx.output.json(&order);
            } else {
                ctx.output.header(&format!("Order {}", order.id));
                print_order(ctx, &order);
            }
            Ok(())
        }
    }
}

/// Print a one-line summary per order.
pub fn print_orders(ctx: &Context, title: &str, orders: &[Order]) {
    if ctx.output.is_json() {
        ctx.output.json(&orders);
        return;
    }

    ctx.output.header(title);
    if orders.is_empty() {
        ctx.output.info("No orders yet");
        return;
    }

    let widths = [12, 18, 12, 10];
    ctx.output.table_row(&["ORDER", "PLACED", "STATUS", "TOTAL"], &widths);
    for order in orders {
        let placed = order.created_at.format("%Y-%m-%d %H:%M").to_string();
        let total = order.total_cost.display();
        ctx.output.table_row(
            &[
                order.id.as_str(),
                placed.as_str(),
                order.status.display_name(),
                total.as_str(),
            ],
            &widths,
        );
    }
}

/// Print an order's details and items.
pub fn print_order(ctx: &Context, order: &Order) {
    ctx.output.kv("status", &status_badge(order.status));
    ctx.output
        .kv("placed", &order.created_at.format("%Y-%m-%d %H:%M UTC").to_string());
    ctx.output.kv("ship to", &order.shipping.full_name());
    ctx.output.kv("address", &order.shipping.one_line());
    for item in &order.items {
        let cost = item
            .cost()
            .map(|c| c.display())
            .unwrap_or_else(|_| "-".to_string());
        ctx.output.list_item(&format!(
            "{} x {} @ {} = {}",
            item.quantity,
            item.product_name,
            item.price.display(),
            cost
        ));
    }
    ctx.output.kv("total", &order.total_cost.display());
}
