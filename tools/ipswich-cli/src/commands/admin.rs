//! Staff commands: fulfilment, stock and store health.

use anyhow::{bail, Result};
use ipswich_auth::{Role, User};
use ipswich_commerce::checkout::{OrderId, OrderStatus};
use ipswich_commerce::store::CatalogStore;
use ipswich_commerce::CommerceError;

use super::{AdminArgs, AdminCommand, LoginArgs};
use crate::commands::orders::print_orders;
use crate::context::Context;
use crate::output::status_badge;

/// Run the admin command.
pub fn run(args: AdminArgs, ctx: &Context) -> Result<()> {
    match args.command {
        AdminCommand::Status {
            order,
            status,
            login,
        } => {
            staff_login(&login, ctx)?;
            let status: OrderStatus = status.parse()?;
            let order = ctx
                .db
                .update_order_status(&OrderId::parse(&order), status)?;
            if ctx.output.is_json() {
                ctx.output.json(&order);
            } else {
                ctx.output.success(&format!(
                    "Order {} is now {}",
                    order.id,
                    status_badge(order.status)
                ));
            }
            Ok(())
        }
        AdminCommand::Orders { status, login } => {
            staff_login(&login, ctx)?;
            let status = status.map(|s| s.parse::<OrderStatus>()).transpose()?;
            let orders = ctx.db.list_orders(status)?;
            let title = match status {
                Some(status) => format!("{} orders", status.display_name()),
                None => "All orders".to_string(),
            };
            print_orders(ctx, &title, &orders);
            Ok(())
        }
        AdminCommand::Stock { slug, stock, login } => {
            staff_login(&login, ctx)?;
            let product = ctx
                .db
                .get_product_by_slug(&slug)?
                .ok_or_else(|| CommerceError::ProductNotFound(slug.clone()))?;
            ctx.db.set_product_stock(&product.id, stock)?;
            ctx.output
                .success(&format!("{} stock set to {}", product.name, stock));
            Ok(())
        }
        AdminCommand::Health => {
            let report = ctx.db.health()?;
            if ctx.output.is_json() {
                ctx.output.json(&report);
                return Ok(());
            }
            ctx.output.header(&format!("{} health", ctx.config.store.name));
            ctx.output.kv("status", report.status);
            ctx.output.kv("backend", &report.backend);
            ctx.output.kv("categories", &report.categories.to_string());
            ctx.output.kv("products", &report.products.to_string());
            ctx.output.kv("out of stock", &report.out_of_stock.to_string());
            ctx.output.kv("orders", &report.orders.to_string());
            ctx.output.kv("users", &report.users.to_string());
            Ok(())
        }
    }
}

fn staff_login(login: &LoginArgs, ctx: &Context) -> Result<User> {
    let user = ctx.login(&login.user, login.password.as_deref())?;
    if !user.has_permission(Role::Staff) {
        bail!("{} is not a member of staff", user.display_name());
    }
    Ok(user)
}
