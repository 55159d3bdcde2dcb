//! Customer account commands.

use anyhow::{bail, Context as _, Result};
use ipswich_auth::Role;

use super::{UsersArgs, UsersCommand};
use crate::context::Context;

/// Run the users command.
pub fn run(args: UsersArgs, ctx: &Context) -> Result<()> {
    match args.command {
        UsersCommand::Register {
            username,
            email,
            password,
        } => register(&username, &email, password, ctx),
        UsersCommand::Profile {
            login,
            phone,
            address,
            city,
            postal_code,
            country,
        } => {
            let user = ctx.login(&login.user, login.password.as_deref())?;
            let Some(user_id) = user.user_id() else {
                bail!("Not signed in");
            };

            let mut profile = ctx.db.get_profile(user_id)?;
            let updates = [
                (&mut profile.phone_number, phone),
                (&mut profile.address, address),
                (&mut profile.city, city),
                (&mut profile.postal_code, postal_code),
                (&mut profile.country, country),
            ];
            let mut changed = false;
            for (field, value) in updates {
                if let Some(value) = value {
                    *field = value.trim().to_string();
                    changed = true;
                }
            }
            if changed {
                ctx.db.save_profile(profile.clone())?;
                ctx.output.success("Profile updated");
            }

            if ctx.output.is_json() {
                ctx.output.json(&profile);
                return Ok(());
            }
            ctx.output.header(&format!("Profile for {}", user.display_name()));
            ctx.output.kv("phone", &profile.phone_number);
            ctx.output.kv("address", &profile.address);
            ctx.output.kv("city", &profile.city);
            ctx.output.kv("postal_code", &profile.postal_code);
            ctx.output.kv("country", &profile.country);
            Ok(())
        }
        UsersCommand::Roles { username, roles } => {
            let roles = roles
                .iter()
                .map(|r| r.parse::<Role>())
                .collect::<Result<Vec<_>, _>>()?;
            ctx.db.set_user_roles(&username, roles.clone())?;
            let names: Vec<&str> = roles.iter().map(Role::as_str).collect();
            ctx.output
                .success(&format!("{} now has roles: {}", username, names.join(", ")));
            Ok(())
        }
    }
}

fn register(username: &str, email: &str, password: Option<String>, ctx: &Context) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => ctx.prompt_password()?,
    };
    let credentials = ctx
        .db
        .register_user(&ctx.hasher, username, email, &password)
        .context("Registration failed")?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "user_id": credentials.user_id,
            "username": credentials.username,
            "email": credentials.email,
        }));
        return Ok(());
    }
    ctx.output.success(&format!(
        "Registered {} ({})",
        credentials.username, credentials.email
    ));
    Ok(())
}
