//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    ctx.output.info("[store]");
    ctx.output.kv("name", &ctx.config.store.name);
    ctx.output.kv("currency", ctx.config.store.currency.code());
    ctx.output.kv("data_file", &ctx.config.store.data_file);
    ctx.output.kv("session_file", &ctx.config.store.session_file);

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("level", ctx.config.logging.level.as_str());
    ctx.output
        .kv("format", &format!("{:?}", ctx.config.logging.format).to_lowercase());

    if !ctx.config.environments.is_empty() {
        ctx.output.info("");
        let mut names: Vec<&String> = ctx.config.environments.keys().collect();
        names.sort();
        for name in names {
            ctx.output.list_item(&format!("[environments.{}]", name));
        }
    }

    ctx.output.info("");
    ctx.output.kv("root", &ctx.root.display().to_string());
    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let path = std::env::current_dir()
        .context("Failed to get current directory")?
        .join("ipswich.toml");
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    fs::write(&path, generate_default_config(&ctx.config.store.name))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    ctx.output.success(&format!("Wrote {}", path.display()));
    Ok(())
}
