//! Sample catalog loading.

use anyhow::{Context as _, Result};

use crate::context::Context;

/// Run the seed command.
pub fn run(ctx: &Context) -> Result<()> {
    let report = ctx
        .db
        .seed_sample_catalog(ctx.config.store.currency)
        .context("Failed to seed the catalog")?;

    if ctx.output.is_json() {
        ctx.output.json(&report);
        return Ok(());
    }

    if report.categories_created == 0 && report.products_created == 0 {
        ctx.output.info("Sample catalog already present, nothing to do");
    } else {
        ctx.output.success(&format!(
            "Created {} categories and {} products",
            report.categories_created, report.products_created
        ));
    }
    Ok(())
}
