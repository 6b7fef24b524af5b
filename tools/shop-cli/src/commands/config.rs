//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
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
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("[catalog]");
    ctx.output.kv("base_url", &ctx.config.catalog.base_url);
    ctx.output.kv("timeout_secs", &ctx.config.catalog.timeout_secs.to_string());

    ctx.output.info("[storage]");
    ctx.output.kv("path", &ctx.config.storage.path);
    ctx.output.kv("cart_key", &ctx.config.storage.cart_key);

    ctx.output.info("[notifications]");
    ctx.output.kv(
        "dismiss_after_ms",
        &ctx.config.notifications.dismiss_after_ms.to_string(),
    );

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.cwd.join(CONFIG_NAMES[0]);

    if path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    fs::write(&path, generate_default_config())?;
    ctx.output.success(&format!("Wrote {}", path.display()));
    Ok(())
}
