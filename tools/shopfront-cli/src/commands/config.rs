//! Configuration management commands.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let catalog = &ctx.config.catalog;
    ctx.output.info("[catalog]");
    ctx.output
        .kv("path", catalog.path.as_deref().unwrap_or("(built-in demo)"));
    ctx.output.kv("currency", &catalog.currency);
    ctx.output.kv("page_size", &catalog.page_size.to_string());
    ctx.output.kv("featured_count", &catalog.featured_count.to_string());
    ctx.output.kv("related_count", &catalog.related_count.to_string());

    ctx.output.info("[cart]");
    ctx.output.kv("data_dir", &ctx.config.cart.data_dir);
    ctx.output.kv("key", &ctx.config.cart.key);

    ctx.output.info("[logging]");
    ctx.output
        .kv("level", ctx.config.logging.level.as_directive());
    ctx.output
        .kv("format", &format!("{:?}", ctx.config.logging.format).to_lowercase());

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let Some(config_path) = &ctx.config_path else {
        bail!("No config file found. Run `shopfront config init` to create one.");
    };

    let mut config = CliConfig::load(config_path)?;
    set_config_value(&mut config, key, value)?;
    config.validate()?;
    config.save(config_path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path: PathBuf = ctx.cwd.join("shopfront.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    ctx.config.validate()?;

    let mut warnings: Vec<String> = Vec::new();
    if let Some(path) = &ctx.config.catalog.path {
        let resolved = ctx.resolve_path(path);
        if !resolved.is_file() {
            bail!("catalog.path does not exist: {}", resolved.display());
        }
        ctx.catalog()?;
    }
    if ctx.config.catalog.featured_count == 0 {
        warnings.push("catalog.featured_count is 0; `featured` will be empty".to_string());
    }
    if ctx.config.catalog.related_count == 0 {
        warnings.push("catalog.related_count is 0; no related products will show".to_string());
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if warnings.is_empty() {
        ctx.output.success("Configuration is valid");
    } else {
        ctx.output.success("Configuration is valid (with warnings)");
    }

    Ok(())
}

fn get_config_value(config: &CliConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["catalog", "path"] => Ok(config.catalog.path.clone().unwrap_or_default()),
        ["catalog", "currency"] => Ok(config.catalog.currency.clone()),
        ["catalog", "page_size"] => Ok(config.catalog.page_size.to_string()),
        ["catalog", "featured_count"] => Ok(config.catalog.featured_count.to_string()),
        ["catalog", "related_count"] => Ok(config.catalog.related_count.to_string()),
        ["cart", "data_dir"] => Ok(config.cart.data_dir.clone()),
        ["cart", "key"] => Ok(config.cart.key.clone()),
        ["logging", "level"] => Ok(config.logging.level.as_directive().to_string()),
        ["logging", "format"] => Ok(format!("{:?}", config.logging.format).to_lowercase()),
        _ => bail!("Unknown config key: {}", key),
    }
}

fn set_config_value(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["catalog", "path"] => {
            config.catalog.path = (!value.is_empty()).then(|| value.to_string())
        }
        ["catalog", "currency"] => config.catalog.currency = value.to_uppercase(),
        ["catalog", "page_size"] => config.catalog.page_size = value.parse()?,
        ["catalog", "featured_count"] => config.catalog.featured_count = value.parse()?,
        ["catalog", "related_count"] => config.catalog.related_count = value.parse()?,
        ["cart", "data_dir"] => config.cart.data_dir = value.to_string(),
        ["cart", "key"] => config.cart.key = value.to_string(),
        ["logging", "level"] => config.logging.level = value.parse()?,
        ["logging", "format"] => config.logging.format = value.parse()?,
        _ => bail!("Unknown config key: {}", key),
    }

    Ok(())
}
