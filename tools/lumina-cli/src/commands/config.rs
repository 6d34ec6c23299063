//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use lumina_commerce::cart::PromotionRule;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::AddCode { code, rate } => add_code(&code, rate, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.info("No config file found, using defaults"),
    }

    ctx.output.info("");
    ctx.output.info("[store]");
    ctx.output.kv("currency", ctx.config.store.currency.code());

    ctx.output.info("");
    ctx.output.info("[promotion]");
    ctx.output
        .kv("expiry_ms", &ctx.config.promotion.expiry_ms.to_string());

    if !ctx.config.promotion.codes.is_empty() {
        ctx.output.info("");
        ctx.output.info("Codes:");
        for rule in &ctx.config.promotion.codes {
            ctx.output.list_item(&format!(
                "{} ({}% off)",
                rule.code,
                (rule.discount_rate * 100.0).round()
            ));
        }
    }

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn add_code(code: &str, rate: f64, ctx: &Context) -> Result<()> {
    let Some(path) = &ctx.config_path else {
        bail!("No config file found. Run `lumina config init` to create one.");
    };

    let mut config = ctx.config.clone();
    config.promotion.codes.push(PromotionRule::new(code, rate));
    config.validate()?;

    config.save(&path.to_string_lossy())?;

    ctx.output.success(&format!(
        "Added {} ({}% off) to {}",
        code.to_uppercase(),
        (rate * 100.0).round(),
        path.display()
    ));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    // Context::load already rejected invalid configs; only warnings remain.
    let warnings = config_warnings(&ctx.config);

    if warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

fn config_warnings(config: &CliConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if config.promotion.codes.is_empty() {
        warnings.push("promotion.codes is empty, every code will be rejected".to_string());
    }

    for rule in &config.promotion.codes {
        if rule.code.trim() != rule.code {
            warnings.push(format!(
                "promotion code '{}' has surrounding whitespace",
                rule.code
            ));
        }
    }

    if config.promotion.expiry_ms > 60_000 {
        warnings.push(format!(
            "promotion.expiry_ms is {} ms, invalid codes will linger",
            config.promotion.expiry_ms
        ));
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_no_warnings() {
        assert!(config_warnings(&CliConfig::default()).is_empty());
    }

    #[test]
    fn test_warnings() {
        let mut config = CliConfig::default();
        config.promotion.expiry_ms = 120_000;
        config.promotion.codes = vec![PromotionRule::new(" SPACE ", 0.1)];
        assert_eq!(config_warnings(&config).len(), 2);

        config.promotion.codes.clear();
        assert_eq!(config_warnings(&config).len(), 2);
    }
}
