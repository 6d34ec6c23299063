//! Scripted cart sessions.
//!
//! A script lists the items to add, an optional promotion code, checkout steps
//! to take, and how long to wait before reading the summary:
//!
//! ```toml
//! promo = "WELCOME20"
//! steps = ["advance", "advance"]
//! wait_ms = 0
//!
//! [[items]]
//! product = "modern-ui-kit-pro"
//!
//! [[items]]
//! product = "photography-master-presets"
//! license = "extended"
//! quantity = 2
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::{Context as _, Result};
use lumina_commerce::cart::{CartPricing, LicenseTier, PromotionOutcome};
use lumina_commerce::catalog::StaticCatalog;
use lumina_commerce::checkout::{CheckoutStep, OrderRequest};
use lumina_commerce::forms::BillingDetails;
use lumina_commerce::session::CartSession;
use lumina_commerce::{ProductId, SessionId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::CartArgs;
use crate::config::CliConfig;
use crate::context::Context;
use crate::output::{promotion_badge, Output};

/// A cart session described as data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CartScript {
    #[serde(default)]
    pub items: Vec<ScriptItem>,
    /// Code to submit after the items are added.
    #[serde(default)]
    pub promo: Option<String>,
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
    /// Pause before the summary, in milliseconds.
    #[serde(default)]
    pub wait_ms: u64,
    /// Used to build the order request once at Confirm.
    #[serde(default)]
    pub billing: Option<BillingDetails>,
}

impl CartScript {
    /// Load a script from a TOML or JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read cart script: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON cart script: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML cart script: {}", path.display()))
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptItem {
    pub product: ProductId,
    #[serde(default)]
    pub license: LicenseTier,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptStep {
    Advance,
    Retreat,
}

/// Session state after a script ran.
#[derive(Debug, Serialize)]
pub struct CartSummary {
    pub session_id: SessionId,
    pub step: CheckoutStep,
    /// Feedback for the submitted code, if one was submitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_message: Option<String>,
    pub pricing: CartPricing,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderRequest>,
}

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(&args.script);
    let script = CartScript::load(&path)?;

    let summary = execute(&script, &ctx.config, &ctx.output).await?;

    if ctx.output.is_json() {
        ctx.output.json(&summary);
        return Ok(());
    }

    print_summary(&summary, ctx);
    Ok(())
}

/// Play a script against a fresh session.
pub async fn execute(
    script: &CartScript,
    config: &CliConfig,
    output: &Output,
) -> Result<CartSummary> {
    let catalog = StaticCatalog::storefront();
    let session = CartSession::with_currency(config.store.currency, config.promotion.clone());

    for item in &script.items {
        session
            .add_product(&catalog, &item.product, item.license)
            .with_context(|| format!("Failed to add {}", item.product))?;
        if item.quantity > 1 {
            session.update_quantity(&item.product, item.quantity - 1);
        }
        output.debug(&format!("Added {} ({})", item.product, item.license));
    }

    let mut promo_message = None;
    if let Some(code) = &script.promo {
        match session.apply_promotion(code) {
            PromotionOutcome::Applied(promotion) | PromotionOutcome::Invalid { promotion, .. } => {
                output.info(&promotion_badge(&promotion));
                promo_message = Some(promotion.message());
            }
            PromotionOutcome::AlreadyActive => output.warn("A promotion is already applied"),
            PromotionOutcome::EmptyCode => output.warn("Promo code is empty"),
        }
    }

    for step in &script.steps {
        let before = session.step();
        let after = match step {
            ScriptStep::Advance => session.advance(),
            ScriptStep::Retreat => session.retreat(),
        };
        if after == before {
            debug!(step = ?step, at = after.as_str(), "step had no effect");
        }
        output.step(after);
    }

    if script.wait_ms > 0 {
        output.debug(&format!("Waiting {} ms", script.wait_ms));
        tokio::time::sleep(Duration::from_millis(script.wait_ms)).await;
        // Let an expiry due at the same instant run first.
        tokio::task::yield_now().await;
    }

    let order = match &script.billing {
        Some(billing) if session.step() == CheckoutStep::Confirm => {
            Some(session.order_request(billing.clone())?)
        }
        Some(_) => {
            output.warn("Billing details given but checkout did not reach Confirm");
            None
        }
        None => None,
    };

    Ok(CartSummary {
        session_id: session.id().clone(),
        step: session.step(),
        promo_message,
        pricing: session.pricing(),
        order,
    })
}

fn print_summary(summary: &CartSummary, ctx: &Context) {
    let pricing = &summary.pricing;
    ctx.output.header(&format!("Cart ({} items)", pricing.item_count()));

    if pricing.line_items.is_empty() {
        ctx.output.info("Your cart is empty");
    }
    for line in &pricing.line_items {
        ctx.output.list_item(&format!(
            "{} - {} = {}",
            line.title,
            line.license_summary(),
            line.total.display()
        ));
    }

    ctx.output.info("");
    ctx.output.kv("Subtotal", &pricing.subtotal.display());
    if let Some(label) = pricing.discount_label() {
        ctx.output
            .kv(&label, &format!("-{}", pricing.discount_total.display()));
    }
    ctx.output.kv("Total", &pricing.grand_total.display());
    ctx.output.kv(
        "Step",
        &format!("{} ({})", summary.step.display_name(), summary.step.proceed_label()),
    );

    if let Some(order) = &summary.order {
        ctx.output.success(&format!(
            "Order {} ready: {} for {}",
            order.id,
            order.amount_due().display(),
            order.billing.full_name()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"
steps = ["advance", "advance"]

[[items]]
product = "modern-ui-kit-pro"

[[items]]
product = "photography-master-presets"
license = "extended"
"#;

    fn quiet() -> Output {
        Output::new(false, true)
    }

    fn script(extra: &str) -> CartScript {
        toml::from_str(&format!("{}\n{}", extra, SCENARIO)).unwrap()
    }

    #[test]
    fn test_parse_script() {
        let script = script("promo = \"welcome20\"");
        assert_eq!(script.items.len(), 2);
        assert_eq!(script.items[0].license, LicenseTier::Standard);
        assert_eq!(script.items[0].quantity, 1);
        assert_eq!(script.items[1].license, LicenseTier::Extended);
        assert_eq!(script.steps, vec![ScriptStep::Advance, ScriptStep::Advance]);
        assert_eq!(script.promo.as_deref(), Some("welcome20"));
    }

    #[tokio::test]
    async fn test_execute_with_welcome_code() {
        let summary = execute(&script("promo = \"welcome20\""), &CliConfig::default(), &quiet())
            .await
            .unwrap();

        assert_eq!(summary.step, CheckoutStep::Confirm);
        assert_eq!(summary.pricing.subtotal.display(), "$201.50");
        assert_eq!(summary.pricing.discount_total.display(), "$40.30");
        assert_eq!(summary.pricing.grand_total.display(), "$161.20");
        assert_eq!(summary.promo_message.as_deref(), Some("20% discount applied"));
        assert!(summary.order.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_code_gone_after_wait() {
        let script = script("promo = \"BADCODE\"\nwait_ms = 3100");
        let summary = execute(&script, &CliConfig::default(), &quiet())
            .await
            .unwrap();

        assert_eq!(summary.promo_message.as_deref(), Some("Invalid promo code"));
        assert!(summary.pricing.promotion.is_none());
        assert_eq!(summary.pricing.grand_total.amount_cents, 20150);
    }

    #[tokio::test]
    async fn test_billing_builds_order() {
        let extra = r#"
[billing]
first_name = "John"
last_name = "Doe"
email = "john.doe@example.com"
address = "123 Main St"
city = "San Francisco"
postal_code = "94107"
country = "United States"
"#;
        let mut script: CartScript = toml::from_str(&format!("{}\n{}", SCENARIO, extra)).unwrap();
        script.promo = Some("WELCOME20".to_string());

        let summary = execute(&script, &CliConfig::default(), &quiet())
            .await
            .unwrap();
        let order = summary.order.unwrap();
        assert_eq!(order.amount_due().amount_cents, 16120);
        assert_eq!(order.billing.full_name(), "John Doe");
    }

    #[tokio::test]
    async fn test_unknown_product_fails() {
        let script: CartScript = toml::from_str("[[items]]\nproduct = \"missing\"\n").unwrap();
        let err = execute(&script, &CliConfig::default(), &quiet())
            .await
            .unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to add missing"));
    }

    #[test]
    fn test_load_json_script() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        std::fs::write(
            &path,
            r#"{"items": [{"product": "cinematic-luts-pack", "quantity": 3}], "steps": ["advance"]}"#,
        )
        .unwrap();

        let script = CartScript::load(&path).unwrap();
        assert_eq!(script.items[0].quantity, 3);
        assert_eq!(script.steps, vec![ScriptStep::Advance]);
    }
}
