//! Promotion codes.
//!
//! At most one promotion is active on a cart. A code that matches a known rule
//! becomes a valid promotion; anything else becomes an invalid one, which is
//! shown to the shopper and then expires after a short delay.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// The storefront's welcome code.
pub const WELCOME_CODE: &str = "WELCOME20";

/// Discount rate of the welcome code.
pub const WELCOME_RATE: f64 = 0.20;

/// Delay before an invalid code is cleared, in milliseconds.
pub const DEFAULT_EXPIRY_MS: u64 = 3000;

/// A known promotion code and the rate it takes off the subtotal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromotionRule {
    /// Code, compared case-insensitively.
    pub code: String,
    /// Fraction of the subtotal taken off, in `[0, 1)`.
    pub discount_rate: f64,
}

impl PromotionRule {
    pub fn new(code: impl Into<String>, discount_rate: f64) -> Self {
        Self {
            code: code.into(),
            discount_rate,
        }
    }
}

/// Promotion settings injected into a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromotionConfig {
    /// How long an invalid code stays visible before it is cleared.
    #[serde(default = "default_expiry_ms")]
    pub expiry_ms: u64,
    /// Known codes.
    #[serde(default = "default_codes")]
    pub codes: Vec<PromotionRule>,
}

fn default_expiry_ms() -> u64 {
    DEFAULT_EXPIRY_MS
}

fn default_codes() -> Vec<PromotionRule> {
    vec![PromotionRule::new(WELCOME_CODE, WELCOME_RATE)]
}

impl Default for PromotionConfig {
    fn default() -> Self {
        Self {
            expiry_ms: default_expiry_ms(),
            codes: default_codes(),
        }
    }
}

impl PromotionConfig {
    /// Delay before an invalid code is cleared.
    pub fn expiry_delay(&self) -> Duration {
        Duration::from_millis(self.expiry_ms)
    }

    /// Find the rule for a submitted code. Matching is on the uppercased text.
    pub fn lookup(&self, code_text: &str) -> Option<&PromotionRule> {
        let normalized = code_text.to_uppercase();
        self.codes
            .iter()
            .find(|rule| rule.code.to_uppercase() == normalized)
    }

    /// Check rates, codes and the expiry delay.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.expiry_ms == 0 {
            return Err(CommerceError::InvalidConfig(
                "promotion.expiry_ms must be greater than 0".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for (i, rule) in self.codes.iter().enumerate() {
            if rule.code.trim().is_empty() {
                return Err(CommerceError::InvalidConfig(format!(
                    "promotion.codes[{}].code must not be empty",
                    i
                )));
            }
            if !(0.0..1.0).contains(&rule.discount_rate) {
                return Err(CommerceError::InvalidConfig(format!(
                    "promotion.codes[{}].discount_rate must be in [0, 1), got {}",
                    i, rule.discount_rate
                )));
            }
            if !seen.insert(rule.code.to_uppercase()) {
                return Err(CommerceError::InvalidConfig(format!(
                    "duplicate promotion code: {}",
                    rule.code
                )));
            }
        }

        Ok(())
    }
}

/// The promotion attached to a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Promotion {
    /// Canonical code when valid, the shopper's text otherwise.
    pub code: String,
    /// Fraction of the subtotal taken off. Always 0 when invalid.
    pub discount_rate: f64,
    /// Whether the code matched a known promotion.
    pub is_valid: bool,
}

impl Promotion {
    /// A promotion for a matched rule.
    pub fn valid(rule: &PromotionRule) -> Self {
        Self {
            code: rule.code.to_uppercase(),
            discount_rate: rule.discount_rate,
            is_valid: true,
        }
    }

    /// A promotion for text that matched nothing.
    pub fn invalid(code_text: impl Into<String>) -> Self {
        Self {
            code: code_text.into(),
            discount_rate: 0.0,
            is_valid: false,
        }
    }

    /// Discount as a whole percentage (e.g., 20.0).
    pub fn percent(&self) -> f64 {
        (self.discount_rate * 100.0).round()
    }

    /// Feedback line shown under the code field.
    pub fn message(&self) -> String {
        if self.is_valid {
            format!("{}% discount applied", self.percent())
        } else {
            "Invalid promo code".to_string()
        }
    }
}

/// A pending reset of an invalid promotion.
///
/// The generation identifies the submission that produced it; a reset only
/// clears the cart's promotion while that submission is still the latest one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromotionExpiry {
    pub generation: u64,
    pub delay: Duration,
}

/// Result of submitting a promotion code.
#[derive(Debug, Clone, PartialEq)]
pub enum PromotionOutcome {
    /// The code matched and is now active.
    Applied(Promotion),
    /// The code matched nothing. The invalid promotion is shown until `expiry`.
    Invalid {
        promotion: Promotion,
        expiry: PromotionExpiry,
    },
    /// A valid promotion is already active; the submission was ignored.
    AlreadyActive,
    /// The submitted text was blank; nothing changed.
    EmptyCode,
}

impl PromotionOutcome {
    /// The expiry to schedule, if any.
    pub fn expiry(&self) -> Option<PromotionExpiry> {
        match self {
            PromotionOutcome::Invalid { expiry, .. } => Some(*expiry),
            _ => None,
        }
    }

    /// Check if the submission activated a discount.
    pub fn is_applied(&self) -> bool {
        matches!(self, PromotionOutcome::Applied(_))
    }
}
