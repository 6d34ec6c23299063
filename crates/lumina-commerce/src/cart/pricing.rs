//! Cart pricing snapshots.

use crate::cart::{LicenseTier, Promotion};
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Discount from the active promotion.
    pub discount_total: Money,
    /// Final total (subtotal - discount).
    pub grand_total: Money,
    /// Promotion behind the discount, only when valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion: Option<Promotion>,
    /// Per-line-item pricing breakdown.
    pub line_items: Vec<LineItemPricing>,
}

impl CartPricing {
    /// Check if a discount is applied.
    pub fn has_discount(&self) -> bool {
        self.discount_total.amount_cents > 0
    }

    /// Discount percentage of subtotal.
    pub fn discount_percentage(&self) -> f64 {
        if self.subtotal.amount_cents == 0 {
            return 0.0;
        }
        (self.discount_total.amount_cents as f64 / self.subtotal.amount_cents as f64) * 100.0
    }

    /// Sum of quantities across lines.
    pub fn item_count(&self) -> i64 {
        self.line_items
            .iter()
            .fold(0i64, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Label for the discount row, e.g. "Discount (WELCOME20)".
    pub fn discount_label(&self) -> Option<String> {
        self.promotion
            .as_ref()
            .map(|p| format!("Discount ({})", p.code))
    }
}

/// Pricing breakdown for a single line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    /// Line item ID.
    pub line_item_id: ProductId,
    /// Product title.
    pub title: String,
    /// License tier.
    pub license: LicenseTier,
    /// Standard-license unit price.
    pub unit_price: Money,
    /// Unit price under the line's license tier.
    pub license_price: Money,
    /// Quantity.
    pub quantity: i64,
    /// Line total.
    pub total: Money,
}

impl LineItemPricing {
    /// Summary line, e.g. "Extended License x 2".
    pub fn license_summary(&self) -> String {
        if self.quantity > 1 {
            format!("{} \u{00d7} {}", self.license.display_name(), self.quantity)
        } else {
            self.license.display_name().to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn line(quantity: i64) -> LineItemPricing {
        LineItemPricing {
            line_item_id: ProductId::new("cinematic-luts-pack"),
            title: "Cinematic LUTs Pack".to_string(),
            license: LicenseTier::Extended,
            unit_price: Money::new(9900, Currency::USD),
            license_price: Money::new(24750, Currency::USD),
            quantity,
            total: Money::new(24750i64.saturating_mul(quantity), Currency::USD),
        }
    }

    #[test]
    fn test_discount_percentage() {
        let pricing = CartPricing {
            subtotal: Money::new(20150, Currency::USD),
            discount_total: Money::new(4030, Currency::USD),
            grand_total: Money::new(16120, Currency::USD),
            promotion: None,
            line_items: vec![],
        };

        assert!(pricing.has_discount());
        assert!((pricing.discount_percentage() - 20.0).abs() < 0.01);
    }

    #[test]
    fn test_empty_pricing() {
        let pricing = CartPricing {
            subtotal: Money::zero(Currency::USD),
            discount_total: Money::zero(Currency::USD),
            grand_total: Money::zero(Currency::USD),
            promotion: None,
            line_items: vec![],
        };

        assert_eq!(pricing.discount_percentage(), 0.0);
        assert!(pricing.discount_label().is_none());
    }

    #[test]
    fn test_item_count_saturates() {
        let pricing = CartPricing {
            subtotal: Money::zero(Currency::USD),
            discount_total: Money::zero(Currency::USD),
            grand_total: Money::zero(Currency::USD),
            promotion: None,
            line_items: vec![line(i64::MAX), line(i64::MAX)],
        };

        assert_eq!(pricing.item_count(), i64::MAX);
    }

    #[test]
    fn test_license_summary() {
        assert_eq!(line(1).license_summary(), "Extended License");
        assert_eq!(line(2).license_summary(), "Extended License \u{00d7} 2");
    }
}
