//! Order request handed to the payment and order processor.

use crate::cart::{Cart, CartPricing, LicenseTier};
use crate::error::CommerceError;
use crate::forms::BillingDetails;
use crate::ids::{OrderId, ProductId, SessionId};
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A purchased line, frozen at confirmation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub title: String,
    pub license: LicenseTier,
    pub quantity: i64,
    /// Unit price under the license tier.
    pub unit_price: Money,
    pub total: Money,
}

/// Everything a processor needs to charge for and fulfil an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRequest {
    pub id: OrderId,
    pub session_id: SessionId,
    pub lines: Vec<OrderLine>,
    pub pricing: CartPricing,
    pub billing: BillingDetails,
    pub placed_at: DateTime<Utc>,
}

impl OrderRequest {
    /// Build a request from a cart and validated billing details.
    pub fn from_cart(
        session_id: SessionId,
        cart: &Cart,
        billing: BillingDetails,
    ) -> Result<Self, CommerceError> {
        if cart.is_empty() {
            return Err(CommerceError::CheckoutIncomplete("cart items".to_string()));
        }
        billing.validate()?;

        let pricing = cart.pricing();
        let lines = pricing
            .line_items
            .iter()
            .map(|line| OrderLine {
                product_id: line.line_item_id.clone(),
                title: line.title.clone(),
                license: line.license,
                quantity: line.quantity,
                unit_price: line.license_price,
                total: line.total,
            })
            .collect();

        Ok(Self {
            id: OrderId::generate(),
            session_id,
            lines,
            pricing,
            billing,
            placed_at: Utc::now(),
        })
    }

    /// Amount to charge.
    pub fn amount_due(&self) -> Money {
        self.pricing.grand_total
    }

    /// Promotion code used, if any.
    pub fn promotion_code(&self) -> Option<&str> {
        self.pricing.promotion.as_ref().map(|p| p.code.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::LineItem;
    use crate::money::Currency;

    fn billing() -> BillingDetails {
        BillingDetails {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            address: "123 Main St".to_string(),
            city: "San Francisco".to_string(),
            postal_code: "94107".to_string(),
            region: "CA".to_string(),
            country: "United States".to_string(),
            ..BillingDetails::default()
        }
    }

    fn cart() -> Cart {
        let mut cart = Cart::default();
        cart.add_item(LineItem::new(
            "cinematic-luts-pack",
            "Cinematic LUTs Pack",
            Money::new(9900, Currency::USD),
            LicenseTier::Extended,
        ))
        .unwrap();
        cart
    }

    #[test]
    fn test_order_from_cart() {
        let mut cart = cart();
        cart.apply_promotion("WELCOME20");

        let order = OrderRequest::from_cart(SessionId::new("s-1"), &cart, billing()).unwrap();
        assert_eq!(order.lines.len(), 1);
        assert_eq!(order.lines[0].unit_price.amount_cents, 24750);
        assert_eq!(order.amount_due().amount_cents, 19800);
        assert_eq!(order.promotion_code(), Some("WELCOME20"));
    }

    #[test]
    fn test_order_requires_items() {
        let result = OrderRequest::from_cart(SessionId::new("s-1"), &Cart::default(), billing());
        assert!(matches!(result, Err(CommerceError::CheckoutIncomplete(_))));
    }

    #[test]
    fn test_order_requires_valid_billing() {
        let result =
            OrderRequest::from_cart(SessionId::new("s-1"), &cart(), BillingDetails::default());
        assert!(matches!(result, Err(CommerceError::Validation(_))));
    }
}
