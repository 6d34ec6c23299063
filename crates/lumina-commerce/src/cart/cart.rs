//! Cart and line item types.

use crate::cart::{
    CartPricing, LicenseTier, LineItemPricing, Promotion, PromotionConfig, PromotionExpiry,
    PromotionOutcome,
};
use crate::catalog::{CatalogLookup, Product};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// A shopping cart.
///
/// Every operation besides adding an item is total: unknown ids are ignored,
/// quantities are clamped to at least 1, and an unrecognized promotion code is
/// recorded as an invalid promotion rather than an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Items in the cart, in insertion order.
    items: Vec<LineItem>,
    /// Cart currency.
    currency: Currency,
    /// Active promotion, valid or not.
    promotion: Option<Promotion>,
    /// Bumped on every promotion submission.
    #[serde(skip)]
    promotion_generation: u64,
    /// Known promotion codes.
    #[serde(default)]
    promotions: PromotionConfig,
}

impl Cart {
    /// Create an empty cart with the default promotions.
    pub fn new(currency: Currency) -> Self {
        Self::with_promotions(currency, PromotionConfig::default())
    }

    /// Create an empty cart with the given promotions.
    ///
    /// An invalid config is logged; discounts stay within the subtotal anyway.
    pub fn with_promotions(currency: Currency, promotions: PromotionConfig) -> Self {
        if let Err(e) = promotions.validate() {
            warn!(error = %e, "cart created with invalid promotion config");
        }
        Self {
            items: Vec::new(),
            currency,
            promotion: None,
            promotion_generation: 0,
            promotions,
        }
    }

    /// Add an item to the cart.
    ///
    /// If the product is already in the cart its quantity grows by the new
    /// item's quantity and its license tier becomes the new item's tier.
    /// Fails only when the item is priced in another currency.
    pub fn add_item(&mut self, item: LineItem) -> Result<(), CommerceError> {
        if item.unit_price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: item.unit_price.currency.code().to_string(),
            });
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(item.quantity).max(1);
            existing.license = item.license;
            debug!(
                product = %existing.id,
                quantity = existing.quantity,
                license = %existing.license,
                "merged item into cart"
            );
            return Ok(());
        }

        let mut item = item;
        item.quantity = item.quantity.max(1);
        debug!(product = %item.id, quantity = item.quantity, license = %item.license, "added item to cart");
        self.items.push(item);
        Ok(())
    }

    /// Look up a product and add one unit of it under the given tier.
    pub fn add_product<C>(
        &mut self,
        catalog: &C,
        product_id: &ProductId,
        license: LicenseTier,
    ) -> Result<(), CommerceError>
    where
        C: CatalogLookup + ?Sized,
    {
        let product = catalog
            .product(product_id)
            .ok_or_else(|| CommerceError::ProductNotFound(product_id.to_string()))?;
        self.add_item(LineItem::from_product(product, license))
    }

    /// Remove an item. Returns whether it was present.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != id);
        let removed = self.items.len() < len_before;
        if removed {
            debug!(product = %id, "removed item from cart");
        }
        removed
    }

    /// Change an item's quantity by `delta`, never going below 1.
    ///
    /// Returns the new quantity, or None if the item is not in the cart.
    pub fn update_quantity(&mut self, id: &ProductId, delta: i64) -> Option<i64> {
        let item = self.items.iter_mut().find(|i| &i.id == id)?;
        item.quantity = item.quantity.saturating_add(delta).max(1);
        debug!(product = %id, delta, quantity = item.quantity, "updated quantity");
        Some(item.quantity)
    }

    /// Set an item's license tier. Returns whether the item was present.
    pub fn set_license_tier(&mut self, id: &ProductId, license: LicenseTier) -> bool {
        match self.items.iter_mut().find(|i| &i.id == id) {
            Some(item) => {
                item.license = license;
                debug!(product = %id, license = %license, "changed license tier");
                true
            }
            None => false,
        }
    }

    /// Items in the cart.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Get an item by product id.
    pub fn get_item(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Number of distinct products.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Cart currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Known promotion codes.
    pub fn promotions(&self) -> &PromotionConfig {
        &self.promotions
    }

    /// Total for one item: unit price x license multiplier x quantity.
    pub fn item_total(&self, item: &LineItem) -> Money {
        item.total()
    }

    /// Sum of all item totals. Exactly zero for an empty cart.
    pub fn subtotal(&self) -> Money {
        let cents = self
            .items
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.total().amount_cents));
        Money::new(cents, self.currency)
    }

    /// Discount from the active promotion, zero unless it is valid.
    pub fn discount(&self) -> Money {
        match &self.promotion {
            Some(promo) if promo.is_valid => {
                let subtotal = self.subtotal();
                let discount = subtotal.multiply_decimal(promo.discount_rate.clamp(0.0, 1.0));
                let cents = discount.amount_cents.clamp(0, subtotal.amount_cents.max(0));
                Money::new(cents, self.currency)
            }
            _ => Money::zero(self.currency),
        }
    }

    /// Subtotal minus discount.
    pub fn total(&self) -> Money {
        let subtotal = self.subtotal();
        let discount = self.discount();
        Money::new(
            subtotal.amount_cents.saturating_sub(discount.amount_cents),
            self.currency,
        )
    }

    /// Submit a promotion code.
    ///
    /// Rejected while a valid promotion is active. Otherwise the code replaces
    /// whatever promotion was there; an unknown code yields an invalid
    /// promotion plus the expiry the caller should schedule.
    pub fn apply_promotion(&mut self, code_text: &str) -> PromotionOutcome {
        if self.promotion.as_ref().is_some_and(|p| p.is_valid) {
            debug!(code = code_text, "promotion already active, ignoring code");
            return PromotionOutcome::AlreadyActive;
        }

        if code_text.trim().is_empty() {
            return PromotionOutcome::EmptyCode;
        }

        self.promotion_generation += 1;

        match self.promotions.lookup(code_text) {
            Some(rule) => {
                let promotion = Promotion::valid(rule);
                info!(code = %promotion.code, rate = promotion.discount_rate, "promotion applied");
                self.promotion = Some(promotion.clone());
                PromotionOutcome::Applied(promotion)
            }
            None => {
                let promotion = Promotion::invalid(code_text);
                info!(code = code_text, "invalid promotion code");
                self.promotion = Some(promotion.clone());
                PromotionOutcome::Invalid {
                    promotion,
                    expiry: PromotionExpiry {
                        generation: self.promotion_generation,
                        delay: self.promotions.expiry_delay(),
                    },
                }
            }
        }
    }

    /// The active promotion, if any.
    pub fn promotion(&self) -> Option<&Promotion> {
        self.promotion.as_ref()
    }

    /// Clear an invalid promotion produced by submission `generation`.
    ///
    /// Does nothing if a newer code was submitted since. Returns whether the
    /// promotion was cleared.
    pub fn expire_promotion(&mut self, generation: u64) -> bool {
        let expired = generation == self.promotion_generation
            && self.promotion.as_ref().is_some_and(|p| !p.is_valid);
        if expired {
            debug!(generation, "invalid promotion expired");
            self.promotion = None;
        }
        expired
    }

    /// Pricing snapshot with a per-line breakdown.
    pub fn pricing(&self) -> CartPricing {
        let line_items = self
            .items
            .iter()
            .map(|item| LineItemPricing {
                line_item_id: item.id.clone(),
                title: item.title.clone(),
                license: item.license,
                unit_price: item.unit_price,
                license_price: item.license_price(),
                quantity: item.quantity,
                total: item.total(),
            })
            .collect();

        CartPricing {
            subtotal: self.subtotal(),
            discount_total: self.discount(),
            grand_total: self.total(),
            promotion: self.promotion.clone().filter(|p| p.is_valid),
            line_items,
        }
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::USD)
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product in the cart. Stable for the lifetime of the line.
    pub id: ProductId,
    /// Product title (denormalized for display).
    pub title: String,
    /// Standard-license unit price.
    pub unit_price: Money,
    /// Quantity, at least 1.
    pub quantity: i64,
    /// License tier.
    pub license: LicenseTier,
}

impl LineItem {
    /// Create a line item with quantity 1.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        unit_price: Money,
        license: LicenseTier,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            unit_price,
            quantity: 1,
            license,
        }
    }

    /// Create a line item for a catalog product.
    pub fn from_product(product: &Product, license: LicenseTier) -> Self {
        Self::new(product.id.clone(), product.title.clone(), product.price, license)
    }

    /// Set the quantity, clamped to at least 1.
    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity.max(1);
        self
    }

    /// Unit price under the item's license tier.
    pub fn license_price(&self) -> Money {
        self.license.price_for(&self.unit_price)
    }

    /// Unit price x license multiplier x quantity.
    pub fn total(&self) -> Money {
        self.unit_price
            .scale(self.quantity, self.license.multiplier_percent())
    }
}
