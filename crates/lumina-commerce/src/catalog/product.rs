//! Digital product type.

use crate::cart::LicenseTier;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A digital product listed in the storefront.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Product type shown above the title (e.g., "UI Templates").
    pub product_type: String,
    /// Standard-license price.
    pub price: Money,
    /// Average review rating (0.0 - 5.0).
    pub rating: f64,
    /// Number of reviews.
    pub review_count: u32,
    /// Whether the product is featured on listing pages.
    #[serde(default)]
    pub featured: bool,
}

impl Product {
    /// Create a new product with no reviews.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        product_type: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            product_type: product_type.into(),
            price,
            rating: 0.0,
            review_count: 0,
            featured: false,
        }
    }

    /// Set the rating and review count.
    pub fn with_rating(mut self, rating: f64, review_count: u32) -> Self {
        self.rating = rating.clamp(0.0, 5.0);
        self.review_count = review_count;
        self
    }

    /// Mark the product as featured.
    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    /// Price under the given license tier.
    pub fn price_for(&self, tier: LicenseTier) -> Money {
        tier.price_for(&self.price)
    }

    /// Number of whole stars to render for the rating.
    pub fn full_stars(&self) -> u8 {
        self.rating.floor() as u8
    }

    /// Case-insensitive match on title or product type.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term) || self.product_type.to_lowercase().contains(&term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn presets() -> Product {
        Product::new(
            "photography-master-presets",
            "Photography Master Presets",
            "Presets",
            Money::new(4900, Currency::USD),
        )
        .with_rating(4.9, 87)
    }

    #[test]
    fn test_price_for_tier() {
        let product = presets();
        assert_eq!(product.price_for(LicenseTier::Standard).amount_cents, 4900);
        assert_eq!(product.price_for(LicenseTier::Extended).amount_cents, 12250);
    }

    #[test]
    fn test_matches_title_or_type() {
        let product = presets();
        assert!(product.matches("photo"));
        assert!(product.matches("PRESETS"));
        assert!(!product.matches("fonts"));
    }

    #[test]
    fn test_full_stars() {
        assert_eq!(presets().full_stars(), 4);
    }
}
