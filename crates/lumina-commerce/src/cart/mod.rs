//! Shopping cart module.
//!
//! Contains the cart, license-tier pricing, pricing snapshots and promotion codes.

mod cart;
mod license;
mod pricing;
mod promotion;

pub use cart::{Cart, LineItem};
pub use license::LicenseTier;
pub use pricing::{CartPricing, LineItemPricing};
pub use promotion::{
    Promotion, PromotionConfig, PromotionExpiry, PromotionOutcome, PromotionRule,
    DEFAULT_EXPIRY_MS, WELCOME_CODE, WELCOME_RATE,
};
