//! Storefront commerce logic for Lumina.
//!
//! This crate holds the parts of the storefront that carry real business rules:
//!
//! - **Catalog**: Digital products and the lookup used to price them
//! - **Search**: Product search and sort for the listing page
//! - **Cart**: Line items, license-tier pricing, promotion codes
//! - **Checkout**: The three-step Review / Payment / Confirm flow and order hand-off
//! - **Forms**: Billing details and contact form validation
//! - **Session**: A cart session that owns the promotion expiry task
//!
//! # Example
//!
//! ```rust,ignore
//! use lumina_commerce::prelude::*;
//!
//! let catalog = StaticCatalog::storefront();
//! let session = CartSession::new(PromotionConfig::default());
//!
//! session.add_product(&catalog, &ProductId::new("modern-ui-kit-pro"), LicenseTier::Standard)?;
//! session.apply_promotion("welcome20");
//!
//! let pricing = session.pricing();
//! println!("Total: {}", pricing.grand_total.display());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod forms;
pub mod search;
pub mod session;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{CatalogLookup, Product, StaticCatalog};

    // Search
    pub use crate::search::{ProductQuery, SortOption};

    // Cart
    pub use crate::cart::{
        Cart, CartPricing, LicenseTier, LineItem, LineItemPricing, Promotion, PromotionConfig,
        PromotionExpiry, PromotionOutcome, PromotionRule,
    };

    // Checkout
    pub use crate::checkout::{CheckoutFlow, CheckoutStep, OrderLine, OrderRequest};

    // Forms
    pub use crate::forms::{BillingDetails, ContactForm, FieldErrors};

    // Session
    pub use crate::session::CartSession;
}
