//! Commerce error types.
//!
//! Cart and checkout operations themselves never fail; these errors cover the
//! edges where the engine meets a catalog, a form, or a configuration file.

use crate::forms::FieldErrors;
use thiserror::Error;

/// Errors that can occur around the storefront engine.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Line item priced in a different currency than the cart.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Unknown sort option name.
    #[error("Unknown sort option: {0}")]
    InvalidSortOption(String),

    /// Unknown license tier name.
    #[error("Unknown license tier: {0}")]
    InvalidLicenseTier(String),

    /// Checkout cannot produce an order yet.
    #[error("Checkout incomplete: missing {0}")]
    CheckoutIncomplete(String),

    /// One or more form fields failed validation.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// Invalid promotion or store configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
