//! Billing details collected on the payment step.

use crate::error::CommerceError;
use crate::forms::{require, require_email, FieldErrors};
use serde::{Deserialize, Serialize};

/// Countries offered in the billing country selector.
pub const SUPPORTED_COUNTRIES: [&str; 5] = [
    "United States",
    "Canada",
    "United Kingdom",
    "Australia",
    "Germany",
];

/// Billing address and contact details.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BillingDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Optional.
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    /// State or province. Optional.
    pub region: String,
    pub country: String,
}

impl BillingDetails {
    /// Collect every field error.
    pub fn errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "first_name", &self.first_name, "First name is required");
        require(&mut errors, "last_name", &self.last_name, "Last name is required");
        require_email(&mut errors, &self.email);
        require(&mut errors, "address", &self.address, "Address is required");
        require(&mut errors, "city", &self.city, "City is required");
        require(&mut errors, "postal_code", &self.postal_code, "Zip/Postal code is required");
        if require(&mut errors, "country", &self.country, "Country is required")
            && !SUPPORTED_COUNTRIES.contains(&self.country.as_str())
        {
            errors.add("country", "We do not ship orders to this country yet");
        }
        errors
    }

    /// Validate, returning all field errors at once.
    pub fn validate(&self) -> Result<(), CommerceError> {
        self.errors().into_result()
    }

    /// "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    /// One-line address, e.g. "123 Main St, San Francisco, CA 94107, United States".
    pub fn display_address(&self) -> String {
        let locality = [self.region.trim(), self.postal_code.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        [self.address.trim(), self.city.trim(), locality.as_str(), self.country.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
