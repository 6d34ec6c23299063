//! License tiers for digital products.

use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// License a digital product is bought under.
///
/// The multiplier is a fixed business constant, not configurable per item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LicenseTier {
    /// Single commercial project. Base price.
    #[default]
    Standard,
    /// Multiple commercial projects. 2.5x the base price.
    Extended,
}

impl LicenseTier {
    /// Price multiplier for this tier.
    pub fn multiplier(&self) -> f64 {
        self.multiplier_percent() as f64 / 100.0
    }

    /// Price multiplier as a whole-number percentage.
    pub fn multiplier_percent(&self) -> i64 {
        match self {
            LicenseTier::Standard => 100,
            LicenseTier::Extended => 250,
        }
    }

    /// Unit price under this tier.
    pub fn price_for(&self, base: &Money) -> Money {
        base.scale(1, self.multiplier_percent())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LicenseTier::Standard => "standard",
            LicenseTier::Extended => "extended",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LicenseTier::Standard => "Standard License",
            LicenseTier::Extended => "Extended License",
        }
    }

    /// Usage terms shown next to the tier selector.
    pub fn terms(&self) -> &'static str {
        match self {
            LicenseTier::Standard => "License for use in a single commercial project",
            LicenseTier::Extended => "Extended license allows use in multiple commercial projects",
        }
    }
}

impl fmt::Display for LicenseTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LicenseTier {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(LicenseTier::Standard),
            "extended" => Ok(LicenseTier::Extended),
            _ => Err(CommerceError::InvalidLicenseTier(s.to_string())),
        }
    }
}
