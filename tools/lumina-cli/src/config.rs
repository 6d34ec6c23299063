//! CLI configuration.

use anyhow::{Context, Result};
use lumina_commerce::cart::PromotionConfig;
use lumina_commerce::{CommerceError, Currency};
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Store settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Promotion codes and invalid-code expiry.
    #[serde(default)]
    pub promotion: PromotionConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// Check the promotion settings.
    pub fn validate(&self) -> Result<(), CommerceError> {
        self.promotion.validate()
    }
}

/// Store settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// Currency carts are priced in.
    #[serde(default)]
    pub currency: Currency,
}

/// Generate the default lumina.toml config file.
pub fn generate_default_config() -> String {
    r#"# Lumina storefront configuration

[store]
currency = "USD"

[promotion]
# How long an invalid code stays visible, in milliseconds
expiry_ms = 3000

[[promotion.codes]]
code = "WELCOME20"
discount_rate = 0.20
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumina_commerce::cart::PromotionRule;
    use std::fs;

    #[test]
    fn test_default_file_matches_defaults() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, CliConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lumina.toml");
        fs::write(
            &path,
            r#"
[store]
currency = "CAD"

[promotion]
expiry_ms = 1500

[[promotion.codes]]
code = "SPRING10"
discount_rate = 0.1
"#,
        )
        .unwrap();

        let config = CliConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.store.currency, Currency::CAD);
        assert_eq!(config.promotion.expiry_ms, 1500);
        assert_eq!(config.promotion.codes, vec![PromotionRule::new("SPRING10", 0.1)]);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lumina.json");
        fs::write(&path, r#"{ "promotion": { "expiry_ms": 250 } }"#).unwrap();

        let config = CliConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.store.currency, Currency::USD);
        assert_eq!(config.promotion.expiry_ms, 250);
        assert_eq!(config.promotion.codes.len(), 1);
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lumina.toml");
        let path = path.to_str().unwrap();

        let mut config = CliConfig::default();
        config.promotion.codes.push(PromotionRule::new("VIP50", 0.5));
        config.save(path).unwrap();

        assert_eq!(CliConfig::load(path).unwrap(), config);
    }

    #[test]
    fn test_invalid_rate_rejected() {
        let mut config = CliConfig::default();
        config.promotion.codes.push(PromotionRule::new("FREE", 1.0));
        assert!(matches!(
            config.validate(),
            Err(CommerceError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_unparseable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lumina.toml");
        fs::write(&path, "[promotion\nexpiry_ms = ").unwrap();

        let err = CliConfig::load(path.to_str().unwrap()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse TOML config"));
    }
}
