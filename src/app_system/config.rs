//! Shop configuration.
//!
//! Supports a YAML file and environment variable overrides.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::catalog::default_products;
use crate::coupon_engine::CouponPolicy;
use crate::domain::ProductCreate;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    pub coupon: CouponPolicy,
    pub service: ServiceConfig,
    /// Products seeded into the catalog at startup, in id order.
    pub catalog: Vec<ProductCreate>,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            coupon: CouponPolicy::default(),
            service: ServiceConfig::default(),
            catalog: default_products(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Mailbox capacity for each actor.
    pub mailbox_size: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { mailbox_size: 32 }
    }
}

impl ShopConfig {
    /// Load configuration from file and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file (`$SHOP_CONFIG`, default `shop.yaml`)
    /// 3. Defaults
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = std::env::var("SHOP_CONFIG").unwrap_or_else(|_| "shop.yaml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            Self::from_file(&config_path)?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Applies `COUPON_NTH_ORDER`, `COUPON_DISCOUNT_PERCENT` and
    /// `SHOP_MAILBOX_SIZE`. Values that fail to parse are ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(n) = lookup("COUPON_NTH_ORDER").and_then(|v| v.parse().ok()) {
            self.coupon.nth_order = n;
        }
        if let Some(pct) = lookup("COUPON_DISCOUNT_PERCENT").and_then(|v| v.parse().ok()) {
            self.coupon.discount_percent = pct;
        }
        if let Some(size) = lookup("SHOP_MAILBOX_SIZE").and_then(|v| v.parse().ok()) {
            self.service.mailbox_size = size;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.coupon.nth_order == 0 {
            return Err(ConfigError::Invalid("coupon.nth_order must be at least 1".into()));
        }
        if self.coupon.discount_percent > 100 {
            return Err(ConfigError::Invalid(format!(
                "coupon.discount_percent must be at most 100, got {}",
                self.coupon.discount_percent
            )));
        }
        if self.coupon.min_custom_code_len == 0 {
            return Err(ConfigError::Invalid("coupon.min_custom_code_len must be at least 1".into()));
        }
        if self.service.mailbox_size == 0 {
            return Err(ConfigError::Invalid("service.mailbox_size must be at least 1".into()));
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}': {1}")]
    FileRead(String, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
