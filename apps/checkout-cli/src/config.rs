//! # CLI Configuration
//!
//! Pricing settings for the checkout CLI.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CHECKOUT_TAX_RATE_BPS=2100                                         │
//! │     CHECKOUT_DEFAULT_CURRENCY=USD                                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, else $CHECKOUT_CONFIG, else                       │
//! │     ~/.config/checkout/checkout.toml (Linux)                           │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     21% tax, USD                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [pricing]
//! tax_rate_bps = 2100       # 21%
//! default_currency = "USD"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use checkout_core::{CheckoutPolicy, TaxRate, DEFAULT_CURRENCY, DEFAULT_TAX_RATE_BPS};

use crate::error::{AppError, AppResult};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "CHECKOUT_CONFIG";
pub const TAX_RATE_ENV: &str = "CHECKOUT_TAX_RATE_BPS";
pub const DEFAULT_CURRENCY_ENV: &str = "CHECKOUT_DEFAULT_CURRENCY";

// =============================================================================
// Pricing Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSettings {
    /// Flat tax rate in basis points (2100 = 21%).
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: u32,

    /// Currency applied when a request has none.
    #[serde(default = "default_currency")]
    pub default_currency: String,
}

fn default_tax_rate_bps() -> u32 {
    DEFAULT_TAX_RATE_BPS
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            tax_rate_bps: default_tax_rate_bps(),
            default_currency: default_currency(),
        }
    }
}

// =============================================================================
// Checkout Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    #[serde(default)]
    pub pricing: PricingSettings,
}

impl CheckoutConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let explicit = config_path.or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from));

        let mut config = match explicit {
            // An explicitly named file must exist
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        info!(?path, "Loading checkout config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| AppError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if self.pricing.tax_rate_bps > 10_000 {
            return Err(AppError::InvalidConfig(format!(
                "tax_rate_bps must be between 0 and 10000, got {}",
                self.pricing.tax_rate_bps
            )));
        }

        if self.pricing.default_currency.trim().is_empty() {
            return Err(AppError::InvalidConfig(
                "default_currency must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies overrides from a key lookup (the process environment in
    /// production).
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bps) = lookup(TAX_RATE_ENV) {
            match bps.trim().parse::<u32>() {
                Ok(parsed) => {
                    debug!(tax_rate_bps = parsed, "Overriding tax rate from environment");
                    self.pricing.tax_rate_bps = parsed;
                }
                Err(_) => warn!(value = %bps, "Ignoring unparseable tax rate in environment"),
            }
        }

        if let Some(currency) = lookup(DEFAULT_CURRENCY_ENV) {
            debug!(currency = %currency, "Overriding default currency from environment");
            self.pricing.default_currency = currency;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "checkout", "checkout")
            .map(|dirs| dirs.config_dir().join("checkout.toml"))
    }

    /// Converts into the policy consumed by the calculator.
    pub fn policy(&self) -> CheckoutPolicy {
        CheckoutPolicy {
            tax_rate: TaxRate::from_bps(self.pricing.tax_rate_bps),
            default_currency: self.pricing.default_currency.clone(),
        }
    }
}
