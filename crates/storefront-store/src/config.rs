//! # Store Configuration
//!
//! Where the cart lives and what checkout charges on top of the subtotal.
//!
//! ## Configuration Sources (later overrides earlier)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Defaults (this file)                                                │
//! │  2. storefront.toml                                                     │
//! │     ~/.config/cart/storefront.toml (Linux)                              │
//! │     ~/Library/Application Support/com.storefront.cart/ (macOS)          │
//! │  3. Environment variables (STOREFRONT_*)                                │
//! │  4. validate()                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Config File
//! ```toml
//! [cart]
//! storage_key = "cart"
//! data_dir = "/var/lib/storefront"
//!
//! [pricing]
//! tax_rate_bps = 1800
//! shipping_fee_minor = 9900
//!
//! [currency]
//! code = "INR"
//! symbol = "₹"
//! ```

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use storefront_core::validation::validate_storage_key;
use storefront_core::{
    Money, Pricing, TaxRate, DEFAULT_CART_KEY, DEFAULT_SHIPPING_FEE_MINOR, DEFAULT_TAX_RATE_BPS,
};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::storage::default_data_dir;

// =============================================================================
// Sections
// =============================================================================

/// Where the cart record is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSettings {
    /// Slot name; becomes `<storage_key>.json` on disk.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Overrides the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

fn default_storage_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

impl Default for CartSettings {
    fn default() -> Self {
        CartSettings {
            storage_key: default_storage_key(),
            data_dir: None,
        }
    }
}

/// Checkout charges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSettings {
    /// e.g. 1800 = 18%
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: u32,

    /// Flat fee for a non-empty cart, in minor units.
    #[serde(default = "default_shipping_fee_minor")]
    pub shipping_fee_minor: i64,
}

fn default_tax_rate_bps() -> u32 {
    DEFAULT_TAX_RATE_BPS
}

fn default_shipping_fee_minor() -> i64 {
    DEFAULT_SHIPPING_FEE_MINOR
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            tax_rate_bps: default_tax_rate_bps(),
            shipping_fee_minor: default_shipping_fee_minor(),
        }
    }
}

/// Display currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencySettings {
    /// ISO 4217
    #[serde(default = "default_currency_code")]
    pub code: String,

    #[serde(default = "default_currency_symbol")]
    pub symbol: String,
}

fn default_currency_code() -> String {
    "INR".to_string()
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

impl Default for CurrencySettings {
    fn default() -> Self {
        CurrencySettings {
            code: default_currency_code(),
            symbol: default_currency_symbol(),
        }
    }
}

// =============================================================================
// Store Configuration
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub cart: CartSettings,

    #[serde(default)]
    pub pricing: PricingSettings,

    #[serde(default)]
    pub currency: CurrencySettings,
}

impl StoreConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// A missing file is not an error; a malformed one is.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading store config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load store config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file, creating parent directories.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ConfigError::Invalid("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Store config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_storage_key(&self.cart.storage_key)
            .map_err(|e| ConfigError::Invalid(format!("cart.storage_key: {}", e)))?;

        if self.pricing.tax_rate_bps > 10_000 {
            return Err(ConfigError::Invalid(format!(
                "pricing.tax_rate_bps must be at most 10000, got {}",
                self.pricing.tax_rate_bps
            )));
        }

        if self.pricing.shipping_fee_minor < 0 {
            return Err(ConfigError::Invalid(format!(
                "pricing.shipping_fee_minor must not be negative, got {}",
                self.pricing.shipping_fee_minor
            )));
        }

        if self.currency.code.trim().is_empty() {
            return Err(ConfigError::Invalid("currency.code is required".into()));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    ///
    /// ## Environment Variables
    /// - `STOREFRONT_CART_KEY`: storage slot name
    /// - `STOREFRONT_DATA_DIR`: directory for cart files
    /// - `STOREFRONT_TAX_RATE`: percentage, e.g. "18" or "8.25"
    /// - `STOREFRONT_SHIPPING_FEE`: amount in major units, e.g. "99.00"
    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("STOREFRONT_CART_KEY") {
            debug!(storage_key = %key, "Overriding cart key from environment");
            self.cart.storage_key = key;
        }

        if let Ok(dir) = std::env::var("STOREFRONT_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data directory from environment");
            self.cart.data_dir = Some(PathBuf::from(dir));
        }

        if let Ok(rate) = std::env::var("STOREFRONT_TAX_RATE") {
            match rate.trim().parse::<f64>() {
                Ok(pct) if pct.is_finite() && pct >= 0.0 => {
                    self.pricing.tax_rate_bps = TaxRate::from_percentage(pct).bps();
                }
                _ => warn!(rate = %rate, "Ignoring unparsable STOREFRONT_TAX_RATE"),
            }
        }

        if let Ok(fee) = std::env::var("STOREFRONT_SHIPPING_FEE") {
            match fee.trim().parse::<Decimal>().ok().and_then(Money::from_decimal) {
                Some(amount) => self.pricing.shipping_fee_minor = amount.minor(),
                None => warn!(fee = %fee, "Ignoring unparsable STOREFRONT_SHIPPING_FEE"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "cart")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn storage_key(&self) -> &str {
        &self.cart.storage_key
    }

    /// Directory for cart files: the override, else the platform default.
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.cart.data_dir.clone().or_else(default_data_dir)
    }

    pub fn pricing(&self) -> Pricing {
        Pricing::new(
            TaxRate::from_bps(self.pricing.tax_rate_bps),
            Money::from_minor(self.pricing.shipping_fee_minor),
        )
    }

    /// Formats an amount with the configured symbol.
    ///
    /// ```rust
    /// use storefront_core::Money;
    /// use storefront_store::StoreConfig;
    ///
    /// let config = StoreConfig::default();
    /// assert_eq!(config.format_currency(Money::from_minor(129900)), "₹1,299.00");
    /// assert_eq!(config.format_currency(Money::from_minor(-550)), "-₹5.50");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let minor = amount.minor().unsigned_abs();
        let whole = (minor / 100).to_string();
        let frac = minor % 100;

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, digit) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        format!(
            "{}{}{}.{:02}",
            if amount.is_negative() { "-" } else { "" },
            self.currency.symbol,
            grouped,
            frac
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
