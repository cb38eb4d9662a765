//! Application configuration management.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::types::{CurrencyCode, MAX_MINOR_UNITS};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Wallet configuration.
    #[serde(default)]
    pub wallet: WalletConfig,
    /// Exchange rate source configuration.
    #[serde(default)]
    pub rates: RatesConfig,
    /// Log output configuration.
    #[serde(default)]
    pub log: LogConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// A registered currency and its minor-unit precision.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CurrencyConfig {
    /// Currency code, e.g. "USD".
    pub code: String,
    /// Number of fractional digits (2 for USD, 0 for JPY).
    pub minor_units: u32,
}

impl CurrencyConfig {
    fn new(code: &str, minor_units: u32) -> Self {
        Self {
            code: code.to_string(),
            minor_units,
        }
    }
}

/// Wallet configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WalletConfig {
    /// Currency the balance is stored in. Fixed for the wallet's lifetime.
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
    /// Balance the wallet starts with, in the base currency.
    #[serde(default)]
    pub opening_balance: Decimal,
    /// Supported currencies.
    #[serde(default = "default_currencies")]
    pub currencies: Vec<CurrencyConfig>,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            base_currency: default_base_currency(),
            opening_balance: Decimal::ZERO,
            currencies: default_currencies(),
        }
    }
}

fn default_base_currency() -> String {
    "USD".to_string()
}

fn default_currencies() -> Vec<CurrencyConfig> {
    vec![
        CurrencyConfig::new("USD", 2),
        CurrencyConfig::new("EUR", 2),
        CurrencyConfig::new("GBP", 2),
        CurrencyConfig::new("HUF", 2),
        CurrencyConfig::new("JPY", 0),
    ]
}

impl WalletConfig {
    /// Checks the wallet section for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a currency code is malformed or
    /// duplicated, a precision is out of range, the base currency is not
    /// registered, or the opening balance is negative.
    pub fn validate(&self) -> AppResult<()> {
        let mut seen = HashSet::new();
        for currency in &self.currencies {
            let code = CurrencyCode::parse(&currency.code)
                .map_err(|e| AppError::Config(format!("wallet.currencies: {e}")))?;
            if currency.minor_units > MAX_MINOR_UNITS {
                return Err(AppError::Config(format!(
                    "wallet.currencies: {code} has {} minor units (max {MAX_MINOR_UNITS})",
                    currency.minor_units
                )));
            }
            if !seen.insert(code.clone()) {
                return Err(AppError::Config(format!(
                    "wallet.currencies: {code} is listed more than once"
                )));
            }
        }

        let base = CurrencyCode::parse(&self.base_currency)
            .map_err(|e| AppError::Config(format!("wallet.base_currency: {e}")))?;
        if !seen.contains(&base) {
            return Err(AppError::Config(format!(
                "wallet.base_currency: {base} is not a registered currency"
            )));
        }

        if self.opening_balance.is_sign_negative() && !self.opening_balance.is_zero() {
            return Err(AppError::Config(
                "wallet.opening_balance must not be negative".to_string(),
            ));
        }

        Ok(())
    }
}

/// Which exchange rate source to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateProviderKind {
    /// Live rates fetched over HTTP.
    #[default]
    Http,
    /// Static table from `rates.fixed`.
    Fixed,
}

/// A single configured exchange rate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FixedRateConfig {
    /// Base currency code.
    pub base: String,
    /// Quote currency code.
    pub quote: String,
    /// 1 base = `rate` quote.
    pub rate: Decimal,
}

/// Exchange rate source configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesConfig {
    /// Rate source.
    #[serde(default)]
    pub provider: RateProviderKind,
    /// Endpoint returning the latest rates for a base currency.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// How long a fetched rate table is reused, in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// Rates used when `provider = "fixed"`.
    #[serde(default)]
    pub fixed: Vec<FixedRateConfig>,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            provider: RateProviderKind::default(),
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            cache_ttl_secs: default_cache_ttl_secs(),
            fixed: Vec::new(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.exchangerate-api.com/v4/latest".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_cache_ttl_secs() -> u64 {
    300 // 5 minutes
}

/// Log output configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogConfig {
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("WALLET").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
