//! Shared types, errors, and configuration for the wallet engine.
//!
//! This crate provides common types used across all other crates:
//! - Validated currency codes and integer minor-unit money
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{
    AppConfig, CurrencyConfig, FixedRateConfig, LogConfig, RateProviderKind, RatesConfig,
    ServerConfig, WalletConfig,
};
pub use error::{AppError, AppResult};
pub use types::{CurrencyCode, Money, MoneyError};
