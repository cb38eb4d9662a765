//! Core business logic for the wallet engine.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! The balance, the conversion rules, and input validation all live here.
//!
//! # Modules
//!
//! - `currency` - Currency registry, exchange rate port, and conversion
//! - `ledger` - The single wallet balance and its atomic mutations
//! - `wallet` - The public operations exposed to callers

pub mod currency;
pub mod ledger;
pub mod wallet;

pub use currency::{
    ConversionEngine, CurrencyRegistry, ExchangeRate, ExchangeRateProvider, FixedRateProvider,
    StaticCurrencyRegistry,
};
pub use ledger::{Ledger, LedgerError};
pub use wallet::{WalletError, WalletService};
