//! Exchange rate types and the provider port.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use wallet_shared::{CurrencyCode, RatesConfig};

use super::error::RateError;

/// Exchange rate between two currencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Base currency code.
    pub base: CurrencyCode,
    /// Quote currency code.
    pub quote: CurrencyCode,
    /// Exchange rate (1 base = rate quote). Always positive.
    pub rate: Decimal,
    /// When the rate was observed.
    pub as_of: DateTime<Utc>,
}

impl ExchangeRate {
    /// Creates a new exchange rate, rejecting zero and negative rates.
    pub fn new(
        base: CurrencyCode,
        quote: CurrencyCode,
        rate: Decimal,
        as_of: DateTime<Utc>,
    ) -> Result<Self, RateError> {
        if rate <= Decimal::ZERO {
            return Err(RateError::unavailable(
                &base,
                &quote,
                format!("non-positive rate {rate}"),
            ));
        }
        Ok(Self {
            base,
            quote,
            rate,
            as_of,
        })
    }
}

/// Source of exchange rates.
///
/// The only point where market data enters the engine. Every call may fail
/// and may block on I/O; the identity pair is never asked for.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    /// Returns the rate for converting `base` into `quote`.
    async fn rate(
        &self,
        base: &CurrencyCode,
        quote: &CurrencyCode,
    ) -> Result<ExchangeRate, RateError>;
}

/// Static rate table held in memory.
///
/// Pairs are directional: a USD->EUR entry says nothing about EUR->USD.
#[derive(Debug, Clone)]
pub struct FixedRateProvider {
    rates: HashMap<(CurrencyCode, CurrencyCode), Decimal>,
    as_of: DateTime<Utc>,
}

impl Default for FixedRateProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FixedRateProvider {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rates: HashMap::new(),
            as_of: Utc::now(),
        }
    }

    /// Adds or replaces the rate for `base -> quote`.
    pub fn insert(
        &mut self,
        base: CurrencyCode,
        quote: CurrencyCode,
        rate: Decimal,
    ) -> Result<(), RateError> {
        let checked = ExchangeRate::new(base, quote, rate, self.as_of)?;
        self.rates.insert((checked.base, checked.quote), checked.rate);
        Ok(())
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with_rate(mut self, base: &str, quote: &str, rate: Decimal) -> Result<Self, RateError> {
        let base =
            CurrencyCode::parse(base).map_err(|_| RateError::UnknownCurrency(base.to_string()))?;
        let quote =
            CurrencyCode::parse(quote).map_err(|_| RateError::UnknownCurrency(quote.to_string()))?;
        self.insert(base, quote, rate)?;
        Ok(self)
    }

    /// Builds a table from the `rates.fixed` section.
    pub fn from_config(config: &RatesConfig) -> Result<Self, RateError> {
        config
            .fixed
            .iter()
            .try_fold(Self::new(), |provider, entry| {
                provider.with_rate(&entry.base, &entry.quote, entry.rate)
            })
    }

    /// Number of configured pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true if no pair is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

#[async_trait]
impl ExchangeRateProvider for FixedRateProvider {
    async fn rate(
        &self,
        base: &CurrencyCode,
        quote: &CurrencyCode,
    ) -> Result<ExchangeRate, RateError> {
        self.rates
            .get(&(base.clone(), quote.clone()))
            .map(|rate| ExchangeRate {
                base: base.clone(),
                quote: quote.clone(),
                rate: *rate,
                as_of: self.as_of,
            })
            .ok_or_else(|| RateError::unavailable(base, quote, "pair not in rate table"))
    }
}
