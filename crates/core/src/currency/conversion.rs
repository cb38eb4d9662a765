//! Currency conversion logic.
//!
//! CRITICAL: Rounding strategy for multi-currency:
//! - The product `amount * rate` is computed exactly in `Decimal`
//! - It is rounded once, to the target currency's minor unit
//! - Use banker's rounding (round half to even)

use std::sync::Arc;

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;
use wallet_shared::{CurrencyCode, Money};

use super::error::ConversionError;
use super::exchange::{ExchangeRate, ExchangeRateProvider};
use super::registry::CurrencyRegistry;

/// Converts a minor-unit amount using the given exchange rate.
///
/// Computes `amount / 10^from_minor_units * rate * 10^to_minor_units` and
/// rounds the result to an integer with banker's rounding (round half to
/// even) to minimize cumulative errors.
///
/// # Errors
///
/// Returns `ConversionError::Overflow` if any intermediate value or the
/// result leaves the representable range.
pub fn convert_minor_units(
    amount: i64,
    rate: Decimal,
    from_minor_units: u32,
    to_minor_units: u32,
) -> Result<i64, ConversionError> {
    let source =
        Decimal::try_new(amount, from_minor_units).map_err(|_| ConversionError::Overflow)?;
    let target_scale = Decimal::from(
        10_i64
            .checked_pow(to_minor_units)
            .ok_or(ConversionError::Overflow)?,
    );

    source
        .checked_mul(rate)
        .and_then(|value| value.checked_mul(target_scale))
        .map(|value| value.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven))
        .and_then(|value| i64::try_from(value).ok())
        .ok_or(ConversionError::Overflow)
}

/// Converts `Money` between currencies.
///
/// Stateless with respect to the wallet: it reads the registry and asks the
/// provider for rates, nothing else. Safe to share across tasks.
#[derive(Clone)]
pub struct ConversionEngine {
    registry: Arc<dyn CurrencyRegistry>,
    provider: Arc<dyn ExchangeRateProvider>,
}

impl ConversionEngine {
    /// Creates a new engine.
    pub fn new(
        registry: Arc<dyn CurrencyRegistry>,
        provider: Arc<dyn ExchangeRateProvider>,
    ) -> Self {
        Self { registry, provider }
    }

    /// The registry used for precision lookups.
    #[must_use]
    pub fn registry(&self) -> &Arc<dyn CurrencyRegistry> {
        &self.registry
    }

    /// Converts `money` into `to`.
    ///
    /// Identity conversion returns the input unchanged without a rate lookup.
    ///
    /// # Errors
    ///
    /// - `UnknownCurrency` if either code is not registered
    /// - `RateUnavailable` if the provider fails
    /// - `Overflow` if the result is not representable
    pub async fn convert(&self, money: &Money, to: &CurrencyCode) -> Result<Money, ConversionError> {
        self.registry.minor_units(&money.currency)?;
        self.registry.minor_units(to)?;

        if money.currency == *to {
            return Ok(money.clone());
        }

        let rate = self
            .provider
            .rate(&money.currency, to)
            .await
            .map_err(|e| ConversionError::RateUnavailable {
                from: money.currency.clone(),
                to: to.clone(),
                reason: e.to_string(),
            })?;

        let converted = self.convert_with_rate(money, &rate)?;

        debug!(
            from = %money.currency,
            to = %to,
            rate = %rate.rate,
            source_amount = money.amount,
            converted_amount = converted.amount,
            "Converted amount"
        );

        Ok(converted)
    }

    /// Converts `money` with a rate the caller already holds.
    ///
    /// # Errors
    ///
    /// - `UnknownCurrency` if either side is not registered
    /// - `RateUnavailable` if `rate` is not quoted from `money`'s currency
    /// - `Overflow` if the result is not representable
    pub fn convert_with_rate(
        &self,
        money: &Money,
        rate: &ExchangeRate,
    ) -> Result<Money, ConversionError> {
        let from_minor_units = self.registry.minor_units(&money.currency)?;
        let to_minor_units = self.registry.minor_units(&rate.quote)?;
        if rate.base != money.currency {
            return Err(ConversionError::RateUnavailable {
                from: money.currency.clone(),
                to: rate.quote.clone(),
                reason: format!("rate is quoted from {}", rate.base),
            });
        }

        let amount = convert_minor_units(money.amount, rate.rate, from_minor_units, to_minor_units)?;
        Ok(Money::new(amount, rate.quote.clone()))
    }
}
