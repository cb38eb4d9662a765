//! Rate table returned by the feed.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use wallet_core::currency::{ExchangeRate, RateError};
use wallet_shared::CurrencyCode;

/// Latest quotes for one base currency.
///
/// ```json
/// {"base": "USD", "time_last_updated": 1735689600, "rates": {"EUR": 0.92}}
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct RateTable {
    /// Base currency the quotes are relative to.
    pub base: String,
    /// Unix timestamp of the feed's last update.
    #[serde(default)]
    pub time_last_updated: Option<i64>,
    /// 1 base = `rates[quote]` quote.
    pub rates: HashMap<String, Decimal>,
}

impl RateTable {
    /// When the feed last updated the table. Falls back to now.
    #[must_use]
    pub fn as_of(&self) -> DateTime<Utc> {
        self.time_last_updated
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .unwrap_or_else(Utc::now)
    }

    /// Looks up the `base -> quote` rate.
    ///
    /// # Errors
    ///
    /// Returns `RateError::Unavailable` if the quote is missing or not
    /// positive.
    pub fn rate(&self, base: &CurrencyCode, quote: &CurrencyCode) -> Result<ExchangeRate, RateError> {
        let rate = self
            .rates
            .get(quote.as_str())
            .copied()
            .ok_or_else(|| RateError::unavailable(base, quote, "quote missing from rate table"))?;
        ExchangeRate::new(base.clone(), quote.clone(), rate, self.as_of())
    }
}
