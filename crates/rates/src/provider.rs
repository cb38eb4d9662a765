//! Cached HTTP implementation of `ExchangeRateProvider`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tracing::warn;
use wallet_core::currency::{ExchangeRate, ExchangeRateProvider, RateError};
use wallet_shared::{CurrencyCode, RatesConfig};

use crate::client::RateFeedClient;
use crate::error::FetchError;
use crate::table::RateTable;

/// Maximum number of base currencies kept in the cache.
const DEFAULT_CACHE_CAPACITY: u64 = 64;

/// Exchange rate provider backed by the HTTP feed.
///
/// One table is fetched per base currency and reused until the TTL expires.
/// Concurrent lookups for the same base share a single in-flight request.
#[derive(Clone)]
pub struct HttpRateProvider {
    client: RateFeedClient,
    tables: Cache<CurrencyCode, Arc<RateTable>>,
}

impl HttpRateProvider {
    /// Creates a provider that keeps each table for `ttl`.
    #[must_use]
    pub fn new(client: RateFeedClient, ttl: Duration) -> Self {
        let tables = Cache::builder()
            .max_capacity(DEFAULT_CACHE_CAPACITY)
            .time_to_live(ttl)
            .build();
        Self { client, tables }
    }

    /// Builds a provider from the `rates` configuration section.
    pub fn from_config(config: &RatesConfig) -> Result<Self, FetchError> {
        let client =
            RateFeedClient::new(&config.api_url, Duration::from_secs(config.timeout_secs))?;
        Ok(Self::new(
            client,
            Duration::from_secs(config.cache_ttl_secs),
        ))
    }

    /// Drops every cached table.
    pub fn invalidate_all(&self) {
        self.tables.invalidate_all();
    }

    async fn table(&self, base: &CurrencyCode) -> Result<Arc<RateTable>, Arc<FetchError>> {
        self.tables
            .try_get_with(base.clone(), async {
                self.client.latest(base).await.map(Arc::new)
            })
            .await
    }
}

#[async_trait]
impl ExchangeRateProvider for HttpRateProvider {
    async fn rate(
        &self,
        base: &CurrencyCode,
        quote: &CurrencyCode,
    ) -> Result<ExchangeRate, RateError> {
        let table = self.table(base).await.map_err(|e| {
            warn!(
                base = %base,
                quote = %quote,
                timeout = e.is_timeout(),
                error = %e,
                "Rate feed unavailable"
            );
            RateError::unavailable(base, quote, e.to_string())
        })?;
        table.rate(base, quote)
    }
}
