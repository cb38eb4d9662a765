//! HTTP client for the rate feed.

use std::time::Duration;

use tracing::debug;
use wallet_shared::CurrencyCode;

use crate::error::FetchError;
use crate::table::RateTable;

/// Fetches rate tables from `{api_url}/{BASE}`.
#[derive(Debug, Clone)]
pub struct RateFeedClient {
    http: reqwest::Client,
    api_url: String,
}

impl RateFeedClient {
    /// Creates a client whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Transport` if the HTTP client cannot be built.
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, api_url })
    }

    /// Endpoint the client is pointed at.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Fetches the latest table for `base`.
    pub async fn latest(&self, base: &CurrencyCode) -> Result<RateTable, FetchError> {
        let url = format!("{}/{base}", self.api_url);
        debug!(%url, "Fetching rate table");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let table: RateTable = response.json().await?;
        if !table.base.eq_ignore_ascii_case(base.as_str()) {
            return Err(FetchError::BaseMismatch {
                expected: base.to_string(),
                actual: table.base,
            });
        }

        debug!(base = %base, quotes = table.rates.len(), "Rate table fetched");
        Ok(table)
    }
}
