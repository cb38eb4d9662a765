//! Live exchange rates for the wallet engine.
//!
//! Rates come from an HTTP feed that answers `GET {api_url}/{BASE}` with a
//! table of quotes for that base. Tables are cached per base currency so a
//! burst of conversions costs one request.

pub mod client;
pub mod error;
pub mod provider;
pub mod table;

pub use client::RateFeedClient;
pub use error::FetchError;
pub use provider::HttpRateProvider;
pub use table::RateTable;
