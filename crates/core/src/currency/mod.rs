//! Multi-currency handling: registry, exchange rates, and conversion.

pub mod conversion;
pub mod error;
pub mod exchange;
pub mod registry;

#[cfg(test)]
mod props;

pub use conversion::{ConversionEngine, convert_minor_units};
pub use error::{ConversionError, CurrencyError, RateError};
pub use exchange::{ExchangeRate, ExchangeRateProvider, FixedRateProvider};
pub use registry::{CurrencyRegistry, StaticCurrencyRegistry};
