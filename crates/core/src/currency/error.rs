//! Currency error types for registry lookup, rate sourcing, and conversion.

use thiserror::Error;
use wallet_shared::{CurrencyCode, MoneyError};

/// Errors raised by a currency registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    /// The code is malformed or not registered.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// A currency was registered with too many fractional digits.
    #[error("Currency {code} has {minor_units} minor units (max {max})")]
    InvalidMinorUnits {
        /// The offending currency.
        code: CurrencyCode,
        /// Configured precision.
        minor_units: u32,
        /// Largest supported precision.
        max: u32,
    },
}

impl From<MoneyError> for CurrencyError {
    fn from(err: MoneyError) -> Self {
        match err {
            MoneyError::InvalidCurrencyCode(code) => Self::UnknownCurrency(code),
            other => Self::UnknownCurrency(other.to_string()),
        }
    }
}

/// Errors raised by an exchange rate provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateError {
    /// No rate could be produced for the pair.
    #[error("No exchange rate available for {base} to {quote}: {reason}")]
    Unavailable {
        /// Base currency.
        base: CurrencyCode,
        /// Quote currency.
        quote: CurrencyCode,
        /// Provider-specific detail.
        reason: String,
    },

    /// The provider does not know one of the codes.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
}

impl RateError {
    /// Convenience constructor for `Unavailable`.
    pub fn unavailable(
        base: &CurrencyCode,
        quote: &CurrencyCode,
        reason: impl Into<String>,
    ) -> Self {
        Self::Unavailable {
            base: base.clone(),
            quote: quote.clone(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while converting money between currencies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// Source or target currency is not registered.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// The provider could not supply a rate.
    #[error("No exchange rate available for {from} to {to}")]
    RateUnavailable {
        /// Source currency.
        from: CurrencyCode,
        /// Target currency.
        to: CurrencyCode,
        /// Provider-specific detail, kept for logs.
        reason: String,
    },

    /// The result does not fit in the minor-unit representation.
    #[error("Conversion result out of representable range")]
    Overflow,
}

impl From<CurrencyError> for ConversionError {
    fn from(err: CurrencyError) -> Self {
        match err {
            CurrencyError::UnknownCurrency(code) => Self::UnknownCurrency(code),
            CurrencyError::InvalidMinorUnits { code, .. } => Self::UnknownCurrency(code.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::parse(s).unwrap()
    }

    #[test]
    fn test_rate_error_display() {
        let err = RateError::unavailable(&code("USD"), &code("XYZ"), "not quoted");
        assert_eq!(
            err.to_string(),
            "No exchange rate available for USD to XYZ: not quoted"
        );
    }

    #[test]
    fn test_malformed_code_becomes_unknown_currency() {
        let err: CurrencyError = CurrencyCode::parse("dollars").unwrap_err().into();
        assert_eq!(err, CurrencyError::UnknownCurrency("dollars".to_string()));
    }

    #[test]
    fn test_conversion_error_from_currency_error() {
        let err: ConversionError = CurrencyError::UnknownCurrency("ABC".to_string()).into();
        assert_eq!(err, ConversionError::UnknownCurrency("ABC".to_string()));
    }
}
