//! Caller-facing wallet errors.
//!
//! Every internal error is folded into one of five kinds. Messages name the
//! currencies involved but never raw minor-unit arithmetic state.

use thiserror::Error;
use wallet_shared::AppError;

use crate::currency::{ConversionError, CurrencyError};
use crate::ledger::LedgerError;

/// Errors returned by the wallet's public operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// Amount is not a positive, finite number within the currency's precision.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Currency code is malformed or not registered.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Withdrawal exceeds the balance.
    #[error("Insufficient funds")]
    InsufficientFunds,

    /// The exchange rate source could not supply a rate.
    #[error("Exchange rate unavailable for {from} to {to}")]
    RateUnavailable {
        /// Source currency.
        from: String,
        /// Target currency.
        to: String,
    },

    /// The result does not fit in the representable range.
    #[error("Amount out of representable range")]
    ConversionOverflow,
}

impl WalletError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::UnknownCurrency(_) => "UNKNOWN_CURRENCY",
            Self::InsufficientFunds => "INSUFFICIENT_FUNDS",
            Self::RateUnavailable { .. } => "RATE_UNAVAILABLE",
            Self::ConversionOverflow => "CONVERSION_OVERFLOW",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - caller errors
            Self::InvalidAmount(_) | Self::UnknownCurrency(_) => 400,
            // 422 Unprocessable - business rule
            Self::InsufficientFunds => 422,
            // 503 Service Unavailable - rate source
            Self::RateUnavailable { .. } => 503,
            // 500 Internal Server Error
            Self::ConversionOverflow => 500,
        }
    }

    /// Returns true if retrying the same request may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateUnavailable { .. })
    }
}

impl From<CurrencyError> for WalletError {
    fn from(err: CurrencyError) -> Self {
        match err {
            CurrencyError::UnknownCurrency(code) => Self::UnknownCurrency(code),
            CurrencyError::InvalidMinorUnits { code, .. } => Self::UnknownCurrency(code.to_string()),
        }
    }
}

impl From<ConversionError> for WalletError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::UnknownCurrency(code) => Self::UnknownCurrency(code),
            ConversionError::RateUnavailable { from, to, .. } => Self::RateUnavailable {
                from: from.to_string(),
                to: to.to_string(),
            },
            ConversionError::Overflow => Self::ConversionOverflow,
        }
    }
}

impl From<LedgerError> for WalletError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NonPositiveAmount { currency, .. } => Self::InvalidAmount(format!(
                "amount must be greater than zero once converted from {currency}"
            )),
            LedgerError::NegativeOpeningBalance => {
                Self::InvalidAmount("opening balance cannot be negative".to_string())
            }
            LedgerError::InsufficientFunds { .. } => Self::InsufficientFunds,
            LedgerError::Overflow => Self::ConversionOverflow,
            LedgerError::Conversion(inner) => inner.into(),
        }
    }
}

impl From<WalletError> for AppError {
    fn from(err: WalletError) -> Self {
        let message = err.to_string();
        match err {
            WalletError::InvalidAmount(_) | WalletError::UnknownCurrency(_) => {
                Self::Validation(message)
            }
            WalletError::InsufficientFunds => Self::BusinessRule(message),
            WalletError::RateUnavailable { .. } => Self::ExternalService(message),
            WalletError::ConversionOverflow => Self::Internal(message),
        }
    }
}
