//! Ledger error types for validation and balance errors.

use thiserror::Error;
use wallet_shared::CurrencyCode;

use crate::currency::ConversionError;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Amount must be strictly positive, before and after conversion.
    #[error("Amount must be positive, got {amount} {currency}")]
    NonPositiveAmount {
        /// The rejected amount in minor units.
        amount: i64,
        /// Currency of the rejected amount.
        currency: CurrencyCode,
    },

    /// The wallet cannot be created with a negative balance.
    #[error("Opening balance cannot be negative")]
    NegativeOpeningBalance,

    // ========== Balance Errors ==========
    /// Withdrawal exceeds the current balance.
    #[error("Insufficient funds: available {available}, requested {requested}")]
    InsufficientFunds {
        /// Balance at the time of the check, in base minor units.
        available: i64,
        /// Requested withdrawal, in base minor units.
        requested: i64,
    },

    /// The new balance would leave the representable range.
    #[error("Balance out of representable range")]
    Overflow,

    // ========== Currency Errors ==========
    /// Converting to or from the base currency failed.
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount { .. } => "NON_POSITIVE_AMOUNT",
            Self::NegativeOpeningBalance => "NEGATIVE_OPENING_BALANCE",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::Overflow => "BALANCE_OVERFLOW",
            Self::Conversion(ConversionError::UnknownCurrency(_)) => "UNKNOWN_CURRENCY",
            Self::Conversion(ConversionError::RateUnavailable { .. }) => "RATE_UNAVAILABLE",
            Self::Conversion(ConversionError::Overflow) => "CONVERSION_OVERFLOW",
        }
    }
}
