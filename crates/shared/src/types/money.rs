//! Money type with integer minor units and a validated currency code.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are stored as `i64` counts of the currency's smallest unit
//! (cents for USD, yen for JPY). `Decimal` only appears when a value
//! crosses the display boundary.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest supported number of fractional digits for a currency.
///
/// `10^18` is the largest power of ten that fits in an `i64`.
pub const MAX_MINOR_UNITS: u32 = 18;

/// Errors produced by money arithmetic and boundary conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// The currency code is not three ASCII letters.
    #[error("Invalid currency code: {0:?}")]
    InvalidCurrencyCode(String),

    /// Two values in different currencies were combined.
    #[error("Currency mismatch: {left} vs {right}")]
    CurrencyMismatch {
        /// Currency of the left operand.
        left: CurrencyCode,
        /// Currency of the right operand.
        right: CurrencyCode,
    },

    /// The value has more fractional digits than the currency supports.
    #[error("Amount {amount} has more than {minor_units} fractional digits")]
    ExcessPrecision {
        /// The rejected amount.
        amount: Decimal,
        /// Fractional digits supported by the currency.
        minor_units: u32,
    },

    /// The value does not fit in the minor-unit representation.
    #[error("Amount out of representable range")]
    Overflow,
}

/// ISO 4217-style currency code: exactly three ASCII letters, upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parses and normalizes a currency code (`"usd"` becomes `"USD"`).
    pub fn parse(value: &str) -> Result<Self, MoneyError> {
        let trimmed = value.trim();
        if trimmed.len() == 3 && trimmed.bytes().all(|b| b.is_ascii_alphabetic()) {
            Ok(Self(trimmed.to_ascii_uppercase()))
        } else {
            Err(MoneyError::InvalidCurrencyCode(value.to_string()))
        }
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = MoneyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

/// Represents a monetary amount with currency.
///
/// `amount` is expressed in the currency's minor units. Negative values are
/// valid as intermediate results only; the ledger never stores one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    /// The amount in the smallest currency unit (e.g., cents).
    pub amount: i64,
    /// Currency code (e.g., "USD", "JPY").
    pub currency: CurrencyCode,
}

impl Money {
    /// Creates a new Money instance.
    #[must_use]
    pub const fn new(amount: i64, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub const fn zero(currency: CurrencyCode) -> Self {
        Self {
            amount: 0,
            currency,
        }
    }

    /// Builds a value from a display decimal, e.g. `12.34` USD becomes 1234.
    ///
    /// Excess precision is rejected, never truncated.
    pub fn from_decimal(
        value: Decimal,
        currency: CurrencyCode,
        minor_units: u32,
    ) -> Result<Self, MoneyError> {
        if minor_units > MAX_MINOR_UNITS {
            return Err(MoneyError::Overflow);
        }

        let normalized = value.normalize();
        if normalized.scale() > minor_units {
            return Err(MoneyError::ExcessPrecision {
                amount: value,
                minor_units,
            });
        }

        let amount = normalized
            .checked_mul(Decimal::from(10_i64.pow(minor_units)))
            .and_then(|scaled| i64::try_from(scaled).ok())
            .ok_or(MoneyError::Overflow)?;

        Ok(Self { amount, currency })
    }

    /// Renders the amount as a display decimal with `minor_units` places.
    pub fn to_decimal(&self, minor_units: u32) -> Result<Decimal, MoneyError> {
        Decimal::try_new(self.amount, minor_units).map_err(|_| MoneyError::Overflow)
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.amount < 0
    }

    /// Returns true if the amount is strictly positive.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.amount > 0
    }

    /// Adds two values of the same currency.
    pub fn checked_add(&self, other: &Self) -> Result<Self, MoneyError> {
        self.ensure_same_currency(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::new(amount, self.currency.clone()))
    }

    /// Subtracts `other` from `self`. The result may be negative.
    pub fn checked_sub(&self, other: &Self) -> Result<Self, MoneyError> {
        self.ensure_same_currency(other)?;
        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::new(amount, self.currency.clone()))
    }

    fn ensure_same_currency(&self, other: &Self) -> Result<(), MoneyError> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(MoneyError::CurrencyMismatch {
                left: self.currency.clone(),
                right: other.currency.clone(),
            })
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}
