//! Conversion between caller-facing decimal numbers and minor units.
//!
//! This is the only place floating-point values touch the engine: they are
//! turned into `Decimal` and then into integer minor units immediately.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use wallet_shared::{CurrencyCode, Money, MoneyError};

use super::error::WalletError;

/// Parses a caller-supplied amount into minor units of `currency`.
///
/// # Errors
///
/// Returns `InvalidAmount` if `value` is NaN, infinite, zero, negative, out
/// of range, or has more fractional digits than `minor_units`.
pub fn parse_amount(
    value: f64,
    currency: &CurrencyCode,
    minor_units: u32,
) -> Result<Money, WalletError> {
    if !value.is_finite() {
        return Err(WalletError::InvalidAmount(format!(
            "{value} is not a finite number"
        )));
    }

    let decimal = Decimal::from_f64(value)
        .ok_or_else(|| WalletError::InvalidAmount(format!("{value} is out of range")))?;
    if decimal <= Decimal::ZERO {
        return Err(WalletError::InvalidAmount(format!(
            "{value} must be greater than zero"
        )));
    }

    Money::from_decimal(decimal, currency.clone(), minor_units).map_err(|e| match e {
        MoneyError::ExcessPrecision { .. } => WalletError::InvalidAmount(format!(
            "{decimal} has more than {minor_units} decimal places for {currency}"
        )),
        _ => WalletError::InvalidAmount(format!("{decimal} is out of range")),
    })
}

/// Renders minor units as a decimal with the currency's precision.
pub fn display_amount(money: &Money, minor_units: u32) -> Result<Decimal, WalletError> {
    money
        .to_decimal(minor_units)
        .map_err(|_| WalletError::ConversionOverflow)
}
