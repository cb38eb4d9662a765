//! Common types used across the application.

pub mod money;


pub use money::{CurrencyCode, MAX_MINOR_UNITS, Money, MoneyError};
