//! Property-based tests for currency conversion.
//!
//! - Identity conversion is exact
//! - A->B->A round trips stay within one minor unit
//! - Rounding is deterministic and sign-preserving

use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal::Decimal;
use wallet_shared::{CurrencyCode, Money};

use super::conversion::{ConversionEngine, convert_minor_units};
use super::exchange::FixedRateProvider;
use super::registry::StaticCurrencyRegistry;

/// Strategy to generate positive minor-unit amounts (0.01 to 10,000,000.00).
fn positive_amount() -> impl Strategy<Value = i64> {
    1i64..1_000_000_000i64
}

/// Strategy to generate rates of at least 1 (1.0000 to 9999.9999).
fn rate_at_least_one() -> impl Strategy<Value = Decimal> {
    (10_000i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Strategy to generate any positive rate (0.0001 to 9999.9999).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Strategy to pick a registered currency.
fn currency_code() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("USD"), Just("EUR"), Just("JPY"), Just("BHD")]
}

fn engine() -> ConversionEngine {
    let registry =
        StaticCurrencyRegistry::new([("USD", 2), ("EUR", 2), ("JPY", 0), ("BHD", 3)]).unwrap();
    ConversionEngine::new(Arc::new(registry), Arc::new(FixedRateProvider::new()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Converting into the same currency returns the exact input.
    #[test]
    fn prop_identity_conversion_is_exact(
        amount in any::<i64>(),
        currency in currency_code(),
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let code = CurrencyCode::parse(currency).unwrap();
        let money = Money::new(amount, code.clone());

        // The provider is empty: any lookup would fail the conversion.
        let converted = runtime.block_on(engine().convert(&money, &code)).unwrap();
        prop_assert_eq!(converted, money);
    }

    /// A->B->A differs from the original by at most one minor unit when B is
    /// at least as fine-grained as A and the return rate is the inverse.
    #[test]
    fn prop_round_trip_within_one_minor_unit(
        amount in positive_amount(),
        rate in rate_at_least_one(),
    ) {
        let inverse = Decimal::ONE / rate;
        let there = convert_minor_units(amount, rate, 2, 2).unwrap();
        let back = convert_minor_units(there, inverse, 2, 2).unwrap();
        prop_assert!(
            (back - amount).abs() <= 1,
            "{} -> {} -> {} drifted more than one minor unit",
            amount, there, back
        );
    }

    /// Conversion is deterministic.
    #[test]
    fn prop_conversion_is_deterministic(
        amount in positive_amount(),
        rate in positive_rate(),
    ) {
        let first = convert_minor_units(amount, rate, 2, 0);
        let second = convert_minor_units(amount, rate, 2, 0);
        prop_assert_eq!(first, second);
    }

    /// The result never differs from the exact product by more than half a
    /// minor unit, and is never negative for positive input.
    #[test]
    fn prop_rounding_error_at_most_half_unit(
        amount in positive_amount(),
        rate in positive_rate(),
    ) {
        let converted = convert_minor_units(amount, rate, 2, 3).unwrap();
        let exact = Decimal::new(amount, 2) * rate * Decimal::from(1000);
        let error = (Decimal::from(converted) - exact).abs();
        prop_assert!(converted >= 0);
        prop_assert!(error <= Decimal::new(5, 1), "error {} for {} * {}", error, amount, rate);
    }
}
