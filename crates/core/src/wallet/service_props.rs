//! Property-based tests for `WalletService`.
//!
//! - The balance never goes negative under any operation sequence
//! - Rejected operations leave the balance unchanged
//! - Converting into the same currency returns the input

use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::WalletError;
use super::service::WalletService;
use crate::currency::{FixedRateProvider, StaticCurrencyRegistry};

#[derive(Debug, Clone)]
enum Op {
    Deposit(i64, &'static str),
    Withdraw(i64, &'static str),
}

/// Whole amounts so every value is exact in both USD and JPY.
fn op() -> impl Strategy<Value = Op> {
    let currency = prop_oneof![Just("USD"), Just("EUR"), Just("JPY")];
    prop_oneof![
        (1i64..10_000, currency.clone()).prop_map(|(a, c)| Op::Deposit(a, c)),
        (1i64..10_000, currency).prop_map(|(a, c)| Op::Withdraw(a, c)),
    ]
}

fn wallet() -> WalletService {
    let registry = StaticCurrencyRegistry::new([("USD", 2), ("EUR", 2), ("JPY", 0)]).unwrap();
    let provider = FixedRateProvider::new()
        .with_rate("EUR", "USD", dec!(1.0837))
        .unwrap()
        .with_rate("JPY", "USD", dec!(0.0067))
        .unwrap();
    WalletService::new(Arc::new(registry), Arc::new(provider), "USD").unwrap()
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread().build().unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_balance_never_negative(ops in prop::collection::vec(op(), 1..40)) {
        let runtime = runtime();
        let wallet = wallet();

        for op in ops {
            let before = runtime.block_on(wallet.get_balance("USD")).unwrap();
            let result = match op {
                Op::Deposit(amount, currency) => {
                    runtime.block_on(wallet.deposit(amount as f64, currency))
                }
                Op::Withdraw(amount, currency) => {
                    runtime.block_on(wallet.withdraw(amount as f64, currency))
                }
            };
            let after = runtime.block_on(wallet.get_balance("USD")).unwrap();

            prop_assert!(after >= Decimal::ZERO);
            match result {
                Ok(balance) => prop_assert_eq!(balance, after),
                Err(err) => {
                    prop_assert_eq!(err, WalletError::InsufficientFunds);
                    prop_assert_eq!(before, after);
                }
            }
        }
    }

    #[test]
    fn prop_identity_conversion_returns_input(
        cents in 1i64..1_000_000_000,
        currency in prop_oneof![Just("USD"), Just("EUR")],
    ) {
        let runtime = runtime();
        let wallet = wallet();
        let amount = Decimal::new(cents, 2);
        let value: f64 = amount.to_string().parse().unwrap();

        let converted = runtime
            .block_on(wallet.convert_amount(value, currency, currency))
            .unwrap();
        prop_assert_eq!(converted, amount);
    }

    #[test]
    fn prop_convert_never_changes_balance(whole in 1i64..1_000_000) {
        let runtime = runtime();
        let wallet = wallet();
        runtime.block_on(wallet.deposit(250.0, "USD")).unwrap();

        runtime
            .block_on(wallet.convert_amount(whole as f64, "JPY", "USD"))
            .unwrap();
        prop_assert_eq!(runtime.block_on(wallet.get_balance("USD")).unwrap(), dec!(250.00));
    }
}
