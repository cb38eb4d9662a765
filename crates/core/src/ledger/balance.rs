//! The wallet balance and its atomic commit loop.
//!
//! The balance is a single `AtomicI64` of base-currency minor units.
//! Mutations run as a compare-and-swap retry loop: the invariant check and
//! the write always see the same value, so no interleaving can lose an update
//! or drive the balance below zero. Reads are a single atomic load.

use std::sync::atomic::{AtomicI64, Ordering};

use wallet_shared::{CurrencyCode, Money};

use super::error::LedgerError;

/// The wallet's only mutable state.
#[derive(Debug)]
pub struct WalletBalance {
    currency: CurrencyCode,
    amount: AtomicI64,
}

impl WalletBalance {
    /// Creates a balance of `opening` minor units in `currency`.
    ///
    /// # Errors
    ///
    /// Returns `NegativeOpeningBalance` if `opening < 0`.
    pub fn new(currency: CurrencyCode, opening: i64) -> Result<Self, LedgerError> {
        if opening < 0 {
            return Err(LedgerError::NegativeOpeningBalance);
        }
        Ok(Self {
            currency,
            amount: AtomicI64::new(opening),
        })
    }

    /// Creates an empty balance in `currency`.
    #[must_use]
    pub const fn zero(currency: CurrencyCode) -> Self {
        Self {
            currency,
            amount: AtomicI64::new(0),
        }
    }

    /// The base currency.
    #[must_use]
    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    /// Consistent snapshot of the current balance.
    #[must_use]
    pub fn snapshot(&self) -> Money {
        Money::new(self.amount.load(Ordering::Acquire), self.currency.clone())
    }

    /// Adds `delta` minor units and returns the new balance.
    pub fn credit(&self, delta: i64) -> Result<i64, LedgerError> {
        self.commit(|current| {
            self.base(current)
                .checked_add(&self.base(delta))
                .map(|next| next.amount)
                .map_err(|_| LedgerError::Overflow)
        })
    }

    /// Subtracts `delta` minor units and returns the new balance.
    ///
    /// Fails with `InsufficientFunds` if the result would be negative.
    pub fn debit(&self, delta: i64) -> Result<i64, LedgerError> {
        self.commit(|current| {
            let next = self
                .base(current)
                .checked_sub(&self.base(delta))
                .map_err(|_| LedgerError::Overflow)?;
            if next.is_negative() {
                return Err(LedgerError::InsufficientFunds {
                    available: current,
                    requested: delta,
                });
            }
            Ok(next.amount)
        })
    }

    /// `amount` minor units of the base currency. Both operands of a step
    /// share this currency, so only overflow can fail.
    fn base(&self, amount: i64) -> Money {
        Money::new(amount, self.currency.clone())
    }

    /// Applies `step` to the current value until the swap succeeds.
    ///
    /// A rejected step leaves the stored value untouched.
    fn commit<F>(&self, step: F) -> Result<i64, LedgerError>
    where
        F: Fn(i64) -> Result<i64, LedgerError>,
    {
        let mut current = self.amount.load(Ordering::Acquire);
        loop {
            let next = step(current)?;
            match self
                .amount
                .compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return Ok(next),
                Err(actual) => current = actual,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::thread;

    fn usd() -> CurrencyCode {
        CurrencyCode::parse("USD").unwrap()
    }

    #[test]
    fn test_new_rejects_negative_opening() {
        assert_eq!(
            WalletBalance::new(usd(), -1).unwrap_err(),
            LedgerError::NegativeOpeningBalance
        );
        assert_eq!(WalletBalance::new(usd(), 0).unwrap().snapshot().amount, 0);
    }

    #[test]
    fn test_credit_and_debit() {
        let balance = WalletBalance::new(usd(), 0).unwrap();
        assert_eq!(balance.credit(10_000).unwrap(), 10_000);
        assert_eq!(balance.debit(2_500).unwrap(), 7_500);
        assert_eq!(balance.snapshot(), Money::new(7_500, usd()));
    }

    #[test]
    fn test_debit_to_exactly_zero() {
        let balance = WalletBalance::new(usd(), 500).unwrap();
        assert_eq!(balance.debit(500).unwrap(), 0);
    }

    #[test]
    fn test_insufficient_funds_leaves_balance() {
        let balance = WalletBalance::new(usd(), 10_000).unwrap();
        let err = balance.debit(15_000).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientFunds {
                available: 10_000,
                requested: 15_000
            }
        );
        assert_eq!(balance.snapshot().amount, 10_000);
    }

    #[test]
    fn test_overflow_leaves_balance() {
        let balance = WalletBalance::new(usd(), i64::MAX - 1).unwrap();
        assert_eq!(balance.credit(2).unwrap_err(), LedgerError::Overflow);
        assert_eq!(balance.snapshot().amount, i64::MAX - 1);
    }

    #[test]
    fn test_debit_overflow_leaves_balance() {
        let balance = WalletBalance::new(usd(), 0).unwrap();
        assert_eq!(balance.debit(i64::MIN).unwrap_err(), LedgerError::Overflow);
        assert_eq!(balance.snapshot().amount, 0);
    }

    #[test]
    fn test_zero_balance_is_empty() {
        let balance = WalletBalance::zero(usd());
        assert_eq!(balance.snapshot(), Money::zero(usd()));
        assert_eq!(balance.currency(), &usd());
    }

    #[test]
    fn test_concurrent_credits_are_not_lost() {
        let balance = WalletBalance::new(usd(), 0).unwrap();

        thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..1_000 {
                        balance.credit(7).unwrap();
                    }
                });
            }
        });

        assert_eq!(balance.snapshot().amount, 8 * 1_000 * 7);
    }

    #[test]
    fn test_concurrent_debits_never_overdraw() {
        let balance = WalletBalance::new(usd(), 1_000).unwrap();

        let succeeded: usize = thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    s.spawn(|| (0..500).filter(|_| balance.debit(1).is_ok()).count())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).sum()
        });

        assert_eq!(succeeded, 1_000);
        assert_eq!(balance.snapshot().amount, 0);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Credit(i64),
        Debit(i64),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (1i64..1_000_000i64).prop_map(Op::Credit),
            (1i64..1_000_000i64).prop_map(Op::Debit),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// For any sequence of operations the balance stays non-negative and
        /// matches a model that rejects overdrafts.
        #[test]
        fn prop_balance_never_negative(ops in prop::collection::vec(op_strategy(), 1..100)) {
            let balance = WalletBalance::new(usd(), 0).unwrap();
            let mut model = 0i64;

            for op in ops {
                let before = balance.snapshot().amount;
                match op {
                    Op::Credit(amount) => {
                        balance.credit(amount).unwrap();
                        model += amount;
                    }
                    Op::Debit(amount) => {
                        if amount <= model {
                            balance.debit(amount).unwrap();
                            model -= amount;
                        } else {
                            let is_insufficient = matches!(
                                balance.debit(amount),
                                Err(LedgerError::InsufficientFunds { .. })
                            );
                            prop_assert!(is_insufficient);
                            prop_assert_eq!(balance.snapshot().amount, before);
                        }
                    }
                }
                prop_assert!(balance.snapshot().amount >= 0);
                prop_assert_eq!(balance.snapshot().amount, model);
            }
        }
    }
}
