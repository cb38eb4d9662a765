//! Ledger service: deposits, withdrawals, and balance reads.
//!
//! Conversion into the base currency happens before the commit loop, so a
//! slow rate lookup never holds up other writers. The non-negative check runs
//! inside the commit against the value actually being replaced.

use std::sync::Arc;

use tracing::debug;
use wallet_shared::{CurrencyCode, Money};

use super::balance::WalletBalance;
use super::error::LedgerError;
use crate::currency::ConversionEngine;

/// Single-wallet ledger denominated in a fixed base currency.
pub struct Ledger {
    balance: WalletBalance,
    engine: Arc<ConversionEngine>,
}

impl Ledger {
    /// Creates a ledger with a zero balance in `base_currency`.
    pub fn new(base_currency: CurrencyCode, engine: Arc<ConversionEngine>) -> Self {
        Self {
            balance: WalletBalance::zero(base_currency),
            engine,
        }
    }

    /// Creates a ledger starting at `opening`, whose currency becomes the base.
    ///
    /// # Errors
    ///
    /// Returns `NegativeOpeningBalance` if `opening` is negative.
    pub fn with_opening_balance(
        opening: &Money,
        engine: Arc<ConversionEngine>,
    ) -> Result<Self, LedgerError> {
        Ok(Self {
            balance: WalletBalance::new(opening.currency.clone(), opening.amount)?,
            engine,
        })
    }

    /// The currency the balance is stored in.
    #[must_use]
    pub fn base_currency(&self) -> &CurrencyCode {
        self.balance.currency()
    }

    /// Current balance in the base currency.
    #[must_use]
    pub fn balance(&self) -> Money {
        self.balance.snapshot()
    }

    /// Current balance expressed in `currency`. Never mutates state.
    pub async fn balance_in(&self, currency: &CurrencyCode) -> Result<Money, LedgerError> {
        let snapshot = self.balance.snapshot();
        Ok(self.engine.convert(&snapshot, currency).await?)
    }

    /// Adds `amount` to the balance and returns the new base balance.
    ///
    /// # Errors
    ///
    /// - `NonPositiveAmount` if `amount` is not positive before or after
    ///   conversion
    /// - `Conversion` if converting to the base currency fails
    /// - `Overflow` if the new balance is not representable
    pub async fn deposit(&self, amount: &Money) -> Result<Money, LedgerError> {
        let base = self.to_base(amount).await?;
        let new_balance = self.balance.credit(base.amount)?;
        debug!(delta = base.amount, balance = new_balance, "Ledger credited");
        Ok(Money::new(new_balance, self.base_currency().clone()))
    }

    /// Removes `amount` from the balance and returns the new base balance.
    ///
    /// # Errors
    ///
    /// Same as [`deposit`](Self::deposit), plus `InsufficientFunds` if the
    /// balance would go negative. A failed call leaves the balance unchanged.
    pub async fn withdraw(&self, amount: &Money) -> Result<Money, LedgerError> {
        let base = self.to_base(amount).await?;
        let new_balance = self.balance.debit(base.amount)?;
        debug!(delta = base.amount, balance = new_balance, "Ledger debited");
        Ok(Money::new(new_balance, self.base_currency().clone()))
    }

    async fn to_base(&self, amount: &Money) -> Result<Money, LedgerError> {
        ensure_positive(amount)?;
        let base = self.engine.convert(amount, self.base_currency()).await?;
        // A tiny foreign amount can round to zero base units.
        ensure_positive(&base)?;
        Ok(base)
    }
}

fn ensure_positive(money: &Money) -> Result<(), LedgerError> {
    if money.is_positive() {
        Ok(())
    } else {
        Err(LedgerError::NonPositiveAmount {
            amount: money.amount,
            currency: money.currency.clone(),
        })
    }
}
