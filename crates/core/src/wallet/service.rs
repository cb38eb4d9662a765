//! Wallet service: the five operations callers can invoke.
//!
//! Every request is validated in the same order: currency codes against the
//! registry, then the amount, and only then is the ledger or the conversion
//! engine touched.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{error, info, warn};
use wallet_shared::{CurrencyCode, Money, WalletConfig};

use super::amount::{display_amount, parse_amount};
use super::error::WalletError;
use crate::currency::{
    ConversionEngine, CurrencyRegistry, ExchangeRateProvider, StaticCurrencyRegistry,
};
use crate::ledger::Ledger;

/// Public API surface of the wallet engine.
pub struct WalletService {
    engine: Arc<ConversionEngine>,
    ledger: Ledger,
}

impl WalletService {
    /// Creates a wallet with a zero balance in `base_currency`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCurrency` if `base_currency` is not registered.
    pub fn new(
        registry: Arc<dyn CurrencyRegistry>,
        provider: Arc<dyn ExchangeRateProvider>,
        base_currency: &str,
    ) -> Result<Self, WalletError> {
        let base = registry.resolve(base_currency)?;
        let engine = Arc::new(ConversionEngine::new(registry, provider));
        let ledger = Ledger::new(base, Arc::clone(&engine));

        Ok(Self { engine, ledger })
    }

    /// Creates a wallet whose balance starts at `opening` units of
    /// `base_currency`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCurrency` if the base is not registered, or
    /// `InvalidAmount` if `opening` is negative or over-precise.
    pub fn with_opening_balance(
        registry: Arc<dyn CurrencyRegistry>,
        provider: Arc<dyn ExchangeRateProvider>,
        base_currency: &str,
        opening: Decimal,
    ) -> Result<Self, WalletError> {
        let base = registry.resolve(base_currency)?;
        let minor_units = registry.minor_units(&base)?;
        let opening = Money::from_decimal(opening, base, minor_units)
            .map_err(|e| WalletError::InvalidAmount(format!("opening balance: {e}")))?;

        let engine = Arc::new(ConversionEngine::new(registry, provider));
        let ledger = Ledger::with_opening_balance(&opening, Arc::clone(&engine))?;

        Ok(Self { engine, ledger })
    }

    /// Builds a wallet from the `wallet` configuration section.
    pub fn from_config(
        config: &WalletConfig,
        provider: Arc<dyn ExchangeRateProvider>,
    ) -> Result<Self, WalletError> {
        let registry = Arc::new(StaticCurrencyRegistry::from_config(config)?);
        if config.opening_balance.is_zero() {
            return Self::new(registry, provider, &config.base_currency);
        }
        Self::with_opening_balance(
            registry,
            provider,
            &config.base_currency,
            config.opening_balance,
        )
    }

    /// The currency the balance is stored in.
    #[must_use]
    pub fn base_currency(&self) -> &CurrencyCode {
        self.ledger.base_currency()
    }

    /// Lists supported currency codes in lexicographic order.
    #[must_use]
    pub fn get_supported_currencies(&self) -> Vec<CurrencyCode> {
        self.engine.registry().supported_currencies()
    }

    /// Deposits `amount` of `currency` and returns the new base balance.
    pub async fn deposit(&self, amount: f64, currency: &str) -> Result<Decimal, WalletError> {
        let money = self.parse_request(amount, currency)?;

        let balance = self
            .ledger
            .deposit(&money)
            .await
            .map_err(|e| log_failure("deposit", &money, e.into()))?;

        info!(
            currency = %money.currency,
            amount = money.amount,
            balance = balance.amount,
            "Deposit applied"
        );
        self.display(&balance)
    }

    /// Withdraws `amount` of `currency` and returns the new base balance.
    pub async fn withdraw(&self, amount: f64, currency: &str) -> Result<Decimal, WalletError> {
        let money = self.parse_request(amount, currency)?;

        let balance = self
            .ledger
            .withdraw(&money)
            .await
            .map_err(|e| log_failure("withdraw", &money, e.into()))?;

        info!(
            currency = %money.currency,
            amount = money.amount,
            balance = balance.amount,
            "Withdrawal applied"
        );
        self.display(&balance)
    }

    /// Returns the balance expressed in `currency`.
    pub async fn get_balance(&self, currency: &str) -> Result<Decimal, WalletError> {
        let code = self.engine.registry().resolve(currency)?;
        let balance = self.ledger.balance_in(&code).await.map_err(|e| {
            let err = WalletError::from(e);
            if err == WalletError::ConversionOverflow {
                error!(currency = %code, "Balance conversion overflowed");
            }
            err
        })?;
        self.display(&balance)
    }

    /// Converts `amount` from one currency to another without touching the
    /// balance.
    pub async fn convert_amount(
        &self,
        amount: f64,
        from: &str,
        to: &str,
    ) -> Result<Decimal, WalletError> {
        let source = self.parse_request(amount, from)?;
        let target = self.engine.registry().resolve(to)?;

        let converted = self
            .engine
            .convert(&source, &target)
            .await
            .map_err(|e| log_failure("convert", &source, e.into()))?;
        self.display(&converted)
    }

    fn parse_request(&self, amount: f64, currency: &str) -> Result<Money, WalletError> {
        let code = self.engine.registry().resolve(currency)?;
        let minor_units = self.engine.registry().minor_units(&code)?;
        parse_amount(amount, &code, minor_units)
    }

    fn display(&self, money: &Money) -> Result<Decimal, WalletError> {
        let minor_units = self.engine.registry().minor_units(&money.currency)?;
        display_amount(money, minor_units)
    }
}

fn log_failure(operation: &'static str, money: &Money, err: WalletError) -> WalletError {
    match &err {
        WalletError::ConversionOverflow => {
            error!(operation, currency = %money.currency, amount = money.amount, "Amount overflowed");
        }
        WalletError::RateUnavailable { from, to } => {
            warn!(operation, %from, %to, "Exchange rate unavailable");
        }
        WalletError::InsufficientFunds => {
            warn!(operation, currency = %money.currency, amount = money.amount, "Insufficient funds");
        }
        WalletError::InvalidAmount(_) | WalletError::UnknownCurrency(_) => {}
    }
    err
}
