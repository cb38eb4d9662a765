//! Public wallet operations.
//!
//! `WalletService` composes the currency registry, the conversion engine and
//! the ledger into the operations the presentation layer calls:
//! `get_supported_currencies`, `deposit`, `withdraw`, `get_balance` and
//! `convert_amount`.

pub mod amount;
pub mod error;
pub mod service;

#[cfg(test)]
mod service_props;

pub use error::WalletError;
pub use service::WalletService;
