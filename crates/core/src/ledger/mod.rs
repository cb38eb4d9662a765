//! Single-wallet ledger.
//!
//! This module implements the wallet's source of monetary truth:
//! - The balance, held as base-currency minor units
//! - Atomic deposit and withdraw with a non-negative invariant
//! - Balance reads in any registered currency
//! - Error types for ledger operations

pub mod balance;
pub mod error;
pub mod service;

pub use balance::WalletBalance;
pub use error::LedgerError;
pub use service::Ledger;
