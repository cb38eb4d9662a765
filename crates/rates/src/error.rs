//! Rate feed errors.

use thiserror::Error;

/// Failure to obtain a rate table from the feed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, timeout, or body decoding failure.
    #[error("rate feed request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The feed answered with a non-success status.
    #[error("rate feed returned HTTP {0}")]
    Status(u16),

    /// The feed returned a table for a different base currency.
    #[error("rate feed answered for {actual}, expected {expected}")]
    BaseMismatch {
        /// Base that was requested.
        expected: String,
        /// Base the feed reported.
        actual: String,
    },
}

impl FetchError {
    /// Returns true if the request timed out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}
