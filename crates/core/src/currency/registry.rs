//! Currency registry: which codes are supported and their precision.

use std::collections::BTreeMap;

use wallet_shared::types::MAX_MINOR_UNITS;
use wallet_shared::{CurrencyCode, WalletConfig};

use super::error::CurrencyError;

/// Lookup table of supported currencies.
///
/// Implementations are read-only after construction and shared across
/// concurrent requests.
pub trait CurrencyRegistry: Send + Sync {
    /// Returns every supported code in lexicographic order.
    fn supported_currencies(&self) -> Vec<CurrencyCode>;

    /// Returns the number of fractional digits for `code`.
    fn minor_units(&self, code: &CurrencyCode) -> Result<u32, CurrencyError>;

    /// Parses `raw` and checks that it is registered.
    fn resolve(&self, raw: &str) -> Result<CurrencyCode, CurrencyError> {
        let code = CurrencyCode::parse(raw)?;
        self.minor_units(&code)?;
        Ok(code)
    }
}

/// In-memory registry backed by an ordered map.
#[derive(Debug, Clone, Default)]
pub struct StaticCurrencyRegistry {
    currencies: BTreeMap<CurrencyCode, u32>,
}

impl StaticCurrencyRegistry {
    /// Builds a registry from `(code, minor_units)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyError` if a code is malformed or a precision exceeds
    /// `MAX_MINOR_UNITS`. A repeated code keeps its last precision.
    pub fn new<'a, I>(entries: I) -> Result<Self, CurrencyError>
    where
        I: IntoIterator<Item = (&'a str, u32)>,
    {
        let mut currencies = BTreeMap::new();
        for (raw, minor_units) in entries {
            let code = CurrencyCode::parse(raw)?;
            if minor_units > MAX_MINOR_UNITS {
                return Err(CurrencyError::InvalidMinorUnits {
                    code,
                    minor_units,
                    max: MAX_MINOR_UNITS,
                });
            }
            currencies.insert(code, minor_units);
        }
        Ok(Self { currencies })
    }

    /// Builds a registry from the `wallet.currencies` section.
    pub fn from_config(config: &WalletConfig) -> Result<Self, CurrencyError> {
        Self::new(
            config
                .currencies
                .iter()
                .map(|c| (c.code.as_str(), c.minor_units)),
        )
    }

    /// Number of registered currencies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }
}

impl CurrencyRegistry for StaticCurrencyRegistry {
    fn supported_currencies(&self) -> Vec<CurrencyCode> {
        self.currencies.keys().cloned().collect()
    }

    fn minor_units(&self, code: &CurrencyCode) -> Result<u32, CurrencyError> {
        self.currencies
            .get(code)
            .copied()
            .ok_or_else(|| CurrencyError::UnknownCurrency(code.to_string()))
    }
}
