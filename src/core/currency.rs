//! Currency pair and rate provider abstractions

use crate::core::error::ConversionError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;

/// Rates quoted against a single base currency, keyed by quote currency code.
pub type RateTable = HashMap<String, f64>;

/// Ordered `(base, quote)` pair. `USD_EUR` and `EUR_USD` are distinct pairs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyPair {
    pub base: String,
    pub quote: String,
}

impl CurrencyPair {
    /// Codes are trimmed and uppercased; no other validation is applied.
    pub fn new(base: &str, quote: &str) -> Self {
        Self {
            base: base.trim().to_uppercase(),
            quote: quote.trim().to_uppercase(),
        }
    }

    /// Storage key for this pair, e.g. `USD_EUR`.
    pub fn cache_key(&self) -> String {
        format!("{}_{}", self.base, self.quote)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.base, self.quote)
    }
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches every rate the provider quotes against `base` in a single request.
    async fn latest_rates(&self, base: &str) -> Result<RateTable, ConversionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_is_direction_sensitive() {
        let forward = CurrencyPair::new("USD", "EUR");
        let backward = CurrencyPair::new("EUR", "USD");

        assert_eq!(forward.cache_key(), "USD_EUR");
        assert_eq!(backward.cache_key(), "EUR_USD");
        assert_ne!(forward, backward);
    }

    #[test]
    fn test_codes_are_normalized() {
        let pair = CurrencyPair::new(" usd", "eur ");
        assert_eq!(pair.base, "USD");
        assert_eq!(pair.quote, "EUR");
        assert_eq!(pair.to_string(), "USD_EUR");
    }
}
