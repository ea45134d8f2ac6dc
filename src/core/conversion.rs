//! Amount conversion backed by the rate cache.

use crate::core::cache::RateCache;
use crate::core::clock::Clock;
use crate::core::currency::{CurrencyPair, RateProvider};
use crate::core::error::ConversionError;
use std::sync::Arc;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionResult {
    /// `amount * rate`, unrounded.
    pub converted_amount: f64,
    pub rate: f64,
    pub served_from_cache: bool,
}

/// Converts amounts between currencies, fetching a rate only when the cache has
/// no valid entry for the pair.
pub struct ConversionService<P: RateProvider> {
    provider: P,
    cache: Arc<dyn RateCache>,
    clock: Arc<dyn Clock>,
}

impl<P: RateProvider> ConversionService<P> {
    pub fn new(provider: P, cache: Arc<dyn RateCache>, clock: Arc<dyn Clock>) -> Self {
        Self {
            provider,
            cache,
            clock,
        }
    }

    /// Converts `amount` of `from` into `to`.
    ///
    /// A valid cached rate is used without touching the network. Otherwise the
    /// provider is asked once for every rate based on `from`, the rate for `to`
    /// is cached for an hour and used for the result. Failed fetches are never
    /// retried and never cached.
    #[instrument(name = "Convert", skip(self))]
    pub async fn convert(
        &self,
        amount: f64,
        from: &str,
        to: &str,
    ) -> Result<ConversionResult, ConversionError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ConversionError::InvalidAmount(amount));
        }

        let pair = CurrencyPair::new(from, to);
        let now = self.clock.now_millis();
        let entry = self.cache.get(&pair);

        if let Some(entry) = entry.filter(|e| self.cache.is_valid(Some(e), now)) {
            debug!(%pair, rate = entry.rate, "Serving rate from cache");
            return Ok(ConversionResult {
                converted_amount: amount * entry.rate,
                rate: entry.rate,
                served_from_cache: true,
            });
        }
        if entry.is_some() {
            debug!(%pair, "Cached rate expired");
        }

        let rates = self.provider.latest_rates(&pair.base).await?;
        // A zero rate is as useless as a missing one.
        let rate = rates
            .get(&pair.quote)
            .copied()
            .filter(|r| r.is_finite() && *r > 0.0)
            .ok_or_else(|| ConversionError::UnknownCurrency(pair.quote.clone()))?;

        self.cache.put(&pair, rate)?;
        debug!(%pair, rate, "Cached fresh rate");

        Ok(ConversionResult {
            converted_amount: amount * rate,
            rate,
            served_from_cache: false,
        })
    }
}
