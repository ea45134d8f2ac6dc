use crate::core::cache::{CacheEntry, CacheError, RateCache};
use crate::core::clock::{Clock, SystemClock};
use crate::core::currency::CurrencyPair;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// In-memory rate cache using HashMap and RwLock. Lives as long as the process.
pub struct MemoryRateCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    clock: Arc<dyn Clock>,
}

impl MemoryRateCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }
}

impl Default for MemoryRateCache {
    fn default() -> Self {
        Self::new()
    }
}

impl RateCache for MemoryRateCache {
    fn get(&self, pair: &CurrencyPair) -> Option<CacheEntry> {
        let key = pair.cache_key();
        let entries = match self.entries.read() {
            Ok(entries) => entries,
            Err(e) => {
                debug!("MemoryRateCache get error: {}", e);
                return None;
            }
        };
        let entry = entries.get(&key).copied();
        if entry.is_some() {
            debug!("Cache HIT for key: {}", key);
        } else {
            debug!("Cache MISS for key: {}", key);
        }
        entry
    }

    fn put(&self, pair: &CurrencyPair, rate: f64) -> Result<(), CacheError> {
        let key = pair.cache_key();
        let entry = CacheEntry::new(rate, self.clock.now_millis());
        let mut entries = self
            .entries
            .write()
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;
        debug!("Cache PUT for key: {}", key);
        entries.insert(key, entry);
        Ok(())
    }
}
