//! Rate cache contract shared by the in-memory and on-disk stores.

use crate::core::currency::CurrencyPair;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How long a fetched rate stays valid: one hour.
pub const RATE_TTL_MILLIS: i64 = 3_600_000;

/// A cached rate together with its absolute expiry. Stored as one record so the
/// rate and its expiry can never be observed out of step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub rate: f64,
    /// Epoch milliseconds.
    pub expires_at: i64,
}

impl CacheEntry {
    /// Entry for a rate written at `now`.
    pub fn new(rate: f64, now: i64) -> Self {
        Self {
            rate,
            expires_at: now + RATE_TTL_MILLIS,
        }
    }

    pub fn is_valid_at(&self, now: i64) -> bool {
        now < self.expires_at
    }
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("storage error: {0}")]
    Storage(#[from] fjall::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("cache store unavailable: {0}")]
    Unavailable(String),
}

/// Key-value store of the latest fetched rate per currency pair.
///
/// Entries are never evicted; an expired entry stays in storage until a fresh
/// write for the same pair replaces it. Validity is decided at read time.
pub trait RateCache: Send + Sync {
    /// Returns the stored entry for `pair`, expired or not. `None` when nothing
    /// was ever written for it.
    fn get(&self, pair: &CurrencyPair) -> Option<CacheEntry>;

    /// Stores `rate` for `pair`, expiring one hour from now. Overwrites any
    /// previous entry.
    fn put(&self, pair: &CurrencyPair, rate: f64) -> Result<(), CacheError>;

    fn is_valid(&self, entry: Option<&CacheEntry>, now: i64) -> bool {
        is_valid(entry, now)
    }
}

pub fn is_valid(entry: Option<&CacheEntry>, now: i64) -> bool {
    entry.is_some_and(|e| e.is_valid_at(now))
}
