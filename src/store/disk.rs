use crate::core::cache::{CacheEntry, CacheError, RateCache};
use crate::core::clock::Clock;
use crate::core::currency::CurrencyPair;
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

const RATES_PARTITION: &str = "rates";

/// Rate cache persisted in a fjall keyspace. Each pair is one JSON record
/// holding both the rate and its expiry.
pub struct DiskRateCache {
    keyspace: Keyspace,
    partition: PartitionHandle,
    clock: Arc<dyn Clock>,
}

impl DiskRateCache {
    pub fn open(path: &Path, clock: Arc<dyn Clock>) -> Result<Self, CacheError> {
        std::fs::create_dir_all(path)
            .map_err(|e| CacheError::Unavailable(format!("{}: {}", path.display(), e)))?;

        let keyspace = fjall::Config::new(path).open()?;
        let partition = keyspace.open_partition(RATES_PARTITION, PartitionCreateOptions::default())?;
        debug!("Opened rate cache at {}", path.display());
        Ok(Self {
            keyspace,
            partition,
            clock,
        })
    }

    fn read(&self, key: &str) -> Result<Option<CacheEntry>, CacheError> {
        match self.partition.get(key)? {
            Some(value) => Ok(Some(serde_json::from_slice(&value)?)),
            None => Ok(None),
        }
    }
}

impl RateCache for DiskRateCache {
    fn get(&self, pair: &CurrencyPair) -> Option<CacheEntry> {
        let key = pair.cache_key();
        match self.read(&key) {
            Ok(Some(entry)) => {
                debug!("Cache HIT for key: {}", key);
                Some(entry)
            }
            Ok(None) => {
                debug!("Cache MISS for key: {}", key);
                None
            }
            Err(e) => {
                debug!("DiskRateCache get error for key {}: {}", key, e);
                None
            }
        }
    }

    fn put(&self, pair: &CurrencyPair, rate: f64) -> Result<(), CacheError> {
        let key = pair.cache_key();
        let entry = CacheEntry::new(rate, self.clock.now_millis());
        self.partition
            .insert(key.as_str(), serde_json::to_vec(&entry)?)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!("Cache PUT for key: {}", key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use tempfile::tempdir;

    #[test]
    fn test_disk_cache_get_put() {
        let dir = tempdir().unwrap();
        let clock = Arc::new(ManualClock::new(1_000));
        let cache = DiskRateCache::open(dir.path(), clock).unwrap();
        let pair = CurrencyPair::new("USD", "JPY");

        assert!(cache.get(&pair).is_none());

        cache.put(&pair, 151.2).unwrap();

        let entry = cache.get(&pair).unwrap();
        assert_eq!(entry.rate, 151.2);
        assert_eq!(entry.expires_at, 1_000 + 3_600_000);
    }

    #[test]
    fn test_disk_cache_survives_reopen() {
        let dir = tempdir().unwrap();
        let pair = CurrencyPair::new("EUR", "GBP");

        {
            let clock = Arc::new(ManualClock::new(0));
            let cache = DiskRateCache::open(dir.path(), clock).unwrap();
            cache.put(&pair, 0.85).unwrap();
        }

        let clock = Arc::new(ManualClock::new(0));
        let cache = DiskRateCache::open(dir.path(), clock).unwrap();
        let entry = cache.get(&pair).unwrap();
        assert_eq!(entry.rate, 0.85);
        assert_eq!(entry.expires_at, 3_600_000);
    }

    #[test]
    fn test_corrupt_record_reads_as_miss() {
        let dir = tempdir().unwrap();
        let clock = Arc::new(ManualClock::new(0));
        let cache = DiskRateCache::open(dir.path(), clock).unwrap();
        let pair = CurrencyPair::new("USD", "RUB");

        cache.partition.insert("USD_RUB", "not json").unwrap();
        assert!(cache.get(&pair).is_none());

        // A fresh write replaces the broken record.
        cache.put(&pair, 92.5).unwrap();
        assert_eq!(cache.get(&pair).unwrap().rate, 92.5);
    }
}
