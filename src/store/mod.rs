pub mod disk;
pub mod memory;

use crate::config::AppConfig;
use crate::core::cache::RateCache;
use crate::core::clock::Clock;
use anyhow::{Context, Result};
use disk::DiskRateCache;
use memory::MemoryRateCache;
use std::sync::Arc;
use tracing::debug;

/// Opens the rate cache selected by configuration: the on-disk store under the
/// data directory when `cache.persist` is set, a process-local map otherwise.
pub fn open_rate_cache(config: &AppConfig, clock: Arc<dyn Clock>) -> Result<Arc<dyn RateCache>> {
    if !config.cache.persist {
        debug!("Using in-memory rate cache");
        return Ok(Arc::new(MemoryRateCache::with_clock(clock)));
    }

    let cache_dir = config.data_path()?.join("cache");
    let cache = DiskRateCache::open(&cache_dir, clock)
        .with_context(|| format!("Failed to open rate cache at {}", cache_dir.display()))?;
    Ok(Arc::new(cache))
}
