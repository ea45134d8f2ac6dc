//! Core business logic abstractions

pub mod cache;
pub mod clock;
pub mod conversion;
pub mod currency;
pub mod error;
pub mod log;

// Re-export main types for cleaner imports
pub use cache::{CacheEntry, CacheError, RateCache};
pub use clock::{Clock, SystemClock};
pub use conversion::{ConversionResult, ConversionService};
pub use currency::{CurrencyPair, RateProvider, RateTable};
pub use error::ConversionError;
