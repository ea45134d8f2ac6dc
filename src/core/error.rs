//! Errors surfaced by a single conversion.

use crate::core::cache::CacheError;
use thiserror::Error;

/// Every way a conversion can fail. The display text is meant to be shown to
/// the user as is.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// Amount was zero, negative, NaN or infinite.
    #[error("invalid amount {0}: enter an amount greater than 0")]
    InvalidAmount(f64),

    /// Transport failure or non-2xx response from the rate provider.
    #[error("failed to fetch rate: {0}")]
    Network(String),

    /// The provider answered, but not with a usable rates collection.
    #[error("failed to fetch rate: {0}")]
    Provider(String),

    /// The provider's rates did not include the requested quote currency.
    #[error("rate for {0} not found")]
    UnknownCurrency(String),

    /// A fetch was needed but no provider credential is configured.
    #[error("no API key configured: set {} or provider.api_key in the config file", crate::config::API_KEY_ENV_VAR)]
    MissingApiKey,

    #[error("failed to store rate: {0}")]
    Write(#[from] CacheError),
}
