use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::core::currency::{RateProvider, RateTable};
use crate::core::error::ConversionError;

const UNKNOWN_API_ERROR: &str = "unknown API error";

/// Client for freecurrencyapi-style `/v1/latest` endpoints.
pub struct FreeCurrencyProvider {
    base_url: String,
    api_key: Option<String>,
}

impl FreeCurrencyProvider {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        FreeCurrencyProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: Some(api_key.to_string()),
        }
    }

    /// A provider with no credential. Every fetch fails with `MissingApiKey`,
    /// so only cache hits can succeed.
    pub fn without_key(base_url: &str) -> Self {
        FreeCurrencyProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LatestResponse {
    data: Option<HashMap<String, f64>>,
    message: Option<String>,
}

#[async_trait]
impl RateProvider for FreeCurrencyProvider {
    #[instrument(name = "LatestRatesFetch", skip(self), fields(base = %base))]
    async fn latest_rates(&self, base: &str) -> Result<RateTable, ConversionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ConversionError::MissingApiKey)?;

        let endpoint = format!("{}/v1/latest", self.base_url);
        let url = Url::parse_with_params(&endpoint, &[("apikey", api_key), ("base_currency", base)])
            .map_err(|e| ConversionError::Network(format!("invalid provider URL {endpoint}: {e}")))?;
        debug!("Requesting latest rates from {}", endpoint);

        let client = reqwest::Client::builder()
            .user_agent("xconv/0.1")
            .build()
            .map_err(|e| ConversionError::Network(e.to_string()))?;

        let response = client
            .get(url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| ConversionError::Network(format!("request error: {}", e.without_url())))?;

        if !response.status().is_success() {
            return Err(ConversionError::Network(format!(
                "HTTP error! status: {}",
                response.status()
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ConversionError::Network(format!("failed to read response: {e}")))?;

        let body: LatestResponse = serde_json::from_str(&text).map_err(|e| {
            debug!("Failed to parse rates response for {}: {}", base, e);
            ConversionError::Provider(UNKNOWN_API_ERROR.to_string())
        })?;

        match body.data {
            Some(rates) => {
                debug!(count = rates.len(), "Received rates");
                Ok(rates)
            }
            None => Err(ConversionError::Provider(
                body.message
                    .unwrap_or_else(|| UNKNOWN_API_ERROR.to_string()),
            )),
        }
    }
}
