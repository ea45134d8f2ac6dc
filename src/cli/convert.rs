use crate::cli::ui::{self, StyleType};
use crate::config::AppConfig;
use crate::core::clock::{Clock, SystemClock};
use crate::core::conversion::{ConversionResult, ConversionService};
use crate::core::error::ConversionError;
use crate::providers::FreeCurrencyProvider;
use crate::store::open_rate_cache;
use anyhow::Result;
use clap::ValueEnum;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Currencies offered on the command line. The conversion core itself accepts
/// any code the provider knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "UPPER")]
pub enum SupportedCurrency {
    Usd,
    Eur,
    Rub,
    Gbp,
    Jpy,
    Cny,
    Try,
}

impl SupportedCurrency {
    pub fn code(&self) -> &'static str {
        match self {
            SupportedCurrency::Usd => "USD",
            SupportedCurrency::Eur => "EUR",
            SupportedCurrency::Rub => "RUB",
            SupportedCurrency::Gbp => "GBP",
            SupportedCurrency::Jpy => "JPY",
            SupportedCurrency::Cny => "CNY",
            SupportedCurrency::Try => "TRY",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SupportedCurrency::Usd => "US Dollar",
            SupportedCurrency::Eur => "Euro",
            SupportedCurrency::Rub => "Russian Ruble",
            SupportedCurrency::Gbp => "Pound Sterling",
            SupportedCurrency::Jpy => "Japanese Yen",
            SupportedCurrency::Cny => "Chinese Yuan",
            SupportedCurrency::Try => "Turkish Lira",
        }
    }
}

impl fmt::Display for SupportedCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConvertRequest {
    pub amount: f64,
    pub from: String,
    pub to: String,
    /// Convert in the opposite direction.
    pub swap: bool,
}

impl ConvertRequest {
    /// `(from, to)` after applying `swap`.
    pub fn direction(&self) -> (&str, &str) {
        if self.swap {
            (&self.to, &self.from)
        } else {
            (&self.from, &self.to)
        }
    }
}

/// Runs a single conversion against the configured provider and cache, and
/// prints the result line.
pub async fn run(config: &AppConfig, request: &ConvertRequest) -> Result<()> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let cache = open_rate_cache(config, Arc::clone(&clock))?;
    // Cache hits need no credential, so a missing key only matters on a fetch.
    let provider = match config.api_key() {
        Ok(key) => FreeCurrencyProvider::new(&config.provider.base_url, &key),
        Err(e) => {
            debug!("{e}; only cached rates are available");
            FreeCurrencyProvider::without_key(&config.provider.base_url)
        }
    };
    let service = ConversionService::new(provider, cache, clock);

    let (from, to) = request.direction();
    debug!(amount = request.amount, from, to, "Converting");

    let pb = ui::new_spinner("Loading...")?;
    let result = service.convert(request.amount, from, to).await;
    pb.finish_and_clear();

    let result = result?;
    println!("{}", format_result(request.amount, from, to, &result));
    Ok(())
}

/// Renders `100 USD = 92.00 EUR`. Rounding to two decimals happens here only.
pub fn format_result(amount: f64, from: &str, to: &str, result: &ConversionResult) -> String {
    let converted = format!("{:.2} {}", result.converted_amount, to.trim().to_uppercase());
    let mut line = format!(
        "{} {} = {}",
        amount,
        from.trim().to_uppercase(),
        ui::style_text(&converted, StyleType::Value)
    );
    if result.served_from_cache {
        line.push(' ');
        line.push_str(&ui::style_text("(cached)", StyleType::Subtle));
    }
    line
}

/// User-facing text for a failed command.
pub fn describe_failure(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ConversionError>() {
        Some(e @ (ConversionError::InvalidAmount(_) | ConversionError::MissingApiKey)) => {
            format!("Error: {e}")
        }
        Some(e) => format!("Error: {e}. Try again later"),
        None => format!("Error: {err:#}"),
    }
}

/// Lines for the `currencies` command.
pub fn list_currencies() -> Vec<String> {
    SupportedCurrency::value_variants()
        .iter()
        .map(|c| format!("{} ({})", c.code(), c.name()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(swap: bool) -> ConvertRequest {
        ConvertRequest {
            amount: 100.0,
            from: "USD".to_string(),
            to: "EUR".to_string(),
            swap,
        }
    }

    #[test]
    fn test_swap_reverses_direction() {
        assert_eq!(request(false).direction(), ("USD", "EUR"));
        assert_eq!(request(true).direction(), ("EUR", "USD"));
    }

    #[test]
    fn test_format_result_rounds_for_display() {
        console::set_colors_enabled(false);
        let result = ConversionResult {
            converted_amount: 92.0000001,
            rate: 0.920000001,
            served_from_cache: false,
        };

        assert_eq!(format_result(100.0, "USD", "EUR", &result), "100 USD = 92.00 EUR");

        let cached = ConversionResult {
            served_from_cache: true,
            ..result
        };
        assert_eq!(
            format_result(2.5, "usd", "eur", &cached),
            "2.5 USD = 92.00 EUR (cached)"
        );
    }

    #[test]
    fn test_describe_failure() {
        let invalid = anyhow::Error::new(ConversionError::InvalidAmount(0.0));
        assert_eq!(
            describe_failure(&invalid),
            "Error: invalid amount 0: enter an amount greater than 0"
        );

        let unknown = anyhow::Error::new(ConversionError::UnknownCurrency("XYZ".to_string()));
        assert_eq!(
            describe_failure(&unknown),
            "Error: rate for XYZ not found. Try again later"
        );

        let no_key = anyhow::Error::new(ConversionError::MissingApiKey);
        assert!(!describe_failure(&no_key).contains("Try again later"));

        let other = anyhow::anyhow!("No API key configured");
        assert_eq!(describe_failure(&other), "Error: No API key configured");
    }

    #[test]
    fn test_supported_currencies() {
        let lines = list_currencies();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "USD (US Dollar)");
        assert!(lines.contains(&"TRY (Turkish Lira)".to_string()));

        let parsed = SupportedCurrency::from_str("gbp", true).unwrap();
        assert_eq!(parsed, SupportedCurrency::Gbp);
        assert!(SupportedCurrency::from_str("XYZ", true).is_err());
    }
}
