//! Tracing subscriber setup for the CLI.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Per-target filter: this crate at debug when verbose and silent otherwise.
/// Dependencies (reqwest, fjall, hyper) only ever get through at warn.
pub fn app_targets(verbose: bool) -> Targets {
    let app_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::OFF
    };
    Targets::new()
        .with_target(env!("CARGO_CRATE_NAME"), app_level)
        .with_default(LevelFilter::WARN)
}

/// Installs the global subscriber, writing to stderr so stdout carries only
/// conversion results. `RUST_LOG` replaces the default level.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "off" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).without_time())
        .with(app_targets(verbose))
        .with(env_filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_verbose_enables_crate_debug_only() {
        let targets = app_targets(true);
        assert!(targets.would_enable("xconv::core::conversion", &Level::DEBUG));
        assert!(!targets.would_enable("reqwest::connect", &Level::DEBUG));
        assert!(targets.would_enable("reqwest::connect", &Level::WARN));
    }

    #[test]
    fn test_quiet_silences_crate() {
        let targets = app_targets(false);
        assert!(!targets.would_enable("xconv::store::disk", &Level::ERROR));
    }
}
