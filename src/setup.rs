// src/setup.rs

use std::time::Duration;

use services::ValidationOptions;
use tracing_subscriber::EnvFilter;

const DEFAULT_DEBOUNCE_MS: u64 = 100;
const DEFAULT_FAILURE_RATE: f64 = 0.25;

#[derive(Debug, Clone, PartialEq)]
pub(super) struct AppConfig {
    pub debounce: Duration,
    pub failure_rate: f64,
    pub json_logs: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let debounce_ms = lookup("FORM_DEBOUNCE_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_DEBOUNCE_MS);
        let failure_rate = lookup("SANDBOX_FAILURE_RATE")
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|r| r.is_finite())
            .unwrap_or(DEFAULT_FAILURE_RATE);
        let json_logs = lookup("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json"));

        AppConfig {
            debounce: Duration::from_millis(debounce_ms),
            failure_rate,
            json_logs,
        }
    }

    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions::with_debounce(self.debounce)
    }
}

/// Loads `.env` when present and installs the global subscriber. `RUST_LOG`
/// overrides the default `info` filter.
pub(super) fn set_up() -> AppConfig {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let _ = if config.json_logs {
        builder.json().with_target(false).try_init()
    } else {
        builder.try_init()
    };

    tracing::debug!(?config, "configuration loaded");
    config
}
