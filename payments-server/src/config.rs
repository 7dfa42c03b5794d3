//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use fx_charges::{QuoteMode, QuoteSettings};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_STORE_URL: &str = "sqlite://payments.db?mode=rwc";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Store connection URI; the scheme selects the adapter.
    pub store_url: String,
    pub quotes: QuoteSettings,
    pub log_format: LogFormat,
    /// OTLP collector endpoint; span export is off when unset.
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(port) => port
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid PORT `{}`: {}", port, e))?,
            None => DEFAULT_PORT,
        };

        let store_url = lookup("STORE_URL")
            .or_else(|| lookup("MONGO_URL"))
            .unwrap_or_else(|| DEFAULT_STORE_URL.to_string());

        let defaults = QuoteSettings::default();
        let mode = match lookup("QUOTE_MODE") {
            Some(mode) => mode.parse::<QuoteMode>()?,
            None => defaults.mode,
        };
        let timeout = match lookup("QUOTE_TIMEOUT_MS") {
            Some(ms) => Duration::from_millis(
                ms.parse()
                    .map_err(|e| anyhow::anyhow!("Invalid QUOTE_TIMEOUT_MS `{}`: {}", ms, e))?,
            ),
            None => defaults.timeout,
        };
        let max_retries = match lookup("QUOTE_MAX_RETRIES") {
            Some(n) => n
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid QUOTE_MAX_RETRIES `{}`: {}", n, e))?,
            None => defaults.max_retries,
        };
        let quotes = QuoteSettings {
            mode,
            fx_url: lookup("FX_URL").unwrap_or(defaults.fx_url),
            charges_url: lookup("CHARGES_URL").unwrap_or(defaults.charges_url),
            timeout,
            max_retries,
        };

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        let otlp_endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|s| !s.is_empty());

        Ok(Self {
            port,
            store_url,
            quotes,
            log_format,
            otlp_endpoint,
        })
    }
}
