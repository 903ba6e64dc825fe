//! Provider configuration.
//!
//! Keys and endpoints come from the environment so builds never embed
//! credentials. Base URL overrides exist for pointing tests and local
//! setups at a stub server.

use std::time::Duration;

use crate::provider::{alpha_vantage, coincap};

const ENV_ALPHA_VANTAGE_API_KEY: &str = "QUOTEFOLIO_ALPHA_VANTAGE_API_KEY";
const ENV_COINCAP_API_KEY: &str = "QUOTEFOLIO_COINCAP_API_KEY";
const ENV_ALPHA_VANTAGE_URL: &str = "QUOTEFOLIO_ALPHA_VANTAGE_URL";
const ENV_COINCAP_URL: &str = "QUOTEFOLIO_COINCAP_URL";
const ENV_HTTP_TIMEOUT_SECS: &str = "QUOTEFOLIO_HTTP_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct ProviderSettings {
    /// Alpha Vantage key. Required for equity quotes and search.
    pub alpha_vantage_api_key: Option<String>,
    /// CoinCap key. Optional; unkeyed requests get a smaller budget.
    pub coincap_api_key: Option<String>,
    pub alpha_vantage_url: String,
    pub coincap_url: String,
    /// Per-request timeout applied to every provider call.
    pub request_timeout: Duration,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            alpha_vantage_api_key: None,
            coincap_api_key: None,
            alpha_vantage_url: alpha_vantage::DEFAULT_BASE_URL.to_string(),
            coincap_url: coincap::DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ProviderSettings {
    /// Reads settings from `QUOTEFOLIO_*` environment variables,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            alpha_vantage_api_key: env_opt(ENV_ALPHA_VANTAGE_API_KEY),
            coincap_api_key: env_opt(ENV_COINCAP_API_KEY),
            alpha_vantage_url: env_opt(ENV_ALPHA_VANTAGE_URL)
                .unwrap_or(defaults.alpha_vantage_url),
            coincap_url: env_opt(ENV_COINCAP_URL).unwrap_or(defaults.coincap_url),
            request_timeout: timeout_from(env_opt(ENV_HTTP_TIMEOUT_SECS)),
        }
    }

    pub fn with_alpha_vantage_api_key(mut self, key: impl Into<String>) -> Self {
        self.alpha_vantage_api_key = Some(key.into());
        self
    }

    pub fn with_coincap_api_key(mut self, key: impl Into<String>) -> Self {
        self.coincap_api_key = Some(key.into());
        self
    }
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn timeout_from(value: Option<String>) -> Duration {
    value
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}
