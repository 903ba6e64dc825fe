//! Runtime configuration for the core services.

use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{DEFAULT_REFRESH_CONCURRENCY, DEFAULT_SEARCH_DEBOUNCE_MS};
use crate::crypto::CryptoBoard;

const ENV_SEARCH_DEBOUNCE_MS: &str = "QUOTEFOLIO_SEARCH_DEBOUNCE_MS";
const ENV_REFRESH_CONCURRENCY: &str = "QUOTEFOLIO_REFRESH_CONCURRENCY";
const ENV_CRYPTO_ASSETS: &str = "QUOTEFOLIO_CRYPTO_ASSETS";
const ENV_DATA_DIR: &str = "QUOTEFOLIO_DATA_DIR";

const DEFAULT_DATA_DIR: &str = "data";

#[derive(Clone, Debug)]
pub struct Settings {
    /// Quiet window before a search query fires.
    pub search_debounce: Duration,
    /// Concurrent quote requests during a favorites refresh.
    pub refresh_concurrency: usize,
    /// Asset slugs shown on the crypto board, in display order.
    pub crypto_assets: Vec<String>,
    /// Directory for the file-backed preference store.
    pub data_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            refresh_concurrency: DEFAULT_REFRESH_CONCURRENCY,
            crypto_assets: CryptoBoard::default_assets(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl Settings {
    /// Reads settings from `QUOTEFOLIO_*` environment variables,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            search_debounce: debounce_from(env_opt(ENV_SEARCH_DEBOUNCE_MS)),
            refresh_concurrency: concurrency_from(env_opt(ENV_REFRESH_CONCURRENCY)),
            crypto_assets: assets_from(env_opt(ENV_CRYPTO_ASSETS)),
            data_dir: env_opt(ENV_DATA_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
        }
    }
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn debounce_from(value: Option<String>) -> Duration {
    value
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS))
}

/// At least one request must be allowed or a refresh would hang.
fn concurrency_from(value: Option<String>) -> usize {
    value
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_REFRESH_CONCURRENCY)
}

fn assets_from(value: Option<String>) -> Vec<String> {
    let parsed: Vec<String> = value
        .map(|v| {
            v.split(',')
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();
    if parsed.is_empty() {
        CryptoBoard::default_assets()
    } else {
        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.search_debounce, Duration::from_millis(500));
        assert_eq!(settings.refresh_concurrency, 4);
        assert_eq!(settings.crypto_assets.len(), 5);
        assert_eq!(settings.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_debounce_from() {
        assert_eq!(debounce_from(None), Duration::from_millis(500));
        assert_eq!(
            debounce_from(Some("250".to_string())),
            Duration::from_millis(250)
        );
        assert_eq!(
            debounce_from(Some("fast".to_string())),
            Duration::from_millis(500)
        );
    }

    #[test]
    fn test_concurrency_from_rejects_zero() {
        assert_eq!(concurrency_from(Some("0".to_string())), 4);
        assert_eq!(concurrency_from(Some("8".to_string())), 8);
        assert_eq!(concurrency_from(None), 4);
    }

    #[test]
    fn test_assets_from() {
        assert_eq!(
            assets_from(Some("Bitcoin, solana ,,ripple".to_string())),
            vec!["bitcoin", "solana", "ripple"]
        );
        assert_eq!(assets_from(None), CryptoBoard::default_assets());
        assert_eq!(assets_from(Some("  ".to_string())), CryptoBoard::default_assets());
    }
}
