//! CoinCap provider.
//!
//! Serves the crypto side of the house via the `/v2/assets` endpoint.
//! CoinCap works without a key on a small request budget; when a key
//! is configured it rides along as the `key` query parameter for the
//! larger one.

use std::time::Duration;

use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::CryptoQuote;

pub const DEFAULT_BASE_URL: &str = "https://api.coincap.io";
const PROVIDER_ID: &str = "COINCAP";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ================================================================
// Wire format
// ================================================================

#[derive(Debug, Deserialize)]
struct AssetsResponse {
    data: Vec<AssetWire>,
}

#[derive(Debug, Deserialize)]
struct AssetWire {
    id: String,
    name: String,
    symbol: String,
    /// Null for assets that no longer trade.
    #[serde(rename = "priceUsd")]
    price_usd: Option<String>,
}

/// The search endpoint ranks by relevance, so the first entry is the
/// asset the slug names. An empty list means the slug is unknown.
fn asset_from_response(id: &str, resp: AssetsResponse) -> Result<CryptoQuote, MarketDataError> {
    let wire = resp
        .data
        .into_iter()
        .next()
        .ok_or_else(|| MarketDataError::SymbolNotFound(id.to_string()))?;

    Ok(CryptoQuote::new(
        wire.id,
        wire.name,
        wire.symbol,
        wire.price_usd.unwrap_or_default(),
    ))
}

// ================================================================
// Provider
// ================================================================

pub struct CoinCapProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl CoinCapProvider {
    pub fn new(api_key: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        self
    }

    pub fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    /// Latest state of one asset by CoinCap slug (e.g. "bitcoin").
    pub async fn get_asset(&self, id: &str) -> Result<CryptoQuote, MarketDataError> {
        let url = format!("{}/v2/assets", self.base_url);
        let resp: AssetsResponse = self.fetch(&url, &[("search", id)]).await?;
        asset_from_response(id, resp)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<T, MarketDataError> {
        let mut pairs: Vec<(&str, &str)> = params.to_vec();
        if let Some(key) = &self.api_key {
            pairs.push(("key", key));
        }

        debug!("CoinCap request: {} {:?}", url, params);

        let response = self.client.get(url).query(&pairs).send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketDataError::Network(e)
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(MarketDataError::Provider {
                provider: PROVIDER_ID.to_string(),
                message: "Invalid or missing API key".to_string(),
            });
        }
        if !status.is_success() {
            return Err(MarketDataError::Provider {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        let body = response.text().await.map_err(MarketDataError::Network)?;
        serde_json::from_str::<T>(&body).map_err(|e| MarketDataError::Decode {
            provider: PROVIDER_ID.to_string(),
            message: e.to_string(),
        })
    }
}

// ================================================================
// Tests
// ================================================================
