//! Client facade over the configured providers.
//!
//! Equities and crypto are served by different providers with
//! different symbologies (ticker vs slug), so the facade exposes them
//! as separate operations instead of routing through one lookup.

use std::sync::Arc;

use log::{info, warn};

use crate::errors::MarketDataError;
use crate::models::{CryptoQuote, HistoricalSeries, Quote, SymbolMatch};
use crate::provider::{AlphaVantageProvider, CoinCapProvider, QuoteProvider};
use crate::settings::ProviderSettings;

pub struct MarketDataClient {
    equities: Arc<dyn QuoteProvider>,
    crypto: CoinCapProvider,
}

impl std::fmt::Debug for MarketDataClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketDataClient")
            .field("equities", &self.equities.id())
            .field("crypto", &self.crypto.id())
            .finish()
    }
}

impl MarketDataClient {
    /// Builds a client from settings. Fails when the Alpha Vantage key
    /// is missing, since every equity operation needs it; the CoinCap
    /// key stays optional.
    pub fn new(settings: &ProviderSettings) -> Result<Self, MarketDataError> {
        let api_key = settings.alpha_vantage_api_key.clone().ok_or_else(|| {
            MarketDataError::MissingApiKey {
                provider: "ALPHA_VANTAGE".to_string(),
            }
        })?;

        let equities = AlphaVantageProvider::new(api_key)
            .with_base_url(settings.alpha_vantage_url.clone())
            .with_timeout(settings.request_timeout);

        if settings.coincap_api_key.is_none() {
            warn!("No CoinCap API key configured, using the unauthenticated request budget");
        }
        let crypto = CoinCapProvider::new(settings.coincap_api_key.clone())
            .with_base_url(settings.coincap_url.clone())
            .with_timeout(settings.request_timeout);

        info!(
            "Market data client initialized (equities: {}, crypto: {})",
            equities.id(),
            crypto.id()
        );

        Ok(Self {
            equities: Arc::new(equities),
            crypto,
        })
    }

    /// Builds a client from `QUOTEFOLIO_*` environment variables.
    pub fn from_env() -> Result<Self, MarketDataError> {
        Self::new(&ProviderSettings::from_env())
    }

    pub fn equities_provider_id(&self) -> &'static str {
        self.equities.id()
    }

    /// Latest traded quote for one equity symbol.
    pub async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        self.equities.get_latest_quote(symbol).await
    }

    /// Daily closing history for one equity symbol, oldest first.
    pub async fn get_daily_series(
        &self,
        symbol: &str,
    ) -> Result<HistoricalSeries, MarketDataError> {
        self.equities.get_daily_series(symbol).await
    }

    /// Ticker search. A blank query returns no matches without
    /// touching the provider.
    pub async fn search_ticker(&self, query: &str) -> Result<Vec<SymbolMatch>, MarketDataError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.equities.search(query).await
    }

    /// Latest state of one crypto asset by CoinCap slug.
    pub async fn get_crypto_asset(&self, id: &str) -> Result<CryptoQuote, MarketDataError> {
        self.crypto.get_asset(id).await
    }
}
