//! Seam between core services and the market data crate.
//!
//! Services depend on this trait instead of the concrete client so
//! tests can substitute canned data. The real implementation simply
//! forwards to [`MarketDataClient`].

use async_trait::async_trait;
use quotefolio_market_data::{CryptoQuote, MarketDataClient, Quote, SymbolMatch};

use crate::errors::Result;

/// The market data operations core services consume.
#[async_trait]
pub trait QuoteFetcher: Send + Sync {
    /// Latest traded quote for one equity symbol.
    async fn latest_quote(&self, symbol: &str) -> Result<Quote>;

    /// Instruments matching a free-text query.
    async fn search_symbols(&self, query: &str) -> Result<Vec<SymbolMatch>>;

    /// Latest state of one crypto asset by slug.
    async fn crypto_asset(&self, id: &str) -> Result<CryptoQuote>;
}

#[async_trait]
impl QuoteFetcher for MarketDataClient {
    async fn latest_quote(&self, symbol: &str) -> Result<Quote> {
        Ok(self.get_latest_quote(symbol).await?)
    }

    async fn search_symbols(&self, query: &str) -> Result<Vec<SymbolMatch>> {
        Ok(self.search_ticker(query).await?)
    }

    async fn crypto_asset(&self, id: &str) -> Result<CryptoQuote> {
        Ok(self.get_crypto_asset(id).await?)
    }
}
