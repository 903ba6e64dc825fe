//! Provider trait for equity market data sources.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{HistoricalSeries, Quote, SymbolMatch};

/// A source of equity quotes, daily history and symbol search.
///
/// Default implementations return [`MarketDataError::NotSupported`] so
/// a provider only implements the operations it actually has.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Stable identifier for logging and error messages.
    fn id(&self) -> &'static str;

    /// Latest traded quote for one symbol.
    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let _ = symbol;
        Err(MarketDataError::NotSupported {
            operation: "get_latest_quote".to_string(),
            provider: self.id().to_string(),
        })
    }

    /// Daily closing history for one symbol, oldest first.
    async fn get_daily_series(&self, symbol: &str) -> Result<HistoricalSeries, MarketDataError> {
        let _ = symbol;
        Err(MarketDataError::NotSupported {
            operation: "get_daily_series".to_string(),
            provider: self.id().to_string(),
        })
    }

    /// Instruments matching a free-text query.
    async fn search(&self, query: &str) -> Result<Vec<SymbolMatch>, MarketDataError> {
        let _ = query;
        Err(MarketDataError::NotSupported {
            operation: "search".to_string(),
            provider: self.id().to_string(),
        })
    }
}
