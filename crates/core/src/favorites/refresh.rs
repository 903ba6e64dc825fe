//! Bounded fan-out of quote requests for a refresh pass.

use std::sync::Arc;

use futures::future::join_all;
use quotefolio_market_data::Quote;
use tokio::sync::Semaphore;

use crate::errors::{Error, Result};
use crate::market::QuoteFetcher;

/// Outcome of one refresh pass over the favorites list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    /// Symbols whose quote was updated.
    pub refreshed: usize,
    /// Symbols whose fetch failed; their previous quote is kept.
    pub failed: usize,
    /// Failed symbols with their error messages, in list order.
    pub errors: Vec<(String, String)>,
}

impl RefreshSummary {
    pub(crate) fn add_refreshed(&mut self) {
        self.refreshed += 1;
    }

    pub(crate) fn add_failed(&mut self, symbol: &str, error: &Error) {
        self.failed += 1;
        self.errors.push((symbol.to_string(), error.to_string()));
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    pub fn summary(&self) -> String {
        format!("{} refreshed, {} failed", self.refreshed, self.failed)
    }
}

/// Fetches the latest quote for every symbol, at most
/// `max_concurrency` requests in flight at once.
///
/// The result vector is position-aligned with `symbols`, so callers
/// can merge by position or by symbol as they prefer.
pub(crate) async fn fetch_quotes(
    fetcher: Arc<dyn QuoteFetcher>,
    symbols: Vec<String>,
    max_concurrency: usize,
) -> Vec<(String, Result<Quote>)> {
    let semaphore = Arc::new(Semaphore::new(max_concurrency.max(1)));

    let requests = symbols.into_iter().map(|symbol| {
        let fetcher = fetcher.clone();
        let semaphore = semaphore.clone();
        async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    return (
                        symbol,
                        Err(Error::Unexpected("Refresh limiter closed".to_string())),
                    )
                }
            };
            let result = fetcher.latest_quote(&symbol).await;
            (symbol, result)
        }
    });

    join_all(requests).await
}
