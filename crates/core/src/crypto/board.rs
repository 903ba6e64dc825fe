//! Crypto board: a fixed set of crypto assets and their latest prices.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use futures::future::join_all;
use log::{debug, warn};
use quotefolio_market_data::CryptoQuote;

use crate::constants::DEFAULT_CRYPTO_ASSETS;
use crate::market::QuoteFetcher;

/// Read-only board over a configured list of asset slugs.
///
/// Rows always appear in configured order; an asset whose fetch fails
/// is skipped for that pass rather than shown stale or blocking the
/// rest.
pub struct CryptoBoard {
    fetcher: Arc<dyn QuoteFetcher>,
    asset_ids: Vec<String>,
    rows: RwLock<Vec<CryptoQuote>>,
    loaded: AtomicBool,
}

impl CryptoBoard {
    pub fn new(fetcher: Arc<dyn QuoteFetcher>, asset_ids: Vec<String>) -> Self {
        Self {
            fetcher,
            asset_ids,
            rows: RwLock::new(Vec::new()),
            loaded: AtomicBool::new(false),
        }
    }

    /// The stock set of assets shown when nothing is configured.
    pub fn default_assets() -> Vec<String> {
        DEFAULT_CRYPTO_ASSETS.iter().map(|s| s.to_string()).collect()
    }

    pub fn asset_ids(&self) -> &[String] {
        &self.asset_ids
    }

    /// Snapshot of the current rows, in configured order.
    pub fn quotes(&self) -> Vec<CryptoQuote> {
        self.rows.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Populates the board once. Later calls return the current row
    /// count without fetching, so views can call this on every
    /// appearance.
    pub async fn load(&self) -> usize {
        if self.loaded.swap(true, Ordering::SeqCst) {
            debug!("Crypto board already loaded, skipping fetch");
            return self.rows.read().unwrap_or_else(|e| e.into_inner()).len();
        }
        self.populate().await
    }

    /// Clears the board and fetches everything again.
    pub async fn refresh(&self) -> usize {
        self.rows.write().unwrap_or_else(|e| e.into_inner()).clear();
        self.loaded.store(true, Ordering::SeqCst);
        self.populate().await
    }

    async fn populate(&self) -> usize {
        let requests = self.asset_ids.iter().map(|id| {
            let fetcher = self.fetcher.clone();
            let id = id.clone();
            async move {
                let result = fetcher.crypto_asset(&id).await;
                (id, result)
            }
        });

        let mut fetched = Vec::with_capacity(self.asset_ids.len());
        for (id, result) in join_all(requests).await {
            match result {
                Ok(asset) => fetched.push(asset),
                Err(e) => warn!("Could not load crypto asset '{}': {}", id, e),
            }
        }

        let count = fetched.len();
        *self.rows.write().unwrap_or_else(|e| e.into_inner()) = fetched;
        debug!("Crypto board loaded {} of {} assets", count, self.asset_ids.len());
        count
    }
}
