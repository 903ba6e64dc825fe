//! Favorites service: membership, ordering, persistence and refresh.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use log::{debug, info, warn};
use quotefolio_market_data::Quote;

use crate::constants::FAVORITES_STORE_KEY;
use crate::errors::{Error, Result};
use crate::events::{DomainEvent, DomainEventSink};
use crate::favorites::model::FavoritesList;
use crate::favorites::refresh::{fetch_quotes, RefreshSummary};
use crate::market::QuoteFetcher;
use crate::store::{spawn_writer, PreferencesStore, WriteHandle, WriteTicket};

/// What a toggle ended up doing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The symbol was fetched and appended to the list.
    Added(Quote),
    /// The symbol was already a favorite and has been removed.
    Removed,
    /// Another toggle for the same symbol is still running; nothing
    /// was changed.
    InFlight,
}

/// Membership lookup, split out so read-only consumers (the search
/// pipeline) don't depend on the full service surface.
pub trait FavoritesLookup: Send + Sync {
    fn is_favorite(&self, symbol: &str) -> bool;
}

#[async_trait]
pub trait FavoritesServiceTrait: Send + Sync {
    /// Snapshot of the list in its current order.
    fn favorites(&self) -> Vec<Quote>;

    /// Restores the list from the store. Unreadable or missing state
    /// starts empty; returns how many favorites were restored.
    fn load(&self) -> usize;

    /// Adds the symbol (fetching its quote first) or removes it if
    /// already present.
    async fn toggle(&self, symbol: &str) -> Result<ToggleOutcome>;

    /// Removes the entries at the given positions.
    async fn remove_at(&self, indices: &[usize]) -> Result<()>;

    /// Moves one entry to a new position.
    async fn reorder(&self, from: usize, to: usize) -> Result<()>;

    /// Re-fetches every favorite and updates prices in place.
    async fn refresh_all(&self) -> Result<RefreshSummary>;
}

/// Removes its symbol from the in-flight set on drop, so a toggle
/// that fails with `?` still releases the symbol.
struct InFlightGuard {
    symbol: String,
    locks: Arc<Mutex<HashSet<String>>>,
}

impl InFlightGuard {
    fn try_acquire(locks: &Arc<Mutex<HashSet<String>>>, symbol: &str) -> Option<Self> {
        let mut held = locks.lock().unwrap_or_else(|e| e.into_inner());
        if !held.insert(symbol.to_string()) {
            return None;
        }
        Some(Self {
            symbol: symbol.to_string(),
            locks: locks.clone(),
        })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut held = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        held.remove(&self.symbol);
    }
}

pub struct FavoritesService {
    list: RwLock<FavoritesList>,
    in_flight: Arc<Mutex<HashSet<String>>>,
    fetcher: Arc<dyn QuoteFetcher>,
    store: Arc<dyn PreferencesStore>,
    writer: WriteHandle,
    event_sink: Arc<dyn DomainEventSink>,
    refresh_concurrency: usize,
}

impl FavoritesService {
    /// Builds the service and spawns its writer task. Must be called
    /// from within a Tokio runtime.
    pub fn new(
        fetcher: Arc<dyn QuoteFetcher>,
        store: Arc<dyn PreferencesStore>,
        event_sink: Arc<dyn DomainEventSink>,
        refresh_concurrency: usize,
    ) -> Self {
        let writer = spawn_writer(store.clone());
        Self {
            list: RwLock::new(FavoritesList::new()),
            in_flight: Arc::new(Mutex::new(HashSet::new())),
            fetcher,
            store,
            writer,
            event_sink,
            refresh_concurrency,
        }
    }

    fn read_list(&self) -> RwLockReadGuard<'_, FavoritesList> {
        self.list.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_list(&self) -> RwLockWriteGuard<'_, FavoritesList> {
        self.list.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Serializes the list and queues it for persistence. Runs while
    /// the caller still holds the list lock, so the write's queue
    /// position matches the snapshot; a mutation finishing later can
    /// never be overwritten on disk by one that finished earlier.
    fn enqueue_snapshot(&self, list: &FavoritesList) -> Result<WriteTicket> {
        let blob = serde_json::to_string(list)?;
        Ok(self.writer.enqueue(FAVORITES_STORE_KEY, blob)?)
    }

    /// Waits out a queued write and announces the membership change.
    async fn finish_write(&self, ticket: WriteTicket, symbols: Vec<String>) -> Result<()> {
        ticket.wait().await?;
        self.event_sink
            .emit(DomainEvent::favorites_changed(symbols));
        Ok(())
    }
}

impl FavoritesLookup for FavoritesService {
    fn is_favorite(&self, symbol: &str) -> bool {
        self.read_list().contains(symbol)
    }
}

#[async_trait]
impl FavoritesServiceTrait for FavoritesService {
    fn favorites(&self) -> Vec<Quote> {
        self.read_list().quotes().to_vec()
    }

    fn load(&self) -> usize {
        let restored = match self.store.get_blob(FAVORITES_STORE_KEY) {
            Ok(Some(blob)) => match serde_json::from_str::<FavoritesList>(&blob) {
                Ok(list) => list,
                Err(e) => {
                    warn!("Stored favorites are unreadable, starting empty: {}", e);
                    FavoritesList::new()
                }
            },
            Ok(None) => FavoritesList::new(),
            Err(e) => {
                warn!("Could not read stored favorites, starting empty: {}", e);
                FavoritesList::new()
            }
        };

        let count = restored.len();
        *self.write_list() = restored;
        debug!("Restored {} favorites", count);
        count
    }

    async fn toggle(&self, symbol: &str) -> Result<ToggleOutcome> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(Error::Validation("Symbol cannot be empty".to_string()));
        }

        let Some(_guard) = InFlightGuard::try_acquire(&self.in_flight, symbol) else {
            debug!("Toggle for {} already in flight, ignoring", symbol);
            return Ok(ToggleOutcome::InFlight);
        };

        // Removal needs no fetch, handle it first.
        let removal = {
            let mut list = self.write_list();
            if list.remove_symbol(symbol).is_some() {
                Some((self.enqueue_snapshot(&list)?, list.symbols()))
            } else {
                None
            }
        };
        if let Some((ticket, symbols)) = removal {
            self.finish_write(ticket, symbols).await?;
            info!("Removed {} from favorites", symbol);
            return Ok(ToggleOutcome::Removed);
        }

        let quote = self.fetcher.latest_quote(symbol).await?;
        let (ticket, symbols) = {
            let mut list = self.write_list();
            list.push_unique(quote.clone());
            (self.enqueue_snapshot(&list)?, list.symbols())
        };
        self.finish_write(ticket, symbols).await?;
        info!("Added {} to favorites", quote.symbol);
        Ok(ToggleOutcome::Added(quote))
    }

    async fn remove_at(&self, indices: &[usize]) -> Result<()> {
        let pending = {
            let mut list = self.write_list();
            let before = list.len();
            list.remove_indices(indices);
            if list.len() == before {
                None
            } else {
                Some((self.enqueue_snapshot(&list)?, list.symbols()))
            }
        };

        if let Some((ticket, symbols)) = pending {
            self.finish_write(ticket, symbols).await?;
        }
        Ok(())
    }

    async fn reorder(&self, from: usize, to: usize) -> Result<()> {
        let pending = {
            let mut list = self.write_list();
            if list.reorder(from, to) {
                Some((self.enqueue_snapshot(&list)?, list.symbols()))
            } else {
                None
            }
        };

        if let Some((ticket, symbols)) = pending {
            self.finish_write(ticket, symbols).await?;
        }
        Ok(())
    }

    async fn refresh_all(&self) -> Result<RefreshSummary> {
        let symbols = self.read_list().symbols();
        if symbols.is_empty() {
            debug!("No favorites to refresh");
            return Ok(RefreshSummary::default());
        }

        info!("Refreshing {} favorites", symbols.len());
        let results = fetch_quotes(self.fetcher.clone(), symbols, self.refresh_concurrency).await;

        let mut summary = RefreshSummary::default();
        let ticket = {
            let mut list = self.write_list();
            for (symbol, result) in results {
                match result {
                    Ok(quote) => {
                        // The user may have removed the symbol while
                        // its fetch was running; drop the result then.
                        if list.replace(quote) {
                            summary.add_refreshed();
                        } else {
                            debug!("{} left the list during refresh", symbol);
                        }
                    }
                    Err(e) => {
                        warn!("Refresh failed for {}: {}", symbol, e);
                        summary.add_failed(&symbol, &e);
                    }
                }
            }
            // One write per refresh pass, regardless of list size.
            self.enqueue_snapshot(&list)?
        };

        ticket.wait().await?;
        self.event_sink.emit(DomainEvent::refresh_completed(
            summary.refreshed,
            summary.failed,
        ));
        info!("Favorites refresh finished: {}", summary.summary());
        Ok(summary)
    }
}
