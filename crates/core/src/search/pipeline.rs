//! Debounced ticker search.
//!
//! Input arrives one keystroke at a time; the pipeline waits for a
//! quiet window before querying the provider, and publishes results
//! through a watch channel. Every accepted input takes the next
//! sequence number, and a completed search is published only if its
//! sequence still matches the latest accepted input when the response
//! lands. A superseded response is therefore discarded on arrival,
//! whether it lands before or after the response for the input that
//! replaced it.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::{debug, warn};
use quotefolio_market_data::SymbolMatch;
use tokio::sync::{mpsc, watch};

use crate::events::{DomainEvent, DomainEventSink};
use crate::favorites::FavoritesLookup;
use crate::market::QuoteFetcher;

/// One published search state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchUpdate {
    /// The query this state answers. Empty for the initial state.
    pub query: String,
    /// Sequence of the input this state answers. Every accepted input
    /// takes the next value, so later states carry higher numbers.
    pub generation: u64,
    pub matches: Vec<SymbolMatch>,
}

/// Input side of the pipeline. Clone freely; dropping every clone
/// stops the pipeline task.
#[derive(Clone)]
pub struct SearchHandle {
    tx: mpsc::UnboundedSender<String>,
}

impl SearchHandle {
    /// Feeds one keystroke's worth of query text. Never blocks; input
    /// after shutdown is dropped.
    pub fn input(&self, query: impl Into<String>) {
        let _ = self.tx.send(query.into());
    }
}

pub struct SearchPipeline;

impl SearchPipeline {
    /// Starts the pipeline task. Must be called from within a Tokio
    /// runtime.
    pub fn spawn(
        fetcher: Arc<dyn QuoteFetcher>,
        favorites: Arc<dyn FavoritesLookup>,
        event_sink: Arc<dyn DomainEventSink>,
        debounce: Duration,
    ) -> (SearchHandle, watch::Receiver<SearchUpdate>) {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = watch::channel(SearchUpdate::default());

        tokio::spawn(run(
            input_rx,
            Arc::new(update_tx),
            fetcher,
            favorites,
            event_sink,
            debounce,
        ));

        (SearchHandle { tx: input_tx }, update_rx)
    }
}

struct Publisher {
    updates: Arc<watch::Sender<SearchUpdate>>,
    event_sink: Arc<dyn DomainEventSink>,
    /// Sequence of the most recently accepted input; the discard gate.
    latest: Mutex<u64>,
}

impl Publisher {
    /// Assigns the next sequence to one accepted input, superseding
    /// every execution still in flight.
    fn accept_input(&self) -> u64 {
        let mut latest = self.latest.lock().unwrap_or_else(|e| e.into_inner());
        *latest += 1;
        *latest
    }

    /// Publishes a completed state, unless its input has been
    /// superseded in the meantime.
    fn publish(&self, update: SearchUpdate) {
        let latest = self.latest.lock().unwrap_or_else(|e| e.into_inner());
        if update.generation != *latest {
            debug!(
                "Discarding superseded results for '{}' (sequence {}, latest {})",
                update.query, update.generation, *latest
            );
            return;
        }

        self.event_sink.emit(DomainEvent::search_results_ready(
            update.query.clone(),
            update.generation,
            update.matches.len(),
        ));
        // No receivers just means nobody is watching right now.
        let _ = self.updates.send(update);
    }
}

async fn run(
    mut rx: mpsc::UnboundedReceiver<String>,
    updates: Arc<watch::Sender<SearchUpdate>>,
    fetcher: Arc<dyn QuoteFetcher>,
    favorites: Arc<dyn FavoritesLookup>,
    event_sink: Arc<dyn DomainEventSink>,
    debounce: Duration,
) {
    let publisher = Arc::new(Publisher {
        updates,
        event_sink,
        latest: Mutex::new(0),
    });
    let mut pending: Option<(String, u64)> = None;

    debug!("Search pipeline started (debounce {:?})", debounce);
    loop {
        if let Some((query, sequence)) = pending.take() {
            // A query is waiting for its quiet window. New input
            // replaces it and restarts the window.
            tokio::select! {
                input = rx.recv() => match input {
                    Some(next) => pending = accept(next, &publisher),
                    None => break,
                },
                _ = tokio::time::sleep(debounce) => {
                    execute(
                        query,
                        sequence,
                        fetcher.clone(),
                        favorites.clone(),
                        publisher.clone(),
                    );
                }
            }
        } else {
            match rx.recv().await {
                Some(next) => pending = accept(next, &publisher),
                None => break,
            }
        }
    }
    debug!("Search pipeline stopped");
}

/// Trims one input, assigns it the next sequence and decides whether
/// it waits for a quiet window. Blank input publishes the empty state
/// right away; either way the new sequence supersedes whatever is
/// still in flight.
fn accept(raw: String, publisher: &Arc<Publisher>) -> Option<(String, u64)> {
    let sequence = publisher.accept_input();
    let query = raw.trim().to_string();
    if query.is_empty() {
        publisher.publish(SearchUpdate {
            query,
            generation: sequence,
            matches: Vec::new(),
        });
        return None;
    }
    Some((query, sequence))
}

/// Runs one provider query on its own task so a slow response never
/// delays handling of further input.
fn execute(
    query: String,
    sequence: u64,
    fetcher: Arc<dyn QuoteFetcher>,
    favorites: Arc<dyn FavoritesLookup>,
    publisher: Arc<Publisher>,
) {
    tokio::spawn(async move {
        let matches = match fetcher.search_symbols(&query).await {
            Ok(matches) => matches,
            Err(e) => {
                // Failed searches read as "no matches" downstream.
                warn!("Search for '{}' failed: {}", query, e);
                Vec::new()
            }
        };

        let matches = matches
            .into_iter()
            .map(|m| {
                let known = favorites.is_favorite(&m.symbol);
                m.with_favorite(known)
            })
            .collect();

        publisher.publish(SearchUpdate {
            query,
            generation: sequence,
            matches,
        });
    });
}
