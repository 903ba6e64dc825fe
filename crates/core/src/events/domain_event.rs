//! Domain event types.

use serde::{Deserialize, Serialize};

/// Events emitted after core state changes.
///
/// Payloads carry identifiers and counts, not full records; consumers
/// that need the data read it back through the owning service.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// Favorites membership or order changed. Carries the full symbol
    /// list in its new order.
    FavoritesChanged { symbols: Vec<String> },

    /// A favorites refresh finished.
    RefreshCompleted { refreshed: usize, failed: usize },

    /// A search round trip finished and its results were published.
    SearchResultsReady {
        query: String,
        generation: u64,
        result_count: usize,
    },
}

impl DomainEvent {
    pub fn favorites_changed(symbols: Vec<String>) -> Self {
        DomainEvent::FavoritesChanged { symbols }
    }

    pub fn refresh_completed(refreshed: usize, failed: usize) -> Self {
        DomainEvent::RefreshCompleted { refreshed, failed }
    }

    pub fn search_results_ready(
        query: impl Into<String>,
        generation: u64,
        result_count: usize,
    ) -> Self {
        DomainEvent::SearchResultsReady {
            query: query.into(),
            generation,
            result_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favorites_changed_serialization() {
        let event = DomainEvent::favorites_changed(vec!["AAPL".to_string(), "MSFT".to_string()]);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"favorites_changed""#));

        let back: DomainEvent = serde_json::from_str(&json).unwrap();
        match back {
            DomainEvent::FavoritesChanged { symbols } => {
                assert_eq!(symbols, vec!["AAPL", "MSFT"]);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_refresh_completed_serialization() {
        let event = DomainEvent::refresh_completed(3, 1);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"refresh_completed""#));

        let back: DomainEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_search_results_ready_serialization() {
        let event = DomainEvent::search_results_ready("apple", 7, 10);
        let back: DomainEvent = serde_json::from_str(&serde_json::to_string(&event).unwrap()).unwrap();
        match back {
            DomainEvent::SearchResultsReady {
                query,
                generation,
                result_count,
            } => {
                assert_eq!(query, "apple");
                assert_eq!(generation, 7);
                assert_eq!(result_count, 10);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
