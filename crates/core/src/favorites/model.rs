//! The favorites list and its editing rules.

use quotefolio_market_data::Quote;
use serde::{Deserialize, Serialize};

/// Ordered list of favorite quotes, unique by symbol.
///
/// Order is user-curated and survives persistence. Serializes as a
/// plain JSON array so the stored blob is just the quotes.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FavoritesList {
    quotes: Vec<Quote>,
}

impl FavoritesList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Symbols in list order.
    pub fn symbols(&self) -> Vec<String> {
        self.quotes.iter().map(|q| q.symbol.clone()).collect()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.position_of(symbol).is_some()
    }

    pub fn position_of(&self, symbol: &str) -> Option<usize> {
        self.quotes.iter().position(|q| q.symbol == symbol)
    }

    /// Appends unless the symbol is already present. Returns whether
    /// the quote was appended.
    pub fn push_unique(&mut self, quote: Quote) -> bool {
        if self.contains(&quote.symbol) {
            return false;
        }
        self.quotes.push(quote);
        true
    }

    /// Removes the quote with the given symbol, returning it.
    pub fn remove_symbol(&mut self, symbol: &str) -> Option<Quote> {
        let position = self.position_of(symbol)?;
        Some(self.quotes.remove(position))
    }

    /// Removes the given positions. Out-of-range entries are ignored;
    /// duplicates are removed once.
    pub fn remove_indices(&mut self, indices: &[usize]) {
        let mut sorted: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&i| i < self.quotes.len())
            .collect();
        sorted.sort_unstable();
        sorted.dedup();
        // Highest first so earlier removals don't shift later ones.
        for index in sorted.into_iter().rev() {
            self.quotes.remove(index);
        }
    }

    /// Moves the entry at `from` so it ends up at `to`, where `to` is
    /// an index in the list after the entry was taken out. `to` past
    /// the end clamps to the end. Returns whether anything moved.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        if from >= self.quotes.len() {
            return false;
        }
        let to = to.min(self.quotes.len() - 1);
        if from == to {
            return false;
        }
        let quote = self.quotes.remove(from);
        self.quotes.insert(to, quote);
        true
    }

    /// Replaces the entry with the same symbol in place, keeping its
    /// position. Returns whether a matching entry existed.
    pub fn replace(&mut self, quote: Quote) -> bool {
        match self.position_of(&quote.symbol) {
            Some(position) => {
                self.quotes[position] = quote;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(symbol: &str, price: &str) -> Quote {
        Quote::new(symbol, price, "0.00", "0.00%")
    }

    fn list_of(symbols: &[&str]) -> FavoritesList {
        let mut list = FavoritesList::new();
        for symbol in symbols {
            list.push_unique(quote(symbol, "1.00"));
        }
        list
    }

    #[test]
    fn test_push_unique_rejects_duplicates() {
        let mut list = FavoritesList::new();
        assert!(list.push_unique(quote("AAPL", "189.41")));
        assert!(!list.push_unique(quote("AAPL", "190.00")));
        assert_eq!(list.len(), 1);
        assert_eq!(list.quotes()[0].price, "189.41");
    }

    #[test]
    fn test_remove_symbol() {
        let mut list = list_of(&["AAPL", "MSFT", "GOOG"]);
        let removed = list.remove_symbol("MSFT").unwrap();
        assert_eq!(removed.symbol, "MSFT");
        assert_eq!(list.symbols(), vec!["AAPL", "GOOG"]);
        assert!(list.remove_symbol("MSFT").is_none());
    }

    #[test]
    fn test_remove_indices_ignores_out_of_range() {
        let mut list = list_of(&["A", "B", "C", "D"]);
        list.remove_indices(&[3, 1, 1, 99]);
        assert_eq!(list.symbols(), vec!["A", "C"]);
    }

    #[test]
    fn test_remove_indices_empty_is_noop() {
        let mut list = list_of(&["A", "B"]);
        list.remove_indices(&[]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_reorder_moves_entry() {
        let mut list = list_of(&["A", "B", "C", "D"]);
        assert!(list.reorder(0, 2));
        assert_eq!(list.symbols(), vec!["B", "C", "A", "D"]);
    }

    #[test]
    fn test_reorder_clamps_destination() {
        let mut list = list_of(&["A", "B", "C"]);
        assert!(list.reorder(0, 99));
        assert_eq!(list.symbols(), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_reorder_out_of_range_source_is_noop() {
        let mut list = list_of(&["A", "B"]);
        assert!(!list.reorder(5, 0));
        assert_eq!(list.symbols(), vec!["A", "B"]);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut list = list_of(&["A", "B", "C"]);
        assert!(list.replace(quote("B", "42.00")));
        assert_eq!(list.symbols(), vec!["A", "B", "C"]);
        assert_eq!(list.quotes()[1].price, "42.00");
        assert!(!list.replace(quote("Z", "1.00")));
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let list = list_of(&["AAPL"]);
        let json = serde_json::to_string(&list).unwrap();
        assert!(json.starts_with('['));
        let back: FavoritesList = serde_json::from_str(&json).unwrap();
        assert_eq!(back, list);
    }
}
