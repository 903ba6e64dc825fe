use serde::{Deserialize, Serialize};

/// One candidate instrument returned by a ticker search.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SymbolMatch {
    /// Ticker symbol of the match (e.g. "AAPL").
    pub symbol: String,
    /// Human-readable instrument name (e.g. "Apple Inc").
    pub name: String,
    /// Whether the symbol is already on the caller's favorites list.
    /// Providers never set this; it is stamped on by the consumer.
    #[serde(default)]
    pub is_favorite: bool,
}

impl SymbolMatch {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            is_favorite: false,
        }
    }

    pub fn with_favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = is_favorite;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults_to_not_favorite() {
        let m = SymbolMatch::new("AAPL", "Apple Inc");
        assert_eq!(m.symbol, "AAPL");
        assert_eq!(m.name, "Apple Inc");
        assert!(!m.is_favorite);
    }

    #[test]
    fn test_with_favorite() {
        let m = SymbolMatch::new("AAPL", "Apple Inc").with_favorite(true);
        assert!(m.is_favorite);
    }

    #[test]
    fn test_is_favorite_defaults_on_deserialize() {
        let m: SymbolMatch = serde_json::from_str(r#"{"symbol":"AAPL","name":"Apple Inc"}"#).unwrap();
        assert!(!m.is_favorite);
    }
}
