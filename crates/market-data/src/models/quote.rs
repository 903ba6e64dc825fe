use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Latest traded quote for one equity symbol.
///
/// Price fields are carried as the provider-formatted strings so the
/// display layer shows exactly what the provider reported (including
/// trailing `%` on the change percent). Identity is the symbol: two
/// quotes for the same symbol describe the same instrument at
/// different moments.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Quote {
    /// Ticker symbol, as reported by the provider (e.g. "AAPL").
    pub symbol: String,
    /// Last traded price, provider-formatted (e.g. "189.4100").
    pub price: String,
    /// Absolute change since previous close (e.g. "-1.2300").
    pub change: String,
    /// Percent change since previous close, including the trailing
    /// percent sign (e.g. "-0.6451%").
    pub change_percent: String,
}

impl Quote {
    pub fn new(
        symbol: impl Into<String>,
        price: impl Into<String>,
        change: impl Into<String>,
        change_percent: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            price: price.into(),
            change: change.into(),
            change_percent: change_percent.into(),
        }
    }

    /// True when the instrument traded down since the previous close.
    pub fn is_decline(&self) -> bool {
        self.change.trim_start().starts_with('-')
    }

    /// Price parsed as a decimal, when the provider string is numeric.
    pub fn price_decimal(&self) -> Option<Decimal> {
        Decimal::from_str(self.price.trim()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_is_decline() {
        let down = Quote::new("AAPL", "189.4100", "-1.2300", "-0.6451%");
        let up = Quote::new("MSFT", "420.0000", "2.1000", "0.5025%");
        assert!(down.is_decline());
        assert!(!up.is_decline());
    }

    #[test]
    fn test_price_decimal() {
        let quote = Quote::new("AAPL", "189.4100", "-1.2300", "-0.6451%");
        assert_eq!(quote.price_decimal(), Some(dec!(189.41)));

        let malformed = Quote::new("AAPL", "None", "0", "0%");
        assert_eq!(malformed.price_decimal(), None);
    }

    #[test]
    fn test_serialization_round_trip() {
        let quote = Quote::new("AAPL", "189.4100", "-1.2300", "-0.6451%");
        let json = serde_json::to_string(&quote).unwrap();
        let back: Quote = serde_json::from_str(&json).unwrap();
        assert_eq!(back, quote);
    }
}
