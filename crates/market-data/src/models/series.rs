use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Daily closing prices for one symbol, oldest first.
///
/// Only the closes are kept; chart rendering needs the shape of the
/// curve, not full OHLCV bars. Entries whose close failed to parse are
/// carried as [`Decimal::ZERO`] so the series keeps one point per
/// trading day.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoricalSeries {
    closes: Vec<Decimal>,
}

impl HistoricalSeries {
    /// Builds a series from closes already ordered oldest first.
    pub fn new(closes: Vec<Decimal>) -> Self {
        Self { closes }
    }

    pub fn closes(&self) -> &[Decimal] {
        &self.closes
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    /// Most recent close, when the series is non-empty.
    pub fn latest(&self) -> Option<Decimal> {
        self.closes.last().copied()
    }

    /// Smallest and largest close in the series. Used to normalize
    /// chart coordinates.
    pub fn min_max(&self) -> Option<(Decimal, Decimal)> {
        let first = *self.closes.first()?;
        let mut min = first;
        let mut max = first;
        for close in &self.closes[1..] {
            if *close < min {
                min = *close;
            }
            if *close > max {
                max = *close;
            }
        }
        Some((min, max))
    }
}
