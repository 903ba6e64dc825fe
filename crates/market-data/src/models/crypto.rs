use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Latest state of one crypto asset.
///
/// Mirrors the CoinCap asset record: the `id` is CoinCap's slug
/// ("bitcoin"), distinct from the display `symbol` ("BTC").
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CryptoQuote {
    /// Provider asset id, lowercase slug (e.g. "bitcoin").
    pub id: String,
    /// Display name (e.g. "Bitcoin").
    pub name: String,
    /// Trading symbol (e.g. "BTC").
    pub symbol: String,
    /// Price in USD, provider-formatted string.
    pub price_usd: String,
}

impl CryptoQuote {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        symbol: impl Into<String>,
        price_usd: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            symbol: symbol.into(),
            price_usd: price_usd.into(),
        }
    }

    /// USD price parsed as a decimal, when the provider string is numeric.
    pub fn price_decimal(&self) -> Option<Decimal> {
        Decimal::from_str(self.price_usd.trim()).ok()
    }
}
