//! Market data access for quotefolio.
//!
//! One client facade over two providers: Alpha Vantage for equity
//! quotes, daily history and ticker search, CoinCap for crypto asset
//! prices. Providers return provider-agnostic models and typed
//! errors; nothing provider-specific leaks past this crate.

pub mod client;
pub mod errors;
pub mod models;
pub mod provider;
pub mod settings;

pub use client::MarketDataClient;
pub use errors::MarketDataError;
pub use models::{CryptoQuote, HistoricalSeries, Quote, SymbolMatch};
pub use provider::{AlphaVantageProvider, CoinCapProvider, QuoteProvider};
pub use settings::ProviderSettings;
