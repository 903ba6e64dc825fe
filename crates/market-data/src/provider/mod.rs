//! Market data providers.

pub mod alpha_vantage;
pub mod coincap;
pub mod traits;

pub use alpha_vantage::AlphaVantageProvider;
pub use coincap::CoinCapProvider;
pub use traits::QuoteProvider;
