//! Provider-agnostic data models.
//!
//! Everything a provider hands back crosses this boundary as one of
//! these types; the provider-specific wire structs stay private to
//! their modules.

pub mod crypto;
pub mod quote;
pub mod search;
pub mod series;

pub use crypto::CryptoQuote;
pub use quote::Quote;
pub use search::SymbolMatch;
pub use series::HistoricalSeries;
