//! Error types for the core crate.

use quotefolio_market_data::MarketDataError;
use thiserror::Error;

use crate::store::StoreError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A provider call failed.
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),

    /// The preference store failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Caller input was rejected before any work happened.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Anything that does not fit the variants above.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Store(StoreError::Serialization(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Store(StoreError::Io(err))
    }
}
