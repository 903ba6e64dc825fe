//! Core domain services for quotefolio.
//!
//! Everything the frontend needs short of rendering: the favorites
//! watchlist with persistence and bulk refresh, the debounced ticker
//! search, the crypto board, and the events that announce changes.

pub mod constants;
pub mod crypto;
pub mod errors;
pub mod events;
pub mod favorites;
pub mod market;
pub mod search;
pub mod settings;
pub mod store;

pub use errors::{Error, Result};

// Market data models flow through the core API unchanged.
pub use quotefolio_market_data as market_data;
