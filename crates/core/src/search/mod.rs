//! Ticker search.

pub mod pipeline;

pub use pipeline::{SearchHandle, SearchPipeline, SearchUpdate};
