//! Preference persistence.
//!
//! A small key/value blob store stands in for platform preference
//! storage. Reads go straight to the store; writes are funneled
//! through a single writer task so concurrent saves never interleave.

pub mod preferences;
pub mod write_actor;

use thiserror::Error;

pub use preferences::{FilePreferencesStore, MemoryPreferencesStore, PreferencesStore};
pub use write_actor::{spawn_writer, WriteHandle, WriteTicket};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Keys name files on disk, so only a conservative character set
    /// is accepted.
    #[error("Invalid preference key '{0}'")]
    InvalidKey(String),

    #[error("Preference writer is not running")]
    WriterStopped,
}
