//! Error types for market data operations.

use thiserror::Error;

/// Errors that can occur when talking to a market data provider.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// Network-level failure (DNS, connection, TLS, body read).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request did not complete within the configured timeout.
    /// Retrying later is reasonable.
    #[error("Request to {provider} timed out")]
    Timeout {
        /// Provider that timed out.
        provider: String,
    },

    /// The provider throttled us. Back off before retrying; free API
    /// tiers enforce small per-minute budgets.
    #[error("Rate limited by {provider}")]
    RateLimited {
        /// Provider that rejected the request.
        provider: String,
    },

    /// The provider answered but the payload did not match the
    /// expected shape.
    #[error("Failed to decode {provider} response: {message}")]
    Decode {
        /// Provider whose response failed to decode.
        provider: String,
        /// What went wrong while decoding.
        message: String,
    },

    /// The requested symbol is unknown to the provider.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// Provider-reported error that does not fit a more specific
    /// variant (HTTP 5xx, documented error envelope, etc.).
    #[error("Provider error from {provider}: {message}")]
    Provider {
        /// Provider that reported the error.
        provider: String,
        /// Error detail as reported.
        message: String,
    },

    /// The provider does not implement the requested operation.
    #[error("Operation '{operation}' is not supported by provider '{provider}'")]
    NotSupported {
        /// Operation that was attempted.
        operation: String,
        /// Provider that lacks it.
        provider: String,
    },

    /// No API key was configured for a provider that requires one.
    #[error("Missing API key for provider '{provider}'")]
    MissingApiKey {
        /// Provider the key is missing for.
        provider: String,
    },
}

impl MarketDataError {
    /// True when waiting and retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            MarketDataError::Network(_)
                | MarketDataError::Timeout { .. }
                | MarketDataError::RateLimited { .. }
        )
    }
}
