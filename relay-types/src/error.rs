//! Error types for relay adapters.

/// Errors from chat provider operations.
///
/// Malformed stream records are not errors: adapters skip them and keep
/// reading. Everything here ends the call it came from.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Required configuration (credential, endpoint) is missing or invalid.
    /// Raised before any network activity.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The server answered with a non-success HTTP status.
    #[error("transport error: {status} {status_text}")]
    Transport {
        /// Numeric HTTP status.
        status: u16,
        /// Reason phrase for the status.
        status_text: String,
    },

    /// The server answered with success but the response is unusable
    /// (e.g. there is no body to stream).
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Network-level error (connection reset, DNS failure, body read failure).
    #[error("network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ProviderError {
    /// Whether retrying this request at a higher level might succeed.
    ///
    /// Adapters never retry on their own.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Transport { status, .. } => *status == 429 || (500..=599).contains(status),
            _ => false,
        }
    }
}
