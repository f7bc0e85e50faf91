//! Document store error types.

/// Errors that can occur while talking to the document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Store returned an error response
    #[error("Store error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to (de)serialize a request or response
    #[error("Failed to deserialize store response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// No store URL configured
    #[error("Document store URL not configured")]
    NotConfigured,

    /// Generic store error
    #[error("Document store error: {0}")]
    Other(String),
}
