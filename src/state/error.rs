//! Designer state-specific error types.

/// Errors that can occur during designer state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// No store worker is attached to the designer
    #[error("Store worker not connected")]
    StoreNotConnected,

    /// The store worker has shut down
    #[error("Store worker unavailable: {0}")]
    StoreUnavailable(String),
}
