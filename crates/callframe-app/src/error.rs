//! Error types for the application layer.

use thiserror::Error;

/// Errors from the [`crate::RealtimeClient`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RealtimeError {
    /// Client was shut down; no further subscriptions or publishes.
    #[error("realtime client is closed")]
    Closed,

    /// Topic name is empty.
    #[error("invalid topic: {0:?}")]
    InvalidTopic(String),
}
