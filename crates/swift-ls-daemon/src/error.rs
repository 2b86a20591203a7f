//! The `daemon-error` subcategories and a minimal core-facing error type
//! shared by every component that talks to the analysis daemon.

use thiserror::Error;

/// A failure reported by, or while talking to, the analysis daemon.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DaemonError {
    /// The request was cancelled before it completed.
    #[error("daemon request cancelled")]
    Cancelled,
    /// The daemon reported a failure with the given message.
    #[error("daemon request failed: {0}")]
    Failed(String),
    /// The request was malformed or not applicable to the current state.
    #[error("invalid request to daemon")]
    InvalidRequest,
    /// The request referenced a symbol the daemon could not resolve.
    #[error("daemon could not resolve the requested symbol")]
    MissingSymbol,
    /// The daemon connection was interrupted while the request was
    /// in flight.
    #[error("daemon connection interrupted")]
    Interrupted,
}
