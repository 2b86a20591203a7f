//! Error type for document-manager operations.

use thiserror::Error;

/// Failures reported by [`crate::DocumentManager`] operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DocumentError {
    /// `open` was called for a uri that already has an open snapshot.
    #[error("document already open: {0}")]
    Duplicate(String),

    /// An operation required an open snapshot for a uri that has none.
    #[error("no open document: {0}")]
    Unknown(String),

    /// A change's range does not resolve within the pre-edit snapshot.
    #[error("invalid range in {uri} at version {version}")]
    InvalidRange {
        /// The document the change targeted.
        uri: String,
        /// The pre-edit version the range was checked against.
        version: i64,
    },

    /// `change` was called with a version that does not strictly exceed the
    /// document's current version.
    #[error("stale edit for {uri}: version {given} is not greater than current {current}")]
    StaleEdit {
        /// The document the change targeted.
        uri: String,
        /// The version supplied by the caller.
        given: i64,
        /// The document's current version.
        current: i64,
    },

    /// `latest_snapshot_or_disk` could not read the backing file.
    #[error("failed to read {uri} from disk: {reason}")]
    DiskReadFailed {
        /// The document that has no open snapshot and could not be read.
        uri: String,
        /// The underlying I/O failure, rendered as text.
        reason: String,
    },
}
