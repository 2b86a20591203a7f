//! The error taxonomy surfaced to the outer shell.

use swift_ls_daemon::DaemonError;
use swift_ls_diagnostics::DiagnosticError;
use swift_ls_document::DocumentError;
use swift_ls_rename::RenameError;
use swift_ls_uri::UriError;
use swift_ls_refdocs::RefDocError;
use swift_ls_completion::CompletionError;
use thiserror::Error;

/// The error kinds the core can surface, per its error handling design.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    /// No open snapshot for a uri that was required.
    #[error("unknown document: {0}")]
    UnknownDocument(String),

    /// Positions did not resolve in the snapshot.
    #[error("invalid range in {uri} at version {version}")]
    InvalidRange {
        /// The document the range was requested against.
        uri: String,
        /// The document version the range was checked against.
        version: i64,
    },

    /// A rename new-name failed compound-name parsing.
    #[error("invalid rename name: {0}")]
    InvalidName(String),

    /// Wrapped error from the analysis daemon.
    #[error("daemon error: {0}")]
    Daemon(#[from] DaemonError),

    /// A long-running task raced a newer edit.
    #[error("document modified during request")]
    DocumentModified,

    /// Request arrived for a uri whose workspace is unknown.
    #[error("workspace not open for {0}")]
    WorkspaceNotOpen(String),

    /// A reference-document uri could not be parsed or encoded.
    #[error("uri error: {0}")]
    Uri(#[from] UriError),

    /// A must-reuse completion request could not be satisfied.
    #[error("server cancelled completion request")]
    CompletionServerCancelled,

    /// An invariant was violated.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DocumentError> for CoreError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::Unknown(uri) => CoreError::UnknownDocument(uri),
            DocumentError::Duplicate(uri) => CoreError::Internal(format!("document already open: {uri}")),
            DocumentError::InvalidRange { uri, version } => CoreError::InvalidRange { uri, version },
            DocumentError::StaleEdit { uri, given, current } => {
                CoreError::Internal(format!("stale edit for {uri}: given {given}, current {current}"))
            }
            DocumentError::DiskReadFailed { uri, reason } => CoreError::UnknownDocument(format!("{uri} ({reason})")),
        }
    }
}

impl From<DiagnosticError> for CoreError {
    fn from(err: DiagnosticError) -> Self {
        match err {
            DiagnosticError::DocumentModified => CoreError::DocumentModified,
            DiagnosticError::Daemon(e) => CoreError::Daemon(e),
        }
    }
}

impl From<RenameError> for CoreError {
    fn from(err: RenameError) -> Self {
        match err {
            RenameError::InvalidName(name) => CoreError::InvalidName(name),
            RenameError::Daemon(e) => CoreError::Daemon(e),
        }
    }
}

impl From<RefDocError> for CoreError {
    fn from(err: RefDocError) -> Self {
        match err {
            RefDocError::Daemon(e) => CoreError::Daemon(e),
            RefDocError::Uri(e) => CoreError::Uri(e),
        }
    }
}

impl From<CompletionError> for CoreError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::ServerCancelled => CoreError::CompletionServerCancelled,
            CompletionError::Daemon(e) => CoreError::Daemon(e),
        }
    }
}
