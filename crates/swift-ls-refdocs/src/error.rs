//! Error type shared by the macro-expansion cache and generated-interface
//! registry.

use swift_ls_daemon::DaemonError;
use swift_ls_uri::UriError;
use thiserror::Error;

/// Failures from reference-document and macro-expansion operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RefDocError {
    /// The analysis daemon failed while producing an expansion or
    /// synthesized interface.
    #[error("daemon error: {0}")]
    Daemon(#[from] DaemonError),

    /// A reference-document uri could not be parsed or encoded.
    #[error("uri error: {0}")]
    Uri(#[from] UriError),
}
