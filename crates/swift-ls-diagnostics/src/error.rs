//! Error type for diagnostic-report production.

use swift_ls_daemon::DaemonError;
use thiserror::Error;

/// Failures reported by [`crate::DiagnosticEngine::report_for`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DiagnosticError {
    /// A long-running report task raced a newer edit and lost; it must not
    /// publish.
    #[error("document modified before diagnostics completed")]
    DocumentModified,

    /// The analysis daemon failed while producing semantic diagnostics.
    #[error("daemon error: {0}")]
    Daemon(#[from] DaemonError),
}
