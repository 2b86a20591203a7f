//! Error type for completion-session operations.

use swift_ls_daemon::DaemonError;
use thiserror::Error;

/// Failures reported by [`crate::completion_list`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompletionError {
    /// A `must_reuse` request arrived for a session key that does not
    /// match the currently open session (or no session is open).
    #[error("server cancelled completion request")]
    ServerCancelled,

    /// The analysis daemon failed while producing completion items.
    #[error("daemon error: {0}")]
    Daemon(#[from] DaemonError),
}
