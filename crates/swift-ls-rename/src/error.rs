//! Error type for rename operations.

use swift_ls_daemon::DaemonError;
use thiserror::Error;

/// Failures reported by [`crate::rename`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenameError {
    /// A compound name had a `(` with no matching final `)`, or a `)` that
    /// was not the final character.
    #[error("invalid compound name: {0}")]
    InvalidName(String),

    /// The analysis daemon failed while resolving rename locations.
    #[error("daemon error: {0}")]
    Daemon(#[from] DaemonError),
}
