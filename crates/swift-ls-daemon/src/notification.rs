//! Asynchronous notifications the daemon pushes to the core, dispatched
//! single-threaded via an unbounded channel so ordering matches the order
//! the daemon emitted them in.

use tokio::sync::mpsc;

/// A notification pushed by the analysis daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DaemonNotification {
    /// A document's compiled representation changed out from under the
    /// editor (e.g. a dependency was rebuilt).
    DocumentUpdate {
        /// The daemon's name for the affected buffer.
        name: String,
    },
    /// Semantic services have become available (or resumed) for the
    /// workspace.
    SemanticEnabled,
    /// The daemon connection was lost or reset.
    ConnectionInterrupted,
}

/// The sending half of the daemon's notification channel. A bridge
/// implementation owns one of these and pushes notifications as it
/// receives them from the out-of-process daemon.
pub type NotificationSender = mpsc::UnboundedSender<DaemonNotification>;

/// The receiving half of the daemon's notification channel. The core holds
/// one of these and drains it on its single notification-dispatch task.
pub type NotificationReceiver = mpsc::UnboundedReceiver<DaemonNotification>;

/// Construct a fresh notification channel.
pub fn notification_channel() -> (NotificationSender, NotificationReceiver) {
    mpsc::unbounded_channel()
}
