//! The connection-state machine driven by daemon notifications.

/// The core's view of its connection to the analysis daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// The daemon is reachable and semantic requests may be issued.
    Connected,
    /// The connection was interrupted; the core has reset its document
    /// manager and is waiting for the outer shell to reopen documents and
    /// for a `semantic-enabled` notification.
    Interrupted,
}

impl ConnectionState {
    /// The state following a `connection-interrupted` notification.
    pub fn on_connection_interrupted(self) -> ConnectionState {
        ConnectionState::Interrupted
    }

    /// The state following a `semantic-enabled` notification.
    pub fn on_semantic_enabled(self) -> ConnectionState {
        ConnectionState::Connected
    }
}
