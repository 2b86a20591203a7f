//! Versioned document snapshots and the `DocumentManager` that applies
//! open/change/close events and produces normalized edit sets for
//! downstream incremental consumers (notably the syntax tree cache).

mod error;
mod manager;
mod snapshot;

pub use error::DocumentError;
pub use manager::{Change, DocumentManager, TextEdit};
pub use snapshot::{DocumentSnapshot, SnapshotId};
