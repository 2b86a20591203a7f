//! Immutable, shareable document snapshots.

use std::sync::Arc;

use swift_ls_position::LineTable;

/// A totally ordered identifier for a document snapshot: a uri paired with
/// a version. Ordering is meaningful when comparing two ids for the same
/// uri (older versions strictly precede newer); ids for different uris
/// compare by uri first purely so the type has a total order usable as a
/// map key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnapshotId {
    /// The document's uri.
    pub uri: Arc<str>,
    /// The document version at the time this snapshot was taken.
    pub version: i64,
}

impl SnapshotId {
    /// Construct a new snapshot id.
    pub fn new(uri: Arc<str>, version: i64) -> Self {
        Self { uri, version }
    }
}

/// An immutable `(uri, language, version, text, lineTable)` tuple.
///
/// Snapshots are cheap to clone: the text and line table are held behind
/// `Arc`, so cloning a snapshot never copies document content.
#[derive(Debug, Clone)]
pub struct DocumentSnapshot {
    uri: Arc<str>,
    language: Arc<str>,
    version: i64,
    text: Arc<str>,
    line_table: Arc<LineTable>,
}

impl DocumentSnapshot {
    /// Construct a snapshot, building its line table from `text`.
    pub fn new(uri: impl Into<Arc<str>>, language: impl Into<Arc<str>>, version: i64, text: impl Into<Arc<str>>) -> Self {
        let text = text.into();
        let line_table = Arc::new(LineTable::new(&text));
        Self { uri: uri.into(), language: language.into(), version, text, line_table }
    }

    /// This snapshot's totally ordered identifier.
    pub fn id(&self) -> SnapshotId {
        SnapshotId::new(self.uri.clone(), self.version)
    }

    /// The document's uri.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The document's language identifier (e.g. `"swift"`).
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The document's version.
    pub fn version(&self) -> i64 {
        self.version
    }

    /// The document's full text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The line table derived from this snapshot's text.
    pub fn line_table(&self) -> &LineTable {
        &self.line_table
    }
}
