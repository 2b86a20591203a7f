//! [`DocumentManager`]: the ordered map of open documents and the single
//! place incremental edits are applied and normalized.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use swift_ls_position::{ByteSpan, Column, LinePosition};

use crate::error::DocumentError;
use crate::snapshot::DocumentSnapshot;

/// One editor-supplied change: either a full-text replacement, or a
/// `(range, replacement)` pair. Ranges are given in zero-based
/// `(line, utf16_column)` coordinates, matching the LSP wire encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Replace the entire document text.
    Full(String),
    /// Replace the text within `start..end` with `replacement`.
    Ranged {
        /// Inclusive start position, in `(line, utf16_column)`.
        start: (u32, u32),
        /// Exclusive end position, in `(line, utf16_column)`.
        end: (u32, u32),
        /// Text to insert in place of the replaced range.
        replacement: String,
    },
}

/// A single normalized edit, with its range expressed in the pre-edit
/// snapshot's byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// The byte range replaced, in pre-edit snapshot coordinates.
    pub range: ByteSpan,
    /// The text that replaced it.
    pub new_text: String,
}

/// Ordered map of uri → latest open snapshot. Applies open/change/close
/// events and produces normalized `(pre, post, edits)` triples for
/// subscribers such as `SyntaxTreeCache`.
#[derive(Debug, Default)]
pub struct DocumentManager {
    open: FxHashMap<Arc<str>, DocumentSnapshot>,
}

impl DocumentManager {
    /// Construct an empty manager with no open documents.
    pub fn new() -> Self {
        Self { open: FxHashMap::default() }
    }

    /// Open `uri` at `version` with `text`. Fails with
    /// [`DocumentError::Duplicate`] if already open.
    pub fn open(
        &mut self,
        uri: impl Into<Arc<str>>,
        language: impl Into<Arc<str>>,
        version: i64,
        text: impl Into<Arc<str>>,
    ) -> Result<DocumentSnapshot, DocumentError> {
        let uri = uri.into();
        if self.open.contains_key(&uri) {
            return Err(DocumentError::Duplicate(uri.to_string()));
        }
        let snapshot = DocumentSnapshot::new(uri.clone(), language, version, text);
        self.open.insert(uri, snapshot.clone());
        Ok(snapshot)
    }

    /// Apply a batch of `changes` to `uri`, producing the pre-edit snapshot,
    /// the post-edit snapshot (at `version`), and the normalized edit set
    /// (offsets expressed against the pre-edit snapshot).
    ///
    /// Fails with [`DocumentError::Unknown`] if `uri` is not open, with
    /// [`DocumentError::StaleEdit`] if `version` does not strictly exceed
    /// the current version, or with [`DocumentError::InvalidRange`] if any
    /// change's range does not resolve within the document as it stood
    /// immediately before that change was applied.
    pub fn change(
        &mut self,
        uri: &str,
        version: i64,
        changes: &[Change],
    ) -> Result<(DocumentSnapshot, DocumentSnapshot, Vec<TextEdit>), DocumentError> {
        let pre = self.open.get(uri).cloned().ok_or_else(|| DocumentError::Unknown(uri.to_string()))?;
        if version <= pre.version() {
            return Err(DocumentError::StaleEdit { uri: uri.to_string(), given: version, current: pre.version() });
        }

        let mut working_text = pre.text().to_string();
        let mut edits = Vec::with_capacity(changes.len());
        // Net number of bytes inserted so far, used to translate a range
        // computed against `working_text` back into pre-snapshot
        // coordinates. Correct when changes are supplied in increasing
        // position order, which is how editors emit multi-change batches.
        let mut shift: i64 = 0;

        for change in changes {
            match change {
                Change::Full(new_text) => {
                    let original_span = ByteSpan::whole(pre.text().len());
                    edits.push(TextEdit { range: original_span, new_text: new_text.clone() });
                    working_text = new_text.clone();
                    shift = 0;
                }
                Change::Ranged { start, end, replacement } => {
                    let table = swift_ls_position::LineTable::new(&working_text);
                    if !table.line_in_bounds(start.0) || !table.line_in_bounds(end.0) {
                        return Err(DocumentError::InvalidRange { uri: uri.to_string(), version: pre.version() });
                    }
                    let start_offset = table.utf8_offset_of(
                        &working_text,
                        LinePosition { line: start.0, column: Column::Utf16(start.1) },
                    );
                    let end_offset = table.utf8_offset_of(
                        &working_text,
                        LinePosition { line: end.0, column: Column::Utf16(end.1) },
                    );
                    if start_offset > working_text.len()
                        || end_offset > working_text.len()
                        || start_offset > end_offset
                    {
                        return Err(DocumentError::InvalidRange { uri: uri.to_string(), version: pre.version() });
                    }

                    let original_start = (start_offset as i64 - shift).max(0) as usize;
                    let original_end = (end_offset as i64 - shift).max(0) as usize;
                    if original_start > pre.text().len() || original_end > pre.text().len() {
                        return Err(DocumentError::InvalidRange { uri: uri.to_string(), version: pre.version() });
                    }
                    edits.push(TextEdit {
                        range: ByteSpan::new(original_start, original_end),
                        new_text: replacement.clone(),
                    });

                    working_text.replace_range(start_offset..end_offset, replacement);
                    shift += replacement.len() as i64 - (end_offset as i64 - start_offset as i64);
                }
            }
        }

        let post = DocumentSnapshot::new(pre.uri().to_string(), pre.language().to_string(), version, working_text);
        self.open.insert(Arc::from(uri), post.clone());
        tracing::debug!(uri, version, edits = edits.len(), "applied document change");
        Ok((pre, post, edits))
    }

    /// Remove `uri` from the open set. Idempotent: closing a uri that is
    /// not open is not an error.
    pub fn close(&mut self, uri: &str) {
        self.open.remove(uri);
    }

    /// The latest snapshot for `uri`, or [`DocumentError::Unknown`] if it
    /// is not open.
    pub fn latest_snapshot(&self, uri: &str) -> Result<DocumentSnapshot, DocumentError> {
        self.open.get(uri).cloned().ok_or_else(|| DocumentError::Unknown(uri.to_string()))
    }

    /// The latest snapshot for `uri` if open, otherwise a synthetic
    /// version-0 snapshot read from disk via `swift_ls_uri::uri_to_fs_path`.
    pub fn latest_snapshot_or_disk(
        &self,
        uri: &str,
        language: impl Into<Arc<str>>,
    ) -> Result<DocumentSnapshot, DocumentError> {
        if let Some(snapshot) = self.open.get(uri) {
            return Ok(snapshot.clone());
        }
        let path = swift_ls_uri::uri_to_fs_path(uri)
            .ok_or_else(|| DocumentError::DiskReadFailed { uri: uri.to_string(), reason: "not a file uri".to_string() })?;
        let text = std::fs::read_to_string(&path)
            .map_err(|e| DocumentError::DiskReadFailed { uri: uri.to_string(), reason: e.to_string() })?;
        Ok(DocumentSnapshot::new(uri.to_string(), language, 0, text))
    }

    /// Whether `uri` currently has an open snapshot.
    pub fn is_open(&self, uri: &str) -> bool {
        self.open.contains_key(uri)
    }

    /// The uris of every currently open document, in no particular order.
    pub fn open_uris(&self) -> impl Iterator<Item = &str> {
        self.open.keys().map(|uri| uri.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_then_duplicate_open_fails() {
        let mut mgr = DocumentManager::new();
        mgr.open("file:///a.swift", "swift", 1, "let x = 1").unwrap();
        let err = mgr.open("file:///a.swift", "swift", 1, "let x = 1").unwrap_err();
        assert_eq!(err, DocumentError::Duplicate("file:///a.swift".to_string()));
    }

    #[test]
    fn change_on_unopened_document_is_unknown() {
        let mut mgr = DocumentManager::new();
        let err = mgr.change("file:///missing.swift", 2, &[Change::Full("x".to_string())]).unwrap_err();
        assert_eq!(err, DocumentError::Unknown("file:///missing.swift".to_string()));
    }

    #[test]
    fn change_requires_strictly_increasing_version() {
        let mut mgr = DocumentManager::new();
        mgr.open("file:///a.swift", "swift", 5, "a").unwrap();
        let err = mgr.change("file:///a.swift", 5, &[Change::Full("b".to_string())]).unwrap_err();
        assert_eq!(err, DocumentError::StaleEdit { uri: "file:///a.swift".to_string(), given: 5, current: 5 });
    }

    #[test]
    fn full_replacement_change_produces_pre_and_post() {
        let mut mgr = DocumentManager::new();
        mgr.open("file:///a.swift", "swift", 1, "old").unwrap();
        let (pre, post, edits) = mgr.change("file:///a.swift", 2, &[Change::Full("new".to_string())]).unwrap();
        assert_eq!(pre.text(), "old");
        assert_eq!(post.text(), "new");
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].range, ByteSpan::whole(3));
    }

    #[test]
    fn ranged_change_replaces_in_place() {
        let mut mgr = DocumentManager::new();
        mgr.open("file:///a.swift", "swift", 1, "let x = 1").unwrap();
        let (_, post, edits) = mgr
            .change(
                "file:///a.swift",
                2,
                &[Change::Ranged { start: (0, 8), end: (0, 9), replacement: "2".to_string() }],
            )
            .unwrap();
        assert_eq!(post.text(), "let x = 2");
        assert_eq!(edits[0].range, ByteSpan::new(8, 9));
    }

    #[test]
    fn out_of_bounds_range_is_invalid() {
        let mut mgr = DocumentManager::new();
        mgr.open("file:///a.swift", "swift", 1, "short").unwrap();
        let err = mgr
            .change(
                "file:///a.swift",
                2,
                &[Change::Ranged { start: (5, 0), end: (5, 1), replacement: "x".to_string() }],
            )
            .unwrap_err();
        assert!(matches!(err, DocumentError::InvalidRange { .. }));
    }

    #[test]
    fn close_is_idempotent_and_subsequent_change_is_unknown() {
        let mut mgr = DocumentManager::new();
        mgr.open("file:///a.swift", "swift", 1, "x").unwrap();
        mgr.close("file:///a.swift");
        mgr.close("file:///a.swift");
        let err = mgr.change("file:///a.swift", 2, &[Change::Full("y".to_string())]).unwrap_err();
        assert_eq!(err, DocumentError::Unknown("file:///a.swift".to_string()));
    }

    #[test]
    fn latest_snapshot_or_disk_reads_closed_document_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.swift");
        std::fs::write(&path, "let x = 1").unwrap();
        let uri = swift_ls_uri::fs_path_to_uri(&path).unwrap();

        let mgr = DocumentManager::new();
        let snapshot = mgr.latest_snapshot_or_disk(&uri, "swift").unwrap();
        assert_eq!(snapshot.version(), 0);
        assert_eq!(snapshot.text(), "let x = 1");
    }
}
