//! [`SyntaxTreeCache`]: a bounded LRU of parsed trees keyed by snapshot
//! id, with incremental reparse when a registered edit links two
//! snapshots.

use std::collections::VecDeque;

use swift_ls_document::{DocumentSnapshot, SnapshotId, TextEdit};
use swift_ls_position::ByteSpan;

use crate::tree::{incremental_reparse, SyntaxTree};

const MAX_ENTRIES: usize = 5;

struct Entry {
    id: SnapshotId,
    tree: SyntaxTree,
}

/// Maps snapshot id → parsed tree, bounded to [`MAX_ENTRIES`] entries.
/// Entries for the same uri but an older version than one just inserted
/// are dropped eagerly, since they can never be the latest snapshot again.
#[derive(Default)]
pub struct SyntaxTreeCache {
    entries: Vec<Entry>,
    lru: VecDeque<usize>,
}

impl SyntaxTreeCache {
    /// Construct an empty cache.
    pub fn new() -> Self {
        Self { entries: Vec::new(), lru: VecDeque::new() }
    }

    /// Return the tree for `snapshot`, parsing (or incrementally
    /// reparsing) and caching it if not already present.
    ///
    /// When `edit` links `snapshot` to a previously cached pre-snapshot,
    /// the post-snapshot's tree is produced by replaying the edit over the
    /// cached pre-snapshot's tree; otherwise a full parse is performed.
    pub fn tree_for(
        &mut self,
        snapshot: &DocumentSnapshot,
        edit: Option<(&DocumentSnapshot, &[TextEdit])>,
    ) -> SyntaxTree {
        let id = snapshot.id();
        if let Some(index) = self.index_of(&id) {
            self.touch(index);
            return self.entries[index].tree.clone();
        }

        let tree = match edit {
            Some((pre, edits)) => match self.index_of(&pre.id()) {
                Some(pre_index) => {
                    let edit_tuples: Vec<(ByteSpan, String)> =
                        edits.iter().map(|e| (e.range, e.new_text.clone())).collect();
                    incremental_reparse(
                        &self.entries[pre_index].tree,
                        pre.text(),
                        snapshot.text(),
                        &edit_tuples,
                    )
                }
                None => SyntaxTree::parse(snapshot.text()),
            },
            None => SyntaxTree::parse(snapshot.text()),
        };

        self.insert(id, tree.clone());
        tree
    }

    fn index_of(&self, id: &SnapshotId) -> Option<usize> {
        self.entries.iter().position(|e| &e.id == id)
    }

    fn touch(&mut self, index: usize) {
        self.lru.retain(|&i| i != index);
        self.lru.push_back(index);
    }

    fn insert(&mut self, id: SnapshotId, tree: SyntaxTree) {
        // Drop any entry for the same uri with a strictly smaller version;
        // it can never be requested as the latest snapshot again.
        self.entries.retain(|e| !(e.id.uri == id.uri && e.id.version < id.version));
        self.rebuild_lru_after_retain();

        self.entries.push(Entry { id, tree });
        let new_index = self.entries.len() - 1;
        self.lru.push_back(new_index);

        while self.entries.len() > MAX_ENTRIES {
            self.evict_least_recently_used();
        }
    }

    fn rebuild_lru_after_retain(&mut self) {
        self.lru = (0..self.entries.len()).collect();
    }

    fn evict_least_recently_used(&mut self) {
        if let Some(victim) = self.lru.pop_front() {
            if victim < self.entries.len() {
                self.entries.remove(victim);
                self.lru = self.lru.iter().map(|&i| if i > victim { i - 1 } else { i }).collect();
            }
        }
    }

    /// Number of entries currently cached.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(uri: &str, version: i64, text: &str) -> DocumentSnapshot {
        DocumentSnapshot::new(uri, "swift", version, text)
    }

    #[test]
    fn caches_by_snapshot_identity() {
        let mut cache = SyntaxTreeCache::new();
        let s = snap("file:///a.swift", 1, "let x = 1");
        let first = cache.tree_for(&s, None);
        let second = cache.tree_for(&s, None);
        assert_eq!(first.tokens().len(), second.tokens().len());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn evicts_beyond_bound() {
        let mut cache = SyntaxTreeCache::new();
        for i in 0..8 {
            let s = snap(&format!("file:///f{i}.swift"), 1, "let x = 1");
            cache.tree_for(&s, None);
        }
        assert_eq!(cache.len(), MAX_ENTRIES);
    }

    #[test]
    fn older_version_of_same_uri_is_dropped_eagerly() {
        let mut cache = SyntaxTreeCache::new();
        let v1 = snap("file:///a.swift", 1, "let x = 1");
        cache.tree_for(&v1, None);
        let v2 = snap("file:///a.swift", 2, "let x = 12");
        cache.tree_for(&v2, None);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.index_of(&v1.id()), None);
    }

    #[test]
    fn incremental_reparse_matches_full_parse() {
        let mut cache = SyntaxTreeCache::new();
        let pre = snap("file:///a.swift", 1, "let x = 1");
        cache.tree_for(&pre, None);

        let post = snap("file:///a.swift", 2, "let x = 12");
        let edits = vec![TextEdit { range: ByteSpan::new(9, 9), new_text: "2".to_string() }];
        let incremental = cache.tree_for(&post, Some((&pre, &edits)));
        let full = SyntaxTree::parse(post.text());
        assert_eq!(incremental.tokens().len(), full.tokens().len());
    }
}
