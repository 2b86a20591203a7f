//! [`MacroExpansionCache`]: a bounded LRU mapping `(snapshot, range,
//! build settings)` to the analysis daemon's macro-expansion edits.

use std::collections::VecDeque;

use swift_ls_daemon::{AnalysisDaemon, CompileContext, RefactoringEdit};
use swift_ls_diagnostics::BuildSettings;
use swift_ls_document::{DocumentSnapshot, SnapshotId};
use swift_ls_position::ByteSpan;

use crate::error::RefDocError;

const MAX_ENTRIES: usize = 10;

#[derive(PartialEq, Eq, Clone)]
struct CacheKey {
    snapshot_id: SnapshotId,
    range: ByteSpan,
    build_settings: BuildSettings,
}

struct Entry {
    key: CacheKey,
    edits: Vec<RefactoringEdit>,
}

/// Bounded LRU of macro-expansion edits, sized to accommodate deeply nested
/// expansions without thrashing.
#[derive(Default)]
pub struct MacroExpansionCache {
    entries: Vec<Entry>,
    lru: VecDeque<usize>,
}

impl MacroExpansionCache {
    /// Construct an empty cache.
    pub fn new() -> Self {
        Self { entries: Vec::new(), lru: VecDeque::new() }
    }

    /// Return the expansion edits for `range` within `snapshot`, issuing a
    /// macro-expansion request to `daemon` on a cache miss.
    ///
    /// Edits with no `buffer_name` and non-empty `new_text` indicate
    /// partial data from the daemon; they are logged but still returned.
    pub async fn expansions_for<D: AnalysisDaemon>(
        &mut self,
        daemon: &D,
        snapshot: &DocumentSnapshot,
        range: ByteSpan,
        build_settings: BuildSettings,
    ) -> Result<Vec<RefactoringEdit>, RefDocError> {
        let key = CacheKey { snapshot_id: snapshot.id(), range, build_settings };
        if let Some(index) = self.index_of(&key) {
            self.touch(index);
            return Ok(self.entries[index].edits.clone());
        }

        let context = CompileContext {
            source_file: snapshot.uri().to_string(),
            primary_file: snapshot.uri().to_string(),
            compiler_args: match &key.build_settings {
                BuildSettings::Real(args) => args.clone(),
                BuildSettings::Fallback => Vec::new(),
            },
        };
        let edits = daemon.expand_macro(context, range).await?;

        for edit in &edits {
            if edit.buffer_name.is_none() && !edit.new_text.is_empty() {
                tracing::warn!(uri = %snapshot.uri(), "macro expansion returned partial data with no buffer name");
            }
        }

        self.insert(key, edits.clone());
        Ok(edits)
    }

    fn index_of(&self, key: &CacheKey) -> Option<usize> {
        self.entries.iter().position(|e| &e.key == key)
    }

    fn touch(&mut self, index: usize) {
        self.lru.retain(|&i| i != index);
        self.lru.push_back(index);
    }

    fn insert(&mut self, key: CacheKey, edits: Vec<RefactoringEdit>) {
        self.entries.push(Entry { key, edits });
        let new_index = self.entries.len() - 1;
        self.lru.push_back(new_index);

        while self.entries.len() > MAX_ENTRIES {
            self.evict_least_recently_used();
        }
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
    use pretty_assertions::assert_eq;
    use swift_ls_daemon::{
        CodeCompleteOpenRequest, CodeCompleteUpdateRequest, CompoundRenameName, CursorInfoRequest, CursorInfoResult,
        DaemonCompletionItem, DaemonError, DiagnosticsRequest, EditorOpenInterfaceRequest, EditorOpenRequest,
        EditorReplaceTextRequest, FindUsrRequest, InterfaceResult, RelatedIdentifiersRequest, RelatedIdentifiersResult,
        SemanticRefactoringRequest, SyntacticRenameRangesRequest,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeDaemon {
        calls: AtomicUsize,
    }

    impl AnalysisDaemon for FakeDaemon {
        async fn editor_open(&self, _: EditorOpenRequest) -> Result<(), DaemonError> {
            Ok(())
        }
        async fn editor_close(&self, _: &str) -> Result<(), DaemonError> {
            Ok(())
        }
        async fn editor_replace_text(&self, _: EditorReplaceTextRequest) -> Result<(), DaemonError> {
            Ok(())
        }
        async fn cursor_info(&self, _: CursorInfoRequest) -> Result<CursorInfoResult, DaemonError> {
            Ok(CursorInfoResult::default())
        }
        async fn code_complete_open(&self, _: CodeCompleteOpenRequest) -> Result<Vec<DaemonCompletionItem>, DaemonError> {
            Ok(vec![])
        }
        async fn code_complete_update(&self, _: CodeCompleteUpdateRequest) -> Result<Vec<DaemonCompletionItem>, DaemonError> {
            Ok(vec![])
        }
        async fn code_complete_close(&self, _: &str) -> Result<(), DaemonError> {
            Ok(())
        }
        async fn related_identifiers(&self, _: RelatedIdentifiersRequest) -> Result<RelatedIdentifiersResult, DaemonError> {
            Ok(RelatedIdentifiersResult { ranges: vec![], compound_old_name: String::new() })
        }
        async fn find_syntactic_rename_ranges(
            &self,
            _: SyntacticRenameRangesRequest,
        ) -> Result<Vec<CompoundRenameName>, DaemonError> {
            Ok(vec![])
        }
        async fn semantic_refactoring(&self, _: SemanticRefactoringRequest) -> Result<Vec<RefactoringEdit>, DaemonError> {
            Ok(vec![])
        }
        async fn editor_open_interface(&self, _: EditorOpenInterfaceRequest) -> Result<InterfaceResult, DaemonError> {
            Ok(InterfaceResult { source_text: String::new() })
        }
        async fn editor_find_usr(&self, _: FindUsrRequest) -> Result<Option<usize>, DaemonError> {
            Ok(None)
        }
        async fn diagnostics(&self, _: DiagnosticsRequest) -> Result<Vec<swift_ls_daemon::DaemonDiagnostic>, DaemonError> {
            Ok(vec![])
        }
        async fn expand_macro(&self, _: CompileContext, _: ByteSpan) -> Result<Vec<RefactoringEdit>, DaemonError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Ok(vec![RefactoringEdit { range: ByteSpan::new(0, 1), new_text: "x".to_string(), buffer_name: Some("buf".to_string()) }])
        }
    }

    #[tokio::test]
    async fn second_request_for_same_key_is_a_cache_hit() {
        let daemon = FakeDaemon::default();
        let mut cache = MacroExpansionCache::new();
        let snapshot = DocumentSnapshot::new("file:///a.swift", "swift", 1, "#stringify(1)");
        let range = ByteSpan::new(0, 5);

        cache.expansions_for(&daemon, &snapshot, range, BuildSettings::Fallback).await.unwrap();
        cache.expansions_for(&daemon, &snapshot, range, BuildSettings::Fallback).await.unwrap();
        assert_eq!(daemon.calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn differing_build_settings_are_a_distinct_key() {
        let daemon = FakeDaemon::default();
        let mut cache = MacroExpansionCache::new();
        let snapshot = DocumentSnapshot::new("file:///a.swift", "swift", 1, "#stringify(1)");
        let range = ByteSpan::new(0, 5);

        cache.expansions_for(&daemon, &snapshot, range, BuildSettings::Fallback).await.unwrap();
        cache.expansions_for(&daemon, &snapshot, range, BuildSettings::Real(vec!["-sdk".into()])).await.unwrap();
        assert_eq!(daemon.calls.load(Ordering::Relaxed), 2);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn evicts_beyond_bound() {
        let daemon = FakeDaemon::default();
        let mut cache = MacroExpansionCache::new();
        for i in 0..15 {
            let snapshot = DocumentSnapshot::new(format!("file:///f{i}.swift"), "swift", 1, "#stringify(1)");
            cache
                .expansions_for(&daemon, &snapshot, ByteSpan::new(0, 5), BuildSettings::Fallback)
                .await
                .unwrap();
        }
        assert_eq!(cache.len(), MAX_ENTRIES);
    }
}
