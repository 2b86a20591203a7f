//! [`GeneratedInterfaceRegistry`]: a refcounted cache of synthesized
//! module-interface documents, with an LRU of size 2 over zero-refcount
//! entries.

use std::collections::VecDeque;

use swift_ls_daemon::{AnalysisDaemon, EditorOpenInterfaceRequest, FindUsrRequest};
use swift_ls_document::DocumentSnapshot;
use swift_ls_position::LinePosition;

use crate::error::RefDocError;

/// Identifies one synthesized module interface.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterfaceDescriptor {
    /// The module to synthesize an interface for.
    pub module: String,
    /// The compiler group to resolve the module against, if any.
    pub group: Option<String>,
    /// Compiler arguments used to resolve the module.
    pub compiler_args: Vec<String>,
    /// The file whose build settings produced `compiler_args`; interfaces
    /// derived from the same origin are reopened together when its build
    /// settings change.
    pub origin_file: String,
}

struct Entry {
    desc: InterfaceDescriptor,
    name: String,
    snapshot: DocumentSnapshot,
    refcount: u32,
}

const ZERO_REFCOUNT_LRU_SIZE: usize = 2;

/// Refcounted synthesized-interface cache.
///
/// Every method takes `&mut self`; callers that share one registry across
/// concurrent tasks must serialize access (e.g. behind `Arc<Mutex<..>>`).
/// Under that discipline, a second caller racing to open the same
/// descriptor naturally blocks on the lock until the first caller has
/// already populated the cache entry, and then simply reuses it — the
/// "losing racer adopts the cached entry" requirement falls out of normal
/// mutual exclusion rather than needing separate single-flight bookkeeping.
#[derive(Default)]
pub struct GeneratedInterfaceRegistry {
    entries: Vec<Entry>,
    zero_refcount_lru: VecDeque<usize>,
    next_name: u64,
}

impl GeneratedInterfaceRegistry {
    /// Construct an empty registry.
    pub fn new() -> Self {
        Self { entries: Vec::new(), zero_refcount_lru: VecDeque::new(), next_name: 0 }
    }

    /// Open (or reuse) the synthesized document for `desc`, incrementing
    /// its refcount. Returns the synthesized snapshot.
    pub async fn open<D: AnalysisDaemon>(&mut self, daemon: &D, desc: InterfaceDescriptor) -> Result<DocumentSnapshot, RefDocError> {
        let (snapshot, _index) = self.open_indexed(daemon, desc).await?;
        Ok(snapshot)
    }

    /// As [`Self::open`], but also returns the entry's index so callers that
    /// need the synthesized daemon name (e.g. [`Self::position_of_usr`])
    /// don't have to re-derive it from `desc` afterward.
    async fn open_indexed<D: AnalysisDaemon>(
        &mut self,
        daemon: &D,
        desc: InterfaceDescriptor,
    ) -> Result<(DocumentSnapshot, usize), RefDocError> {
        if let Some(index) = self.index_of(&desc) {
            self.zero_refcount_lru.retain(|&i| i != index);
            self.entries[index].refcount += 1;
            return Ok((self.entries[index].snapshot.clone(), index));
        }

        let name = format!("generated-interface-{}", self.next_name);
        self.next_name += 1;

        let result = daemon
            .editor_open_interface(EditorOpenInterfaceRequest {
                module: desc.module.clone(),
                group: desc.group.clone(),
                name: name.clone(),
                synthesized_extension: false,
                compiler_args: desc.compiler_args.clone(),
            })
            .await?;

        let uri = format!("swift-generated-interface://generated-interface/{}", desc.module);
        let snapshot = DocumentSnapshot::new(uri, "swift", 0, result.source_text);

        self.entries.push(Entry { desc, name, snapshot: snapshot.clone(), refcount: 1 });
        Ok((snapshot, self.entries.len() - 1))
    }

    /// Peek at the synthesized snapshot for `desc` without affecting its
    /// refcount.
    pub fn snapshot_of(&self, desc: &InterfaceDescriptor) -> Option<DocumentSnapshot> {
        self.index_of(desc).map(|i| self.entries[i].snapshot.clone())
    }

    /// Hold `desc` open for the duration of a *find-USR* request, returning
    /// the position the USR resolves to in the synthesized document.
    pub async fn position_of_usr<D: AnalysisDaemon>(
        &mut self,
        daemon: &D,
        usr: &str,
        desc: InterfaceDescriptor,
    ) -> Result<Option<LinePosition>, RefDocError> {
        let (snapshot, index) = self.open_indexed(daemon, desc.clone()).await?;
        let name = self.entries[index].name.clone();

        let offset = daemon.editor_find_usr(FindUsrRequest { source_file: name, usr: usr.to_string() }).await?;
        self.close(&desc);

        Ok(offset.map(|offset| snapshot.line_table().position_of_utf16(snapshot.text(), offset)))
    }

    /// Release one hold on `desc`. Once its refcount reaches zero it
    /// becomes eligible for eviction under the zero-refcount LRU.
    pub fn close(&mut self, desc: &InterfaceDescriptor) {
        let Some(index) = self.index_of(desc) else { return };
        self.entries[index].refcount = self.entries[index].refcount.saturating_sub(1);
        if self.entries[index].refcount == 0 {
            self.zero_refcount_lru.push_back(index);
            self.evict_surplus();
        }
    }

    /// Close and reopen every interface derived from `origin_file`'s build
    /// settings, because those settings just changed.
    pub async fn reopen_with_settings<D: AnalysisDaemon>(&mut self, daemon: &D, origin_file: &str) -> Result<(), RefDocError> {
        let affected: Vec<(InterfaceDescriptor, u32)> = self
            .entries
            .iter()
            .filter(|e| e.desc.origin_file == origin_file)
            .map(|e| (e.desc.clone(), e.refcount))
            .collect();

        for (desc, refcount) in affected {
            if let Some(index) = self.index_of(&desc) {
                self.entries.remove(index);
                self.zero_refcount_lru.retain(|&i| i != index);
                self.zero_refcount_lru = self.zero_refcount_lru.iter().map(|&i| if i > index { i - 1 } else { i }).collect();
            }
            self.open(daemon, desc.clone()).await?;
            if let Some(index) = self.index_of(&desc) {
                // `open` sets a fresh refcount of 1; restore the holders
                // that survived the close so they don't need to re-open.
                self.entries[index].refcount = refcount;
            }
        }
        Ok(())
    }

    fn index_of(&self, desc: &InterfaceDescriptor) -> Option<usize> {
        self.entries.iter().position(|e| &e.desc == desc)
    }

    fn evict_surplus(&mut self) {
        while self.zero_refcount_lru.len() > ZERO_REFCOUNT_LRU_SIZE {
            if let Some(victim) = self.zero_refcount_lru.pop_front() {
                if victim < self.entries.len() && self.entries[victim].refcount == 0 {
                    self.entries.remove(victim);
                    self.zero_refcount_lru =
                        self.zero_refcount_lru.iter().map(|&i| if i > victim { i - 1 } else { i }).collect();
                }
            }
        }
    }

    /// Number of synthesized documents currently cached (held or not).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no synthesized documents.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
