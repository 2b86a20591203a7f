//! The core request-coordination engine: owns a `DocumentManager`, the
//! syntax and diagnostic caches, the completion session, and the
//! reference-document subsystems, wiring them into the operations the
//! outer shell invokes.

mod error;

pub use error::CoreError;

use std::collections::HashMap;
use std::time::Duration;

use swift_ls_completion::{CompletionItem, CompletionSession, SessionKey};
use swift_ls_daemon::{
    AnalysisDaemon, CancellationToken, CompileContext, ConnectionState, CursorInfoRequest, CursorInfoResult,
    EditorOpenRequest, EditorReplaceTextRequest, RefactoringEdit, RelatedIdentifiersRequest, SemanticRefactoringRequest,
};
#[cfg(test)]
use swift_ls_daemon::DaemonError;
use swift_ls_diagnostics::{BuildSettings, Diagnostic, DiagnosticEngine, DiagnosticReport};
use swift_ls_document::{Change, DocumentManager, DocumentSnapshot};
use swift_ls_position::{ByteSpan, Column, LinePosition};
use swift_ls_refdocs::{GeneratedInterfaceRegistry, InterfaceDescriptor, MacroExpansionCache};
use swift_ls_rename::{TextEdit, WorkspaceEdit};
use swift_ls_syntax::SyntaxTreeCache;
use swift_ls_uri::{DocumentUri, GeneratedInterfaceRef, LineCol, LineCol1, MacroExpansionRef, VirtualUri};

/// Symbol information rendered from a *cursor-info* response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolInfo {
    pub description: String,
    pub kind: Option<String>,
    pub usr: Option<String>,
}

/// The fixed catalog of refactor actions the daemon is probed with for a
/// *code_actions* request. There is no daemon request to list applicable
/// actions at a location; instead, as in the editors this engine's daemon
/// protocol is modeled on, the client (here, the core) holds a static
/// table of known action identifiers and probes each one, keeping only
/// those that come back with a non-empty edit set.
const REFACTOR_ACTIONS: &[(&str, &str)] = &[
    ("source.refactoring.kind.extract.function", "Extract Function"),
    ("source.refactoring.kind.extract.expr", "Extract Expression"),
    ("source.refactoring.kind.extract.var", "Extract Variable"),
    ("source.refactoring.kind.fillprotocolstub", "Fill Protocol Stub"),
    ("source.refactoring.kind.localize.string", "Localize String"),
];

/// The kind of a [`CodeAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeActionKind {
    /// Addresses a specific diagnostic.
    QuickFix,
    /// A daemon-provided semantic refactoring.
    Refactor,
}

/// One action offered to the editor for a `code_actions` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeAction {
    pub title: String,
    pub kind: CodeActionKind,
    pub edit: Option<WorkspaceEdit>,
    pub diagnostics: Vec<Diagnostic>,
}

/// The core engine. Generic over the analysis-daemon connection so tests
/// can substitute a fake without touching any production code path.
pub struct Core<D: AnalysisDaemon> {
    daemon: D,
    documents: DocumentManager,
    trees: SyntaxTreeCache,
    diagnostics: DiagnosticEngine,
    completion: CompletionSession,
    macro_cache: MacroExpansionCache,
    interfaces: GeneratedInterfaceRegistry,
    connection_state: ConnectionState,
    macro_buffers: HashMap<String, String>,
    interface_descs: HashMap<String, InterfaceDescriptor>,
}

impl<D: AnalysisDaemon> Core<D> {
    /// Construct a core around `daemon`, with the given diagnostic
    /// debounce delay.
    pub fn new(daemon: D, diagnostic_debounce: Duration) -> Self {
        Self {
            daemon,
            documents: DocumentManager::new(),
            trees: SyntaxTreeCache::new(),
            diagnostics: DiagnosticEngine::new(diagnostic_debounce),
            completion: CompletionSession::new(),
            macro_cache: MacroExpansionCache::new(),
            interfaces: GeneratedInterfaceRegistry::new(),
            connection_state: ConnectionState::Connected,
            macro_buffers: HashMap::new(),
            interface_descs: HashMap::new(),
        }
    }

    /// The current connection state.
    pub fn connection_state(&self) -> ConnectionState {
        self.connection_state
    }

    // -- document lifecycle -------------------------------------------------

    /// Open `uri` with its initial text, registering it with the daemon.
    pub async fn open_document(
        &mut self,
        uri: &str,
        language: &str,
        version: i64,
        text: String,
        compiler_args: Vec<String>,
    ) -> Result<DocumentSnapshot, CoreError> {
        self.daemon
            .editor_open(EditorOpenRequest { uri: uri.to_string(), source_text: text.clone(), compiler_args })
            .await?;
        Ok(self.documents.open(uri, language, version, text)?)
    }

    /// Apply `changes` to `uri`, propagating each normalized edit to the
    /// daemon and refreshing the cached syntax tree.
    pub async fn change_document(
        &mut self,
        uri: &str,
        version: i64,
        changes: &[Change],
    ) -> Result<DocumentSnapshot, CoreError> {
        let (pre, post, edits) = self.documents.change(uri, version, changes)?;
        for edit in &edits {
            self.daemon
                .editor_replace_text(EditorReplaceTextRequest {
                    uri: uri.to_string(),
                    range: edit.range,
                    replacement: edit.new_text.clone(),
                })
                .await?;
        }
        self.trees.tree_for(&post, Some((&pre, &edits)));
        Ok(post)
    }

    /// Close `uri`, unregistering it from the daemon.
    pub async fn close_document(&mut self, uri: &str) -> Result<(), CoreError> {
        self.daemon.editor_close(uri).await?;
        self.documents.close(uri);
        Ok(())
    }

    // -- diagnostics ----------------------------------------------------

    /// Begin a debounced diagnostic publish cycle for `uri`, returning the
    /// cancellation token and the debounce delay the caller should sleep
    /// before calling [`Self::diagnostics`].
    pub fn begin_diagnostics(&mut self, uri: &str) -> (CancellationToken, Duration) {
        (self.diagnostics.begin_publish(uri), self.diagnostics.debounce())
    }

    /// Produce the diagnostic report for `uri`'s latest snapshot.
    pub async fn diagnostics(
        &mut self,
        uri: &str,
        build_settings: BuildSettings,
        token: &CancellationToken,
    ) -> Result<DiagnosticReport, CoreError> {
        let snapshot = self.documents.latest_snapshot(uri)?;
        Ok(self.diagnostics.report_for(&self.daemon, &snapshot, build_settings, token).await?)
    }

    // -- completion -------------------------------------------------------

    /// Run a completion request through the single completion session.
    #[allow(clippy::too_many_arguments)]
    pub async fn completion(
        &mut self,
        uri: &str,
        completion_pos: (u32, u32),
        utf8_start: usize,
        compile_cmd: Vec<String>,
        filter_text: &str,
        client_snippet_support: bool,
        must_reuse: bool,
    ) -> Result<Vec<CompletionItem>, CoreError> {
        let snapshot = self.documents.latest_snapshot(uri)?;
        let key = SessionKey { uri: uri.to_string(), utf8_start, completion_pos, compile_cmd, client_snippet_support };
        let options = if must_reuse { vec!["must_reuse".to_string()] } else { Vec::new() };
        Ok(self.completion.completion_list(&self.daemon, snapshot.text(), key, filter_text, &options).await?)
    }

    // -- hover / symbol info ----------------------------------------------

    /// Render hover documentation for the symbol at `offset` in `uri`.
    pub async fn hover(&self, uri: &str, offset: usize, compiler_args: Vec<String>) -> Result<Option<String>, CoreError> {
        let info = self.cursor_info(uri, offset, 0, compiler_args).await?;
        if info.description.is_empty() {
            return Ok(None);
        }
        let mut rendered = format!("```swift\n{}\n```", info.description);
        if let Some(doc) = &info.doc_comment {
            rendered.push_str("\n\n");
            rendered.push_str(doc);
        }
        Ok(Some(rendered))
    }

    /// Symbol details at `offset` in `uri`.
    pub async fn symbol_info(
        &self,
        uri: &str,
        offset: usize,
        compiler_args: Vec<String>,
    ) -> Result<Vec<SymbolInfo>, CoreError> {
        let info = self.cursor_info(uri, offset, 0, compiler_args).await?;
        if info.description.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![SymbolInfo { description: info.description, kind: info.kind, usr: info.usr }])
    }

    async fn cursor_info(
        &self,
        uri: &str,
        offset: usize,
        length: usize,
        compiler_args: Vec<String>,
    ) -> Result<CursorInfoResult, CoreError> {
        self.documents.latest_snapshot(uri)?;
        let context = CompileContext { source_file: uri.to_string(), primary_file: uri.to_string(), compiler_args };
        Ok(self
            .daemon
            .cursor_info(CursorInfoRequest { offset, length, context, retrieve_symbol_graph: false })
            .await?)
    }

    /// Ranges related to the identifier at `offset`, for document highlight.
    pub async fn document_highlight(
        &self,
        uri: &str,
        offset: usize,
        compiler_args: Vec<String>,
    ) -> Result<Vec<ByteSpan>, CoreError> {
        self.documents.latest_snapshot(uri)?;
        let context = CompileContext { source_file: uri.to_string(), primary_file: uri.to_string(), compiler_args };
        let result = self
            .daemon
            .related_identifiers(RelatedIdentifiersRequest { offset, context, include_non_editable_base_names: true })
            .await?;
        Ok(result.ranges)
    }

    /// Encode `uri`'s tokens (within `range`, or the whole document if
    /// `None`) as a flat delta-encoded semantic-tokens array.
    pub fn semantic_tokens(&mut self, uri: &str, range: Option<ByteSpan>) -> Result<Vec<u32>, CoreError> {
        let snapshot = self.documents.latest_snapshot(uri)?;
        let tree = self.trees.tree_for(&snapshot, None);
        Ok(swift_ls_syntax::encode_semantic_tokens(&tree, snapshot.text(), snapshot.line_table(), range))
    }

    /// The union of quick-fixes derived from `uri`'s last-published
    /// diagnostics overlapping `range`, and semantic refactorings the
    /// daemon reports as applicable at `range`'s start.
    pub async fn code_actions(
        &mut self,
        uri: &str,
        range: ByteSpan,
        compiler_args: Vec<String>,
    ) -> Result<Vec<CodeAction>, CoreError> {
        self.documents.latest_snapshot(uri)?;

        let mut actions = Vec::new();
        if let Some(report) = self.diagnostics.cached_report(uri) {
            for diagnostic in report.all() {
                if diagnostic.range.overlaps(range) {
                    actions.push(CodeAction {
                        title: diagnostic.message.clone(),
                        kind: CodeActionKind::QuickFix,
                        edit: None,
                        diagnostics: vec![diagnostic.clone()],
                    });
                }
            }
        }

        for (action_uid, title) in REFACTOR_ACTIONS {
            let context = CompileContext {
                source_file: uri.to_string(),
                primary_file: uri.to_string(),
                compiler_args: compiler_args.clone(),
            };
            let edits = self
                .daemon
                .semantic_refactoring(SemanticRefactoringRequest {
                    action_uid: (*action_uid).to_string(),
                    offset: range.start,
                    length: range.len(),
                    context,
                })
                .await?;
            if edits.is_empty() {
                continue;
            }
            actions.push(CodeAction {
                title: (*title).to_string(),
                kind: CodeActionKind::Refactor,
                edit: Some(WorkspaceEdit { edits: edits.into_iter().map(refactoring_edit_to_text_edit).collect() }),
                diagnostics: Vec::new(),
            });
        }

        Ok(actions)
    }

    /// Execute `action_uid` (as surfaced by [`Self::code_actions`]) at
    /// `range` in `uri`, returning the edit the outer shell should apply
    /// back to the editor.
    pub async fn execute_command(
        &self,
        uri: &str,
        action_uid: &str,
        range: ByteSpan,
        compiler_args: Vec<String>,
    ) -> Result<WorkspaceEdit, CoreError> {
        self.documents.latest_snapshot(uri)?;
        let context = CompileContext { source_file: uri.to_string(), primary_file: uri.to_string(), compiler_args };
        let edits = self
            .daemon
            .semantic_refactoring(SemanticRefactoringRequest {
                action_uid: action_uid.to_string(),
                offset: range.start,
                length: range.len(),
                context,
            })
            .await?;
        Ok(WorkspaceEdit { edits: edits.into_iter().map(refactoring_edit_to_text_edit).collect() })
    }

    // -- rename -----------------------------------------------------------

    /// Run the rename algorithm for the identifier at `offset` in `uri`.
    pub async fn rename(
        &self,
        uri: &str,
        offset: usize,
        compiler_args: Vec<String>,
        new_name: &str,
    ) -> Result<WorkspaceEdit, CoreError> {
        let snapshot = self.documents.latest_snapshot(uri)?;
        Ok(swift_ls_rename::rename(&self.daemon, uri, snapshot.text(), offset, compiler_args, new_name).await?)
    }

    // -- reference documents ------------------------------------------------

    /// Open a synthesized interface for `module`, optionally resolving
    /// `symbol_usr`'s position within it.
    pub async fn open_generated_interface(
        &mut self,
        module: &str,
        group: Option<String>,
        compiler_args: Vec<String>,
        origin_file: &str,
        symbol_usr: Option<&str>,
    ) -> Result<(String, Option<LinePosition>), CoreError> {
        let desc = InterfaceDescriptor {
            module: module.to_string(),
            group: group.clone(),
            compiler_args,
            origin_file: origin_file.to_string(),
        };

        let position = match symbol_usr {
            Some(usr) => self.interfaces.position_of_usr(&self.daemon, usr, desc.clone()).await?,
            None => {
                self.interfaces.open(&self.daemon, desc.clone()).await?;
                None
            }
        };

        let uri_ref = GeneratedInterfaceRef {
            scheme: "swift-lsp".to_string(),
            display_name: module.to_string(),
            module: module.to_string(),
            group,
            primary_file: DocumentUri::File(origin_file.to_string()),
        };
        let encoded = uri_ref.encode();
        self.interface_descs.insert(encoded.clone(), desc);
        Ok((encoded, position))
    }

    /// The text contents of a virtual reference document.
    pub fn get_reference_document(&self, uri: &str) -> Result<String, CoreError> {
        let parsed = DocumentUri::parse(uri)?;
        match parsed {
            DocumentUri::Virtual(VirtualUri::GeneratedInterface(_)) => {
                let desc = self
                    .interface_descs
                    .get(uri)
                    .ok_or_else(|| CoreError::UnknownDocument(uri.to_string()))?;
                self.interfaces
                    .snapshot_of(desc)
                    .map(|s| s.text().to_string())
                    .ok_or_else(|| CoreError::UnknownDocument(uri.to_string()))
            }
            DocumentUri::Virtual(VirtualUri::MacroExpansion(r)) => self
                .macro_buffers
                .get(&r.buffer_name)
                .cloned()
                .ok_or_else(|| CoreError::UnknownDocument(uri.to_string())),
            DocumentUri::File(_) => Err(CoreError::UnknownDocument(uri.to_string())),
        }
    }

    /// Expand the macro occurring at `range` in `uri`, returning the
    /// virtual-document uris of the produced expansion buffers.
    pub async fn macro_expansion(
        &mut self,
        uri: &str,
        range: ByteSpan,
        build_settings: BuildSettings,
    ) -> Result<Vec<String>, CoreError> {
        let snapshot = self.documents.latest_snapshot(uri)?;
        let edits = self.macro_cache.expansions_for(&self.daemon, &snapshot, range, build_settings).await?;

        let table = snapshot.line_table();
        let text = snapshot.text();
        let mut uris = Vec::new();
        for edit in &edits {
            let Some(buffer_name) = &edit.buffer_name else { continue };
            self.macro_buffers.insert(buffer_name.clone(), edit.new_text.clone());

            let start = table.position_of_utf16(text, edit.range.start);
            let end = table.position_of_utf16(text, edit.range.end);

            let macro_ref = MacroExpansionRef {
                scheme: "swift-lsp".to_string(),
                edit_range: (to_line_col1(start), to_line_col1(end)),
                ext: "swift".to_string(),
                parent_selection_range: (to_line_col(start), to_line_col(end)),
                buffer_name: buffer_name.clone(),
                parent: Box::new(DocumentUri::File(uri.to_string())),
            };
            uris.push(macro_ref.encode());
        }
        Ok(uris)
    }

    // -- connection lifecycle ----------------------------------------------

    /// Handle a *connection-interrupted* notification: resets the document
    /// manager and returns the uris the outer shell must reopen.
    pub fn connection_interrupted(&mut self) -> Vec<String> {
        self.connection_state = self.connection_state.on_connection_interrupted();
        let uris: Vec<String> = self.documents.open_uris().map(str::to_string).collect();
        self.documents = DocumentManager::new();
        uris
    }

    /// Handle a *semantic-enabled* notification.
    pub fn semantic_enabled(&mut self) {
        self.connection_state = self.connection_state.on_semantic_enabled();
    }
}

fn column_value(column: Column) -> u32 {
    match column {
        Column::Utf16(c) => c,
        Column::Utf8(c) => c,
    }
}

fn to_line_col(position: LinePosition) -> LineCol {
    LineCol::new(position.line, column_value(position.column))
}

fn to_line_col1(position: LinePosition) -> LineCol1 {
    LineCol1::new(position.line + 1, column_value(position.column) + 1)
}

fn refactoring_edit_to_text_edit(edit: RefactoringEdit) -> TextEdit {
    TextEdit { range: edit.range, new_text: edit.new_text }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use swift_ls_daemon::{
        CodeCompleteOpenRequest, CodeCompleteUpdateRequest, CompoundRenameName, DaemonDiagnostic, DiagnosticsRequest,
        EditorOpenInterfaceRequest, FindUsrRequest, InterfaceResult, RelatedIdentifiersResult,
        SyntacticRenameRangesRequest,
    };

    struct FakeDaemon {
        cursor_info: CursorInfoResult,
        related_ranges: Vec<ByteSpan>,
        old_name: String,
        rename_occurrences: Vec<CompoundRenameName>,
        interface_text: String,
        find_usr_offset: Option<usize>,
        macro_edits: Vec<RefactoringEdit>,
        refactor_edits: Vec<RefactoringEdit>,
        daemon_diagnostics: Vec<DaemonDiagnostic>,
    }

    impl Default for FakeDaemon {
        fn default() -> Self {
            Self {
                cursor_info: CursorInfoResult::default(),
                related_ranges: Vec::new(),
                old_name: String::new(),
                rename_occurrences: Vec::new(),
                interface_text: String::new(),
                find_usr_offset: None,
                macro_edits: Vec::new(),
                refactor_edits: Vec::new(),
                daemon_diagnostics: Vec::new(),
            }
        }
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
            Ok(self.cursor_info.clone())
        }
        async fn code_complete_open(&self, _: CodeCompleteOpenRequest) -> Result<Vec<swift_ls_daemon::DaemonCompletionItem>, DaemonError> {
            Ok(vec![])
        }
        async fn code_complete_update(
            &self,
            _: CodeCompleteUpdateRequest,
        ) -> Result<Vec<swift_ls_daemon::DaemonCompletionItem>, DaemonError> {
            Ok(vec![])
        }
        async fn code_complete_close(&self, _: &str) -> Result<(), DaemonError> {
            Ok(())
        }
        async fn related_identifiers(&self, _: RelatedIdentifiersRequest) -> Result<RelatedIdentifiersResult, DaemonError> {
            Ok(RelatedIdentifiersResult { ranges: self.related_ranges.clone(), compound_old_name: self.old_name.clone() })
        }
        async fn find_syntactic_rename_ranges(
            &self,
            _: SyntacticRenameRangesRequest,
        ) -> Result<Vec<CompoundRenameName>, DaemonError> {
            Ok(self.rename_occurrences.clone())
        }
        async fn semantic_refactoring(&self, _: SemanticRefactoringRequest) -> Result<Vec<RefactoringEdit>, DaemonError> {
            Ok(self.refactor_edits.clone())
        }
        async fn editor_open_interface(&self, _: EditorOpenInterfaceRequest) -> Result<InterfaceResult, DaemonError> {
            Ok(InterfaceResult { source_text: self.interface_text.clone() })
        }
        async fn editor_find_usr(&self, _: FindUsrRequest) -> Result<Option<usize>, DaemonError> {
            Ok(self.find_usr_offset)
        }
        async fn diagnostics(&self, _: DiagnosticsRequest) -> Result<Vec<DaemonDiagnostic>, DaemonError> {
            Ok(self.daemon_diagnostics.clone())
        }
        async fn expand_macro(&self, _: CompileContext, _: ByteSpan) -> Result<Vec<RefactoringEdit>, DaemonError> {
            Ok(self.macro_edits.clone())
        }
    }

    #[tokio::test]
    async fn document_open_change_close_roundtrip() {
        let mut core = Core::new(FakeDaemon::default(), Duration::from_millis(1));
        let snapshot = core
            .open_document("file:///a.swift", "swift", 1, "let x = 1".to_string(), vec![])
            .await
            .unwrap();
        assert_eq!(snapshot.text(), "let x = 1");

        let changed = core
            .change_document(
                "file:///a.swift",
                2,
                &[Change::Ranged { start: (0, 8), end: (0, 9), replacement: "2".to_string() }],
            )
            .await
            .unwrap();
        assert_eq!(changed.text(), "let x = 2");

        core.close_document("file:///a.swift").await.unwrap();
        let err = core.hover("file:///a.swift", 0, vec![]).await.unwrap_err();
        assert!(matches!(err, CoreError::UnknownDocument(_)));
    }

    #[tokio::test]
    async fn connection_interruption_resets_documents_and_lists_reopen_uris() {
        let mut core = Core::new(FakeDaemon::default(), Duration::from_millis(1));
        core.open_document("file:///a.swift", "swift", 1, "a".to_string(), vec![]).await.unwrap();
        core.open_document("file:///b.swift", "swift", 1, "b".to_string(), vec![]).await.unwrap();

        let mut reopen = core.connection_interrupted();
        reopen.sort();
        assert_eq!(reopen, vec!["file:///a.swift".to_string(), "file:///b.swift".to_string()]);
        assert_eq!(core.connection_state(), ConnectionState::Interrupted);

        let err = core.hover("file:///a.swift", 0, vec![]).await.unwrap_err();
        assert!(matches!(err, CoreError::UnknownDocument(_)));

        core.semantic_enabled();
        assert_eq!(core.connection_state(), ConnectionState::Connected);
    }

    #[tokio::test]
    async fn rename_delegates_to_rename_engine() {
        let occurrence = CompoundRenameName {
            category: swift_ls_daemon::RenameCategory::ActiveCode,
            pieces: vec![swift_ls_daemon::RenamePiece {
                kind: swift_ls_daemon::RenamePieceKind::BaseName,
                range: ByteSpan::new(0, 3),
            }],
        };
        let daemon = FakeDaemon {
            related_ranges: vec![ByteSpan::new(0, 3)],
            old_name: "foo".to_string(),
            rename_occurrences: vec![occurrence],
            ..FakeDaemon::default()
        };
        let mut core = Core::new(daemon, Duration::from_millis(1));
        core.open_document("file:///a.swift", "swift", 1, "foo()".to_string(), vec![]).await.unwrap();

        let edit = core.rename("file:///a.swift", 0, vec![], "bar").await.unwrap();
        assert_eq!(edit.edits.len(), 1);
        assert_eq!(edit.edits[0].new_text, "bar");
    }

    #[tokio::test]
    async fn hover_renders_description_and_doc_comment() {
        let daemon = FakeDaemon {
            cursor_info: CursorInfoResult {
                description: "func foo()".to_string(),
                kind: Some("source.lang.swift.decl.function.free".to_string()),
                doc_comment: Some("Does a thing.".to_string()),
                usr: Some("s:4a3b3foo".to_string()),
            },
            ..FakeDaemon::default()
        };
        let mut core = Core::new(daemon, Duration::from_millis(1));
        core.open_document("file:///a.swift", "swift", 1, "func foo() {}".to_string(), vec![]).await.unwrap();

        let rendered = core.hover("file:///a.swift", 5, vec![]).await.unwrap().unwrap();
        assert!(rendered.contains("func foo()"));
        assert!(rendered.contains("Does a thing."));

        let symbols = core.symbol_info("file:///a.swift", 5, vec![]).await.unwrap();
        assert_eq!(symbols.len(), 1);
        assert_eq!(symbols[0].usr.as_deref(), Some("s:4a3b3foo"));
    }

    #[tokio::test]
    async fn macro_expansion_registers_a_reference_document_uri() {
        let daemon = FakeDaemon {
            macro_edits: vec![RefactoringEdit {
                range: ByteSpan::new(0, 13),
                new_text: "let x = 1".to_string(),
                buffer_name: Some("@__swift_macro_Stringify_.swift".to_string()),
            }],
            ..FakeDaemon::default()
        };
        let mut core = Core::new(daemon, Duration::from_millis(1));
        core.open_document("file:///a.swift", "swift", 1, "#stringify(1 + 2)".to_string(), vec![]).await.unwrap();

        let uris = core
            .macro_expansion("file:///a.swift", ByteSpan::new(0, 13), BuildSettings::Fallback)
            .await
            .unwrap();
        assert_eq!(uris.len(), 1);

        let text = core.get_reference_document(&uris[0]).unwrap();
        assert_eq!(text, "let x = 1");
    }

    #[tokio::test]
    async fn open_generated_interface_reference_document_returns_synthesized_text() {
        let daemon = FakeDaemon { interface_text: "public struct Foo {}".to_string(), ..FakeDaemon::default() };
        let mut core = Core::new(daemon, Duration::from_millis(1));

        let (uri, position) = core
            .open_generated_interface("Foundation", None, vec![], "file:///a.swift", None)
            .await
            .unwrap();
        assert!(position.is_none());

        let text = core.get_reference_document(&uri).unwrap();
        assert_eq!(text, "public struct Foo {}");
    }

    #[tokio::test]
    async fn open_generated_interface_with_usr_resolves_a_position() {
        let daemon = FakeDaemon {
            interface_text: "public struct Foo {}".to_string(),
            find_usr_offset: Some(14),
            ..FakeDaemon::default()
        };
        let mut core = Core::new(daemon, Duration::from_millis(1));

        let (_, position) = core
            .open_generated_interface("Foundation", None, vec![], "file:///a.swift", Some("s:SomeUsr"))
            .await
            .unwrap();
        assert!(position.is_some());
    }

    #[tokio::test]
    async fn semantic_tokens_encodes_keyword_and_identifier() {
        let mut core = Core::new(FakeDaemon::default(), Duration::from_millis(1));
        core.open_document("file:///a.swift", "swift", 1, "let x = 1".to_string(), vec![]).await.unwrap();

        let tokens = core.semantic_tokens("file:///a.swift", None).unwrap();
        assert_eq!(tokens, vec![0, 0, 3, 0, 0, 0, 4, 1, 1, 0]);
    }

    #[tokio::test]
    async fn code_actions_includes_quick_fixes_from_cached_diagnostics() {
        use swift_ls_daemon::DaemonSeverity;

        let daemon = FakeDaemon {
            daemon_diagnostics: vec![DaemonDiagnostic {
                range: ByteSpan::new(0, 7),
                severity: DaemonSeverity::Error,
                message: "expected ')'".to_string(),
            }],
            ..FakeDaemon::default()
        };
        let mut core = Core::new(daemon, Duration::from_millis(1));
        core.open_document("file:///a.swift", "swift", 1, "func f(".to_string(), vec![]).await.unwrap();
        let token = core.begin_diagnostics("file:///a.swift").0;
        core.diagnostics("file:///a.swift", BuildSettings::Real(vec!["-sdk".to_string()]), &token).await.unwrap();

        let actions = core.code_actions("file:///a.swift", ByteSpan::new(0, 7), vec![]).await.unwrap();
        assert!(actions.iter().any(|a| a.kind == CodeActionKind::QuickFix && a.title == "expected ')'"));
    }

    #[tokio::test]
    async fn code_actions_includes_applicable_refactors() {
        let daemon = FakeDaemon {
            refactor_edits: vec![RefactoringEdit { range: ByteSpan::new(0, 3), new_text: "bar".to_string(), buffer_name: None }],
            ..FakeDaemon::default()
        };
        let mut core = Core::new(daemon, Duration::from_millis(1));
        core.open_document("file:///a.swift", "swift", 1, "foo()".to_string(), vec![]).await.unwrap();

        let actions = core.code_actions("file:///a.swift", ByteSpan::new(0, 3), vec![]).await.unwrap();
        assert_eq!(actions.len(), REFACTOR_ACTIONS.len());
        assert!(actions.iter().all(|a| a.kind == CodeActionKind::Refactor));
    }

    #[tokio::test]
    async fn execute_command_returns_daemon_edits_as_workspace_edit() {
        let daemon = FakeDaemon {
            refactor_edits: vec![RefactoringEdit { range: ByteSpan::new(0, 3), new_text: "bar".to_string(), buffer_name: None }],
            ..FakeDaemon::default()
        };
        let mut core = Core::new(daemon, Duration::from_millis(1));
        core.open_document("file:///a.swift", "swift", 1, "foo()".to_string(), vec![]).await.unwrap();

        let edit = core
            .execute_command("file:///a.swift", "source.refactoring.kind.extract.function", ByteSpan::new(0, 3), vec![])
            .await
            .unwrap();
        assert_eq!(edit.edits.len(), 1);
        assert_eq!(edit.edits[0].new_text, "bar");
    }
}
