//! [`AnalysisDaemon`]: the async interface to the out-of-process analysis
//! daemon, one method per request category from spec §6. The on-wire
//! encoding to the daemon's actual process is out of scope; this trait is
//! the boundary the rest of the core programs against, so that a bridge
//! over IPC and a mock for tests are interchangeable.

use crate::error::DaemonError;
use crate::requests::*;

/// The out-of-process analysis daemon, addressed one request category at a
/// time. Every method suspends (it may perform I/O) and every suspension
/// point is a cancellation opportunity for the caller's own cancellation
/// token; this trait does not thread cancellation itself, since cancelling
/// an in-flight `Future` is accomplished by dropping it.
pub trait AnalysisDaemon: Send + Sync {
    /// Register a newly opened document with the daemon.
    fn editor_open(
        &self,
        request: EditorOpenRequest,
    ) -> impl std::future::Future<Output = Result<(), DaemonError>> + Send;

    /// Unregister a closed document.
    fn editor_close(&self, uri: &str) -> impl std::future::Future<Output = Result<(), DaemonError>> + Send;

    /// Incrementally update a previously opened document.
    fn editor_replace_text(
        &self,
        request: EditorReplaceTextRequest,
    ) -> impl std::future::Future<Output = Result<(), DaemonError>> + Send;

    /// Symbol/kind/documentation information at an offset.
    fn cursor_info(
        &self,
        request: CursorInfoRequest,
    ) -> impl std::future::Future<Output = Result<CursorInfoResult, DaemonError>> + Send;

    /// Begin a completion dialogue.
    fn code_complete_open(
        &self,
        request: CodeCompleteOpenRequest,
    ) -> impl std::future::Future<Output = Result<Vec<DaemonCompletionItem>, DaemonError>> + Send;

    /// Refine a previously opened completion dialogue.
    fn code_complete_update(
        &self,
        request: CodeCompleteUpdateRequest,
    ) -> impl std::future::Future<Output = Result<Vec<DaemonCompletionItem>, DaemonError>> + Send;

    /// Close a previously opened completion dialogue.
    fn code_complete_close(&self, name: &str) -> impl std::future::Future<Output = Result<(), DaemonError>> + Send;

    /// Locations and compound name of the identifier at an offset.
    fn related_identifiers(
        &self,
        request: RelatedIdentifiersRequest,
    ) -> impl std::future::Future<Output = Result<RelatedIdentifiersResult, DaemonError>> + Send;

    /// Syntactic rename ranges for a compound old name at a set of
    /// locations.
    fn find_syntactic_rename_ranges(
        &self,
        request: SyntacticRenameRangesRequest,
    ) -> impl std::future::Future<Output = Result<Vec<CompoundRenameName>, DaemonError>> + Send;

    /// Apply a semantic refactoring action.
    fn semantic_refactoring(
        &self,
        request: SemanticRefactoringRequest,
    ) -> impl std::future::Future<Output = Result<Vec<RefactoringEdit>, DaemonError>> + Send;

    /// Synthesize a generated module interface.
    fn editor_open_interface(
        &self,
        request: EditorOpenInterfaceRequest,
    ) -> impl std::future::Future<Output = Result<InterfaceResult, DaemonError>> + Send;

    /// Locate a USR within a synthesized document.
    fn editor_find_usr(
        &self,
        request: FindUsrRequest,
    ) -> impl std::future::Future<Output = Result<Option<usize>, DaemonError>> + Send;

    /// Semantic diagnostics for a document.
    fn diagnostics(
        &self,
        request: DiagnosticsRequest,
    ) -> impl std::future::Future<Output = Result<Vec<DaemonDiagnostic>, DaemonError>> + Send;

    /// Expand a macro occurring within `range` in the source file.
    fn expand_macro(
        &self,
        context: CompileContext,
        range: swift_ls_position::ByteSpan,
    ) -> impl std::future::Future<Output = Result<Vec<RefactoringEdit>, DaemonError>> + Send;
}
