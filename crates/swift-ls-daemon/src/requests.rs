//! Request and response payload types for each category of analysis-daemon
//! request. Field shapes follow spec §6's semantic description; the
//! on-wire encoding to the daemon's actual process is out of scope here.

use swift_ls_position::ByteSpan;

/// Arguments shared by most daemon requests that operate on a file's
/// current text against a given compiler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileContext {
    /// The file the daemon should treat as the subject of the request.
    pub source_file: String,
    /// The primary file anchoring workspace/build-settings resolution.
    pub primary_file: String,
    /// Compiler arguments resolved for `primary_file`.
    pub compiler_args: Vec<String>,
}

/// *editor-open*: register a document with its initial text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorOpenRequest {
    /// The document's uri.
    pub uri: String,
    /// The document's full current text.
    pub source_text: String,
    /// Compiler arguments for this document.
    pub compiler_args: Vec<String>,
}

/// *editor-replace-text*: incrementally update a previously opened
/// document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorReplaceTextRequest {
    /// The document's uri.
    pub uri: String,
    /// The byte range being replaced, in the daemon's prior view of the
    /// document.
    pub range: ByteSpan,
    /// The replacement text.
    pub replacement: String,
}

/// *cursor-info*: symbol/kind/documentation information at an offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorInfoRequest {
    /// Byte offset of the cursor.
    pub offset: usize,
    /// Byte length of the selection, if any (0 for a plain cursor).
    pub length: usize,
    /// Compile context for the request.
    pub context: CompileContext,
    /// Whether to additionally retrieve the symbol graph for the result.
    pub retrieve_symbol_graph: bool,
}

/// Result of a *cursor-info* request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CursorInfoResult {
    /// Human-readable description of the symbol (used for hover).
    pub description: String,
    /// The symbol's kind, as reported by the daemon.
    pub kind: Option<String>,
    /// Rendered documentation comment, if any.
    pub doc_comment: Option<String>,
    /// The symbol's USR, if resolvable.
    pub usr: Option<String>,
}

/// One entry returned from a *code-complete* request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonCompletionItem {
    /// Display description (used as `CompletionItem::label`).
    pub description: String,
    /// Name used for filter-text construction.
    pub name: String,
    /// The daemon's item-kind key, mapped to an LSP `CompletionItemKind`
    /// by the caller.
    pub item_kind: String,
    /// Source text for the item, with `<#...#>` placeholder syntax, prior
    /// to rewriting.
    pub source_text: String,
    /// Number of UTF-8 code units before `completion_pos` that this item
    /// expects the client to erase.
    pub utf8_code_units_to_erase: u32,
}

/// *code-complete open*: begin a completion dialogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeCompleteOpenRequest {
    /// Byte offset completion was requested at.
    pub offset: usize,
    /// The daemon's expected name for this completion buffer.
    pub name: String,
    /// Compile context.
    pub context: CompileContext,
    /// Current full source text (required only on `open`).
    pub source_text: String,
}

/// *code-complete update*: refine a previously opened dialogue's filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeCompleteUpdateRequest {
    /// The daemon's name for the buffer opened earlier.
    pub name: String,
    /// The refined filter text.
    pub filter_text: String,
}

/// One entry in a *related-identifiers* response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedIdentifiersResult {
    /// Ranges of related identifier occurrences in the source file.
    pub ranges: Vec<ByteSpan>,
    /// The compound old name, e.g. `foo(a:b:)`.
    pub compound_old_name: String,
}

/// *related-identifiers* request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedIdentifiersRequest {
    /// Byte offset to query.
    pub offset: usize,
    /// Compile context.
    pub context: CompileContext,
    /// Whether non-editable base names (e.g. `init`) should be included.
    pub include_non_editable_base_names: bool,
}

/// A piece kind within a compound rename name, per spec §4.8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenamePieceKind {
    /// The declaration or call's base name.
    BaseName,
    /// A base name that is a reserved keyword (`init`, `subscript`, ...).
    KeywordBaseName,
    /// A parameter's internal name.
    ParameterName,
    /// A parameter's internal name that cannot be collapsed to a wildcard.
    NoncollapsibleParameterName,
    /// A parameter's external label at the declaration site.
    DeclArgumentLabel,
    /// A parameter's external label at a call site.
    CallArgumentLabel,
    /// The colon following a call argument label.
    CallArgumentColon,
    /// A call argument label and colon encoded as a single piece.
    CallArgumentCombined,
    /// An Objective-C-style selector argument label.
    SelectorArgumentLabel,
}

/// The category of a compound rename name, per spec §4.8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameCategory {
    /// Live, reachable source code.
    ActiveCode,
    /// Source code under an inactive `#if` branch.
    InactiveCode,
    /// A string literal reference (e.g. `#selector` string form).
    String,
    /// An Objective-C selector reference.
    Selector,
    /// A comment reference.
    Comment,
    /// The occurrence does not match the expected old name.
    Mismatch,
    /// The occurrence could not be matched to any piece.
    Unmatched,
}

/// One piece of a compound rename name, with its range in the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePiece {
    /// The piece's kind.
    pub kind: RenamePieceKind,
    /// The piece's byte range in the source file (may be empty).
    pub range: ByteSpan,
}

/// One compound-name occurrence returned by *find-syntactic-rename-ranges*.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundRenameName {
    /// This occurrence's category.
    pub category: RenameCategory,
    /// The pieces making up this occurrence.
    pub pieces: Vec<RenamePiece>,
}

/// *find-syntactic-rename-ranges* request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntacticRenameRangesRequest {
    /// The source file to search.
    pub source_file: String,
    /// The current source text.
    pub source_text: String,
    /// Locations (from *related-identifiers*) to match against.
    pub rename_locations: Vec<ByteSpan>,
    /// The old compound name being renamed.
    pub old_name: String,
}

/// *semantic-refactoring* request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticRefactoringRequest {
    /// The refactoring action's daemon-assigned identifier.
    pub action_uid: String,
    /// Byte offset of the refactoring's anchor.
    pub offset: usize,
    /// Byte length of the refactoring's selection.
    pub length: usize,
    /// Compile context.
    pub context: CompileContext,
}

/// One edit produced by a refactoring or macro-expansion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefactoringEdit {
    /// The byte range replaced.
    pub range: ByteSpan,
    /// The replacement text.
    pub new_text: String,
    /// The daemon's internal buffer name for this edit's virtual document,
    /// if any. `None` with non-empty `new_text` indicates partial data.
    pub buffer_name: Option<String>,
}

/// *editor-open-interface* request: synthesize a generated module
/// interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorOpenInterfaceRequest {
    /// The module to synthesize an interface for.
    pub module: String,
    /// The compiler group to resolve the module against, if any.
    pub group: Option<String>,
    /// Daemon-assigned name for the resulting synthesized buffer.
    pub name: String,
    /// Whether the synthesized interface should use extension syntax.
    pub synthesized_extension: bool,
    /// Compiler arguments for resolution.
    pub compiler_args: Vec<String>,
}

/// Result of an *editor-open-interface* request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceResult {
    /// The synthesized interface's full source text.
    pub source_text: String,
}

/// *editor-find-usr* request: locate the position of a USR within a
/// synthesized document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindUsrRequest {
    /// The synthesized document to search.
    pub source_file: String,
    /// The USR to find.
    pub usr: String,
}

/// *diagnostics* request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticsRequest {
    /// Compile context.
    pub context: CompileContext,
}

/// Severity of a daemon-reported diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaemonSeverity {
    /// Blocks successful compilation.
    Error,
    /// Does not block compilation.
    Warning,
    /// Informational only.
    Note,
}

/// One diagnostic reported by the daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonDiagnostic {
    /// The diagnostic's range in the source file.
    pub range: ByteSpan,
    /// Severity.
    pub severity: DaemonSeverity,
    /// Human-readable message.
    pub message: String,
}
