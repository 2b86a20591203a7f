//! Output types for a rename operation.

use swift_ls_position::ByteSpan;

/// One edit to apply to the renamed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// The byte range to replace.
    pub range: ByteSpan,
    /// The replacement text.
    pub new_text: String,
}

/// The full result of a rename operation: every edit to apply to the file
/// the rename was requested in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceEdit {
    pub edits: Vec<TextEdit>,
}
