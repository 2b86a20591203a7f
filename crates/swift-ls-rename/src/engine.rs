//! The rename algorithm: related-identifier discovery, compound-name
//! parsing, syntactic-rename-range resolution, and per-piece edit
//! construction.

use swift_ls_daemon::{
    AnalysisDaemon, CompileContext, CompoundRenameName, RelatedIdentifiersRequest, RenameCategory, RenamePiece,
    RenamePieceKind, SyntacticRenameRangesRequest,
};
use swift_ls_position::ByteSpan;

use crate::compound_name::{CompoundName, Parameter};
use crate::error::RenameError;
use crate::types::{TextEdit, WorkspaceEdit};

/// Run the full rename algorithm against `daemon` for the identifier at
/// `offset` in `uri`, renaming it to `new_name`.
pub async fn rename<D: AnalysisDaemon>(
    daemon: &D,
    uri: &str,
    source_text: &str,
    offset: usize,
    compiler_args: Vec<String>,
    new_name: &str,
) -> Result<WorkspaceEdit, RenameError> {
    let context = CompileContext { source_file: uri.to_string(), primary_file: uri.to_string(), compiler_args };

    let related = daemon
        .related_identifiers(RelatedIdentifiersRequest {
            offset,
            context: context.clone(),
            include_non_editable_base_names: false,
        })
        .await?;

    let new_compound = CompoundName::parse(new_name)?;
    // Old name is parsed too, purely to surface an `invalid name` error
    // symmetrically; its structure isn't otherwise needed here since the
    // daemon already resolved old-name pieces for us.
    CompoundName::parse(&related.compound_old_name)?;

    let occurrences = daemon
        .find_syntactic_rename_ranges(SyntacticRenameRangesRequest {
            source_file: uri.to_string(),
            source_text: source_text.to_string(),
            rename_locations: related.ranges,
            old_name: related.compound_old_name,
        })
        .await?;

    let mut edits = Vec::new();
    for occurrence in &occurrences {
        edits.extend(edits_for_occurrence(source_text, occurrence, &new_compound));
    }

    Ok(WorkspaceEdit { edits })
}

fn edits_for_occurrence(source_text: &str, occurrence: &CompoundRenameName, new_name: &CompoundName) -> Vec<TextEdit> {
    if !matches!(occurrence.category, RenameCategory::ActiveCode | RenameCategory::InactiveCode | RenameCategory::Selector) {
        return Vec::new();
    }

    let mut edits = Vec::new();
    let mut param_index = 0usize;
    let mut decl_label: Option<String> = None;

    for piece in &occurrence.pieces {
        match piece.kind {
            RenamePieceKind::BaseName => {
                edits.push(TextEdit { range: piece.range, new_text: new_name.base_name.clone() });
            }
            RenamePieceKind::KeywordBaseName => {}
            RenamePieceKind::DeclArgumentLabel => {
                decl_label = if piece.range.is_empty() {
                    None
                } else {
                    Some(piece.range.try_slice(source_text).unwrap_or("").to_string())
                };
                if let Some(new_label) = new_name.parameters.get(param_index) {
                    edits.extend(decl_label_edit(piece, new_label));
                }
            }
            RenamePieceKind::ParameterName => {
                if let Some(new_label) = new_name.parameters.get(param_index) {
                    if let Some(edit) = parameter_name_edit(source_text, piece, new_label, decl_label.as_deref()) {
                        edits.push(edit);
                    }
                }
                param_index += 1;
            }
            RenamePieceKind::NoncollapsibleParameterName => {
                param_index += 1;
            }
            RenamePieceKind::CallArgumentLabel => {
                if let Some(new_label) = new_name.parameters.get(param_index) {
                    edits.push(TextEdit { range: piece.range, new_text: label_or_empty(new_label) });
                }
            }
            RenamePieceKind::CallArgumentColon => {
                if matches!(new_name.parameters.get(param_index), Some(Parameter::Wildcard)) {
                    edits.push(TextEdit { range: piece.range, new_text: String::new() });
                }
                param_index += 1;
            }
            RenamePieceKind::CallArgumentCombined => {
                if let Some(Parameter::Label(label)) = new_name.parameters.get(param_index) {
                    edits.push(TextEdit { range: ByteSpan::empty(piece.range.start), new_text: format!("{label}: ") });
                }
                param_index += 1;
            }
            RenamePieceKind::SelectorArgumentLabel => {
                if let Some(new_label) = new_name.parameters.get(param_index) {
                    edits.push(TextEdit { range: piece.range, new_text: label_or_wildcard(new_label) });
                }
                param_index += 1;
            }
        }
    }

    edits
}

fn decl_label_edit(piece: &RenamePiece, new_label: &Parameter) -> Option<TextEdit> {
    if piece.range.is_empty() {
        if let Parameter::Label(label) = new_label {
            return Some(TextEdit { range: piece.range, new_text: format!("{label} ") });
        }
        None
    } else {
        Some(TextEdit { range: piece.range, new_text: label_or_wildcard(new_label) })
    }
}

fn parameter_name_edit(
    source_text: &str,
    piece: &RenamePiece,
    new_label: &Parameter,
    decl_label: Option<&str>,
) -> Option<TextEdit> {
    match new_label {
        Parameter::Wildcard => {
            let old_label = decl_label?;
            Some(TextEdit { range: piece.range, new_text: format!(" {old_label}") })
        }
        Parameter::Label(new_label) => {
            let current = piece.range.try_slice(source_text).unwrap_or("").trim();
            if new_label == current {
                Some(TextEdit { range: piece.range, new_text: String::new() })
            } else {
                None
            }
        }
    }
}

fn label_or_empty(parameter: &Parameter) -> String {
    match parameter {
        Parameter::Label(label) => label.clone(),
        Parameter::Wildcard => String::new(),
    }
}

fn label_or_wildcard(parameter: &Parameter) -> String {
    match parameter {
        Parameter::Label(label) => label.clone(),
        Parameter::Wildcard => "_".to_string(),
    }
}
