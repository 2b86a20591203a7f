//! Mapping from a daemon's raw completion item into the `CompletionItem`
//! shape a client consumes, per the result-mapping rules.

use swift_ls_daemon::DaemonCompletionItem;
use swift_ls_position::{Column, LinePosition, LineTable};

use crate::placeholder;

/// LSP-ish item kind, derived from the daemon's item-kind dictionary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionItemKind {
    Method,
    Function,
    Constructor,
    Field,
    Variable,
    Class,
    Interface,
    Module,
    Property,
    Enum,
    EnumMember,
    Keyword,
    Snippet,
    Operator,
    TypeParameter,
    Text,
}

/// Whether `insert_text` should be interpreted as a snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertTextFormat {
    PlainText,
    Snippet,
}

/// A zero-based, UTF-16-column `(line, column)` position.
pub type Position = (u32, u32);

/// A half-open range between two positions, used for `text_edit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditRange {
    pub start: Position,
    pub end: Position,
}

/// A completion item ready to hand to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionItem {
    pub label: String,
    pub kind: CompletionItemKind,
    pub insert_text: String,
    pub insert_text_format: InsertTextFormat,
    pub filter_text: String,
    pub text_edit: EditRange,
}

/// Map one daemon item, anchored at `completion_pos`. `source_text` is the
/// document text the completion was requested against, used to recover the
/// erased prefix for `filter_text` when the item erases a non-empty span.
pub fn map_item(
    item: &DaemonCompletionItem,
    source_text: &str,
    completion_pos: Position,
    client_snippet_support: bool,
) -> CompletionItem {
    let (insert_text, rewritten) = placeholder::rewrite(&item.source_text, client_snippet_support);
    let insert_text_format =
        if rewritten && client_snippet_support { InsertTextFormat::Snippet } else { InsertTextFormat::PlainText };

    let text_edit = erase_range(completion_pos, item.utf8_code_units_to_erase);
    let filter_text = if text_edit.start == text_edit.end {
        item.name.clone()
    } else {
        let erased_prefix = slice_between(source_text, text_edit.start, text_edit.end);
        format!("{erased_prefix}{}", item.name)
    };

    CompletionItem {
        label: item.description.clone(),
        kind: kind_from_daemon(&item.item_kind),
        insert_text,
        insert_text_format,
        filter_text,
        text_edit,
    }
}

/// The text `source_text` holds between two UTF-16 `(line, column)`
/// positions, used to recover the span a non-zero erase count deletes.
fn slice_between(source_text: &str, start: Position, end: Position) -> String {
    let table = LineTable::new(source_text);
    let start_offset = table.utf8_offset_of(
        source_text,
        LinePosition { line: start.0, column: Column::Utf16(start.1) },
    );
    let end_offset = table.utf8_offset_of(
        source_text,
        LinePosition { line: end.0, column: Column::Utf16(end.1) },
    );
    source_text.get(start_offset..end_offset).unwrap_or("").to_string()
}

fn kind_from_daemon(item_kind: &str) -> CompletionItemKind {
    match item_kind {
        "source.lang.swift.decl.function.method.instance" | "source.lang.swift.decl.function.method.static" => {
            CompletionItemKind::Method
        }
        "source.lang.swift.decl.function.free" => CompletionItemKind::Function,
        "source.lang.swift.decl.function.constructor" => CompletionItemKind::Constructor,
        "source.lang.swift.decl.var.instance" | "source.lang.swift.decl.var.local" => CompletionItemKind::Field,
        "source.lang.swift.decl.var.global" | "source.lang.swift.decl.var.static" => CompletionItemKind::Variable,
        "source.lang.swift.decl.class" | "source.lang.swift.decl.struct" => CompletionItemKind::Class,
        "source.lang.swift.decl.protocol" => CompletionItemKind::Interface,
        "source.lang.swift.decl.module" => CompletionItemKind::Module,
        "source.lang.swift.decl.var.parameter" => CompletionItemKind::Property,
        "source.lang.swift.decl.enum" => CompletionItemKind::Enum,
        "source.lang.swift.decl.enumelement" => CompletionItemKind::EnumMember,
        "source.lang.swift.keyword" => CompletionItemKind::Keyword,
        "source.lang.swift.pattern" => CompletionItemKind::Snippet,
        "source.lang.swift.decl.function.operator" => CompletionItemKind::Operator,
        "source.lang.swift.decl.generic_type_param" => CompletionItemKind::TypeParameter,
        _ => CompletionItemKind::Text,
    }
}

/// Compute the `text_edit` deletion range for `completion_pos`, per the
/// erase-count rules.
fn erase_range(completion_pos: Position, erase_count: u32) -> EditRange {
    let (line, col) = completion_pos;
    match erase_count {
        0 => EditRange { start: completion_pos, end: completion_pos },
        _ => {
            // Both the single-code-unit (count == 1) and multi-code-unit
            // (count > 1) cases reduce to the same column arithmetic here:
            // subtract the erase count from the column, falling back to an
            // empty range if doing so would cross the start of the line.
            if erase_count as u64 > col as u64 {
                EditRange { start: completion_pos, end: completion_pos }
            } else {
                let start = (line, col - erase_count);
                EditRange { start, end: completion_pos }
            }
        }
    }
}
