//! Optional conversions to/from `lsp_types` wire positions, gated behind
//! the `lsp-compat` feature so that callers who only need internal
//! byte-offset tracking do not pull in `lsp-types`.

use crate::line_table::{Column, LinePosition};
use crate::span::ByteSpan;

/// Convert an internal UTF-16 [`LinePosition`] to an `lsp_types::Position`.
///
/// Panics (via the `From` conversion's own invariants) only if `position`
/// carries a UTF-8 column; callers on the LSP-compat path always produce
/// UTF-16 positions via [`crate::line_table::LineTable::position_of_utf16`].
impl From<LinePosition> for lsp_types::Position {
    fn from(position: LinePosition) -> Self {
        let character = match position.column {
            Column::Utf16(c) => c,
            Column::Utf8(c) => c,
        };
        lsp_types::Position { line: position.line, character }
    }
}

impl From<lsp_types::Position> for LinePosition {
    fn from(position: lsp_types::Position) -> Self {
        LinePosition { line: position.line, column: Column::Utf16(position.character) }
    }
}

/// Convert a [`ByteSpan`] plus its owning text into an `lsp_types::Range`.
pub fn byte_span_to_lsp_range(
    table: &crate::line_table::LineTable,
    text: &str,
    span: ByteSpan,
) -> lsp_types::Range {
    lsp_types::Range {
        start: table.position_of_utf16(text, span.start).into(),
        end: table.position_of_utf16(text, span.end).into(),
    }
}

/// Convert an `lsp_types::Range` back into a [`ByteSpan`] over `text`.
pub fn lsp_range_to_byte_span(
    table: &crate::line_table::LineTable,
    text: &str,
    range: lsp_types::Range,
) -> ByteSpan {
    let start = table.utf8_offset_of(text, range.start.into());
    let end = table.utf8_offset_of(text, range.end.into());
    ByteSpan::new(start.min(end), end.max(start))
}
