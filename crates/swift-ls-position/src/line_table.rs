//! [`LineTable`]: a cached index of line-start byte offsets, supporting
//! fast offset ⇄ position conversion without rescanning the document text
//! on every lookup.

use crate::span::ByteSpan;

/// Either a UTF-16 column (the LSP wire encoding) or a UTF-8 byte column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// Column counted in UTF-16 code units from the start of the line.
    Utf16(u32),
    /// Column counted in UTF-8 bytes from the start of the line.
    Utf8(u32),
}

/// A zero-based `(line, column)` position, where the column may be given
/// in either UTF-16 or UTF-8 units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinePosition {
    /// Zero-based line number.
    pub line: u32,
    /// Column within that line.
    pub column: Column,
}

/// A cached line-start index over a document's text, supporting
/// `O(log n)` offset ⇄ position conversion.
#[derive(Debug, Clone)]
pub struct LineTable {
    /// Byte offset of the start of each line; `line_starts[0]` is always 0.
    line_starts: Vec<usize>,
    text_len: usize,
}

impl LineTable {
    /// Build a line table by scanning `text` once for line breaks.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0usize];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts, text_len: text.len() }
    }

    /// Number of lines (always at least 1).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Whether `line` names an actual line in the document, as opposed to
    /// one past the last line. [`Self::line_start_offset`] and
    /// [`Self::utf8_offset_of`] silently clamp out-of-range lines to the
    /// end of the text; callers that must reject an out-of-range line
    /// (rather than clamp it) check this first.
    pub fn line_in_bounds(&self, line: u32) -> bool {
        (line as usize) < self.line_starts.len()
    }

    /// Byte offset of the start of `line`, clamped to the end of the text
    /// if `line` is past the last line.
    pub fn line_start_offset(&self, line: u32) -> usize {
        self.line_starts.get(line as usize).copied().unwrap_or(self.text_len)
    }

    /// The byte span covering `line`, excluding its trailing newline.
    pub fn line_span(&self, line: u32, text: &str) -> ByteSpan {
        let start = self.line_start_offset(line);
        let next_start = self.line_start_offset(line + 1);
        let end = if next_start > start && text.as_bytes().get(next_start - 1) == Some(&b'\n') {
            next_start - 1
        } else {
            next_start
        };
        ByteSpan::new(start.min(end), end.max(start))
    }

    /// The line's text, excluding its trailing newline.
    pub fn line<'a>(&self, line: u32, text: &'a str) -> &'a str {
        self.line_span(line, text).slice(text)
    }

    /// The zero-based line number containing byte `offset`.
    pub fn line_of_offset(&self, offset: usize) -> u32 {
        let offset = offset.min(self.text_len);
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line as u32,
            Err(insertion_point) => (insertion_point - 1) as u32,
        }
    }

    /// Convert a byte `offset` into `text` to a `(line, utf16_column)`
    /// position.
    pub fn position_of_utf16(&self, text: &str, offset: usize) -> LinePosition {
        let offset = offset.min(self.text_len);
        let line = self.line_of_offset(offset);
        let line_start = self.line_start_offset(line);
        let column = text[line_start..offset].encode_utf16().count() as u32;
        LinePosition { line, column: Column::Utf16(column) }
    }

    /// Convert a byte `offset` into `text` to a `(line, utf8_column)`
    /// position, where the column is a byte count from the line start.
    pub fn position_of_utf8(&self, offset: usize) -> LinePosition {
        let offset = offset.min(self.text_len);
        let line = self.line_of_offset(offset);
        let line_start = self.line_start_offset(line);
        LinePosition { line, column: Column::Utf8((offset - line_start) as u32) }
    }

    /// Convert a position (either UTF-16 or UTF-8 column) back to a byte
    /// offset into `text`.
    pub fn utf8_offset_of(&self, text: &str, position: LinePosition) -> usize {
        let line_start = self.line_start_offset(position.line);
        let line_end = self.line_start_offset(position.line + 1).min(self.text_len);
        let line_text = text.get(line_start..line_end).unwrap_or("");

        match position.column {
            Column::Utf8(col) => (line_start + col as usize).min(line_end),
            Column::Utf16(col) => {
                let mut units = 0u32;
                for (byte_idx, ch) in line_text.char_indices() {
                    if units >= col {
                        return line_start + byte_idx;
                    }
                    units += ch.len_utf16() as u32;
                }
                line_end
            }
        }
    }

    /// Slice `text` by a half-open `[start, end)` span, clamping to bounds.
    pub fn range<'a>(&self, text: &'a str, span: ByteSpan) -> &'a str {
        let start = span.start.min(self.text_len);
        let end = span.end.min(self.text_len).max(start);
        &text[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "func f() {\n    let x = 1\n}\n";

    #[test]
    fn line_count_matches_newlines_plus_one() {
        let table = LineTable::new(TEXT);
        assert_eq!(table.line_count(), 4);
    }

    #[test]
    fn round_trips_utf16_positions() {
        let table = LineTable::new(TEXT);
        for offset in [0, 5, 11, 20, TEXT.len()] {
            let pos = table.position_of_utf16(TEXT, offset);
            assert_eq!(table.utf8_offset_of(TEXT, pos), offset);
        }
    }

    #[test]
    fn round_trips_utf8_positions() {
        let table = LineTable::new(TEXT);
        for offset in [0, 5, 11, 20, TEXT.len()] {
            let pos = table.position_of_utf8(offset);
            assert_eq!(table.utf8_offset_of(TEXT, pos), offset);
        }
    }

    #[test]
    fn line_excludes_trailing_newline() {
        let table = LineTable::new(TEXT);
        assert_eq!(table.line(1, TEXT), "    let x = 1");
    }

    #[test]
    fn line_of_offset_at_line_boundary() {
        let table = LineTable::new(TEXT);
        let second_line_start = TEXT.find("let").unwrap();
        assert_eq!(table.line_of_offset(second_line_start), 1);
    }

    #[test]
    fn line_in_bounds_rejects_lines_past_the_last_one() {
        let table = LineTable::new(TEXT);
        assert_eq!(table.line_count(), 4);
        assert!(table.line_in_bounds(3));
        assert!(!table.line_in_bounds(4));
        assert!(!table.line_in_bounds(100));
    }
}
