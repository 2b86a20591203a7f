//! LSP-style semantic token encoding over a [`SyntaxTree`]'s token list.
//!
//! The wire format is the standard `textDocument/semanticTokens` delta
//! encoding: five `u32`s per token (`delta_line`, `delta_start`, `length`,
//! `token_type`, `token_modifiers`), tokens given in position order.

use swift_ls_position::{ByteSpan, LineTable};

use crate::lexer::TokenKind;
use crate::tree::SyntaxTree;

/// The semantic token types this service distinguishes, indexed the way
/// they are declared in the legend sent to the client. Punctuation is
/// deliberately not classified: plain syntax highlighting already covers
/// it, and it carries no semantic information this service can add.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticTokenKind {
    /// A Swift reserved keyword.
    Keyword,
    /// An identifier (no further semantic role resolution without the
    /// analysis daemon).
    Variable,
}

impl SemanticTokenKind {
    fn legend_index(self) -> u32 {
        match self {
            SemanticTokenKind::Keyword => 0,
            SemanticTokenKind::Variable => 1,
        }
    }
}

/// Encode `tree`'s tokens within `range` (or the whole document, if
/// `None`) as a flat delta-encoded `u32` array.
pub fn encode(tree: &SyntaxTree, text: &str, table: &LineTable, range: Option<ByteSpan>) -> Vec<u32> {
    let mut out = Vec::new();
    let mut prev_line = 0u32;
    let mut prev_start = 0u32;

    for token in tree.tokens() {
        let kind = match token.kind {
            TokenKind::Keyword => SemanticTokenKind::Keyword,
            TokenKind::Identifier => SemanticTokenKind::Variable,
            TokenKind::Punctuation => continue,
        };
        let span = ByteSpan::new(token.start, token.end);
        if let Some(range) = range {
            if !range.overlaps(span) {
                continue;
            }
        }

        let position = table.position_of_utf16(text, token.start);
        let line = position.line;
        let start_col = match position.column {
            swift_ls_position::Column::Utf16(c) => c,
            swift_ls_position::Column::Utf8(c) => c,
        };
        let length = text[token.start..token.end].encode_utf16().count() as u32;

        let delta_line = line - prev_line;
        let delta_start = if delta_line == 0 { start_col - prev_start } else { start_col };

        out.extend_from_slice(&[delta_line, delta_start, length, kind.legend_index(), 0]);
        prev_line = line;
        prev_start = start_col;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_keyword_and_identifier_skipping_punctuation() {
        let text = "let x = 1";
        let tree = SyntaxTree::parse(text);
        let table = LineTable::new(text);
        let tokens = encode(&tree, text, &table, None);
        // "let" (keyword) then "x" (identifier); "=" and "1" are punctuation
        // under this tokenizer's coarse classification and are skipped.
        assert_eq!(tokens, vec![0, 0, 3, 0, 0, 0, 4, 1, 1, 0]);
    }

    #[test]
    fn restricts_to_requested_range() {
        let text = "let x = 1\nlet y = 2";
        let tree = SyntaxTree::parse(text);
        let table = LineTable::new(text);
        let second_line_only = ByteSpan::new(text.find("let y").unwrap(), text.len());
        let tokens = encode(&tree, text, &table, Some(second_line_only));
        // Only "let" and "y" on the second line.
        assert_eq!(tokens.len(), 10);
        assert_eq!(tokens[0], 1); // delta_line jumps straight to line 1
    }
}
