//! [`adjust_to_start_of_identifier`]: nudge an editor-supplied cursor
//! position back to the start of the identifier or keyword it is within or
//! immediately after, since the analysis daemon only recognises
//! identifiers at their start.

use crate::lexer::TokenKind;
use crate::tree::SyntaxTree;

/// If `offset` is within, or immediately after, an identifier/keyword
/// token, return that token's content start (after its leading trivia).
/// Otherwise return `offset` unchanged.
pub fn adjust_to_start_of_identifier(tree: &SyntaxTree, offset: usize) -> usize {
    for token in tree.tokens() {
        if !matches!(token.kind, TokenKind::Identifier | TokenKind::Keyword) {
            continue;
        }
        if token.contains_or_touches_end(offset) {
            return token.start;
        }
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_inside_identifier_snaps_to_its_start() {
        let tree = SyntaxTree::parse("let value = 1");
        let value_start = "let ".len();
        let value_end = value_start + "value".len();
        for offset in value_start..=value_end {
            assert_eq!(adjust_to_start_of_identifier(&tree, offset), value_start);
        }
    }

    #[test]
    fn cursor_on_punctuation_is_unchanged() {
        let tree = SyntaxTree::parse("let value = 1");
        let eq_offset = "let value ".len();
        assert_eq!(adjust_to_start_of_identifier(&tree, eq_offset), eq_offset);
    }

    #[test]
    fn cursor_on_keyword_snaps_to_its_start() {
        let tree = SyntaxTree::parse("func f() {}");
        assert_eq!(adjust_to_start_of_identifier(&tree, 2), 0);
    }
}
