//! The parser's built-in diagnostic generator, used when no real build
//! settings are available. It flags unbalanced brackets, the only defect
//! a pure tokenizer (with no grammar) can detect reliably.

use swift_ls_position::ByteSpan;
use swift_ls_syntax::{SyntaxTree, TokenKind};

use crate::types::{Diagnostic, Severity};

const PAIRS: &[(&str, &str)] = &[("(", ")"), ("[", "]"), ("{", "}")];

/// Synthesize parse-stage diagnostics for `text`, given its parsed tree.
pub fn synthesize(tree: &SyntaxTree, text: &str) -> Vec<Diagnostic> {
    let mut stack: Vec<(&str, usize)> = Vec::new();
    let mut diagnostics = Vec::new();

    for token in tree.tokens() {
        if token.kind != TokenKind::Punctuation {
            continue;
        }
        let lexeme = &text[token.start..token.end];
        if let Some((open, _)) = PAIRS.iter().find(|(open, _)| *open == lexeme) {
            stack.push((open, token.start));
            continue;
        }
        if let Some((open, close)) = PAIRS.iter().find(|(_, close)| *close == lexeme) {
            match stack.pop() {
                Some((top, _)) if top == *open => {}
                Some((_, unmatched_start)) => diagnostics.push(Diagnostic {
                    range: ByteSpan::new(unmatched_start, unmatched_start + 1),
                    severity: Severity::Error,
                    message: format!("mismatched bracket; expected a closing `{close}`"),
                }),
                None => diagnostics.push(Diagnostic {
                    range: ByteSpan::new(token.start, token.end),
                    severity: Severity::Error,
                    message: format!("unexpected closing `{lexeme}`"),
                }),
            }
        }
    }

    for (open, start) in stack {
        diagnostics.push(Diagnostic {
            range: ByteSpan::new(start, start + 1),
            severity: Severity::Error,
            message: format!("unclosed `{open}`"),
        });
    }

    diagnostics
}
