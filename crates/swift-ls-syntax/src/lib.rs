//! In-process syntactic tokenization, an incrementally-reparsed bounded
//! tree cache, and cursor-to-identifier coordinate adjustment.

mod cache;
mod coordinate_adjuster;
mod lexer;
mod semantic_tokens;
mod tree;

pub use cache::SyntaxTreeCache;
pub use coordinate_adjuster::adjust_to_start_of_identifier;
pub use lexer::{Token, TokenKind};
pub use semantic_tokens::{encode as encode_semantic_tokens, SemanticTokenKind};
pub use tree::{incremental_reparse, SyntaxTree, REPARSE_LOOKAHEAD};
