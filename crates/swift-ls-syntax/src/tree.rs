//! [`SyntaxTree`]: the flat token list produced by a full or incremental
//! parse, plus the lookahead ranges an incremental reparse consumed.

use swift_ls_position::ByteSpan;

use crate::lexer::{tokenize, Token, TokenKind};

/// A parsed document: its token list, in position order.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    tokens: Vec<Token>,
    source_len: usize,
}

impl SyntaxTree {
    /// Perform a full parse of `text`.
    pub fn parse(text: &str) -> Self {
        Self { tokens: tokenize(text), source_len: text.len() }
    }

    /// The tree's tokens, in position order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The length, in bytes, of the text this tree was parsed from.
    pub fn source_len(&self) -> usize {
        self.source_len
    }

    /// The token whose content span contains or immediately follows
    /// `offset`, if any.
    pub fn token_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.iter().find(|t| t.contains_or_touches_end(offset))
    }
}

/// Margin, in bytes, retokenized on either side of an edit so that a
/// token whose content merely shifted (rather than changed) is still
/// recognized identically to a full parse.
pub const REPARSE_LOOKAHEAD: usize = 256;

/// Replay `edits` (each `(pre_range, new_text)`, offsets in `pre_text`
/// coordinates) over `prior`, producing a tree for `post_text`.
///
/// Supports a single edit precisely; for a batch of more than one edit this
/// falls back to a full parse of `post_text`, since re-deriving a single
/// windowed region for disjoint edits adds complexity disproportionate to
/// this service's incremental-parse budget.
pub fn incremental_reparse(
    prior: &SyntaxTree,
    pre_text: &str,
    post_text: &str,
    edits: &[(ByteSpan, String)],
) -> SyntaxTree {
    let [(edit_range, new_text)] = edits else {
        return SyntaxTree::parse(post_text);
    };

    let window_start = edit_range.start.saturating_sub(REPARSE_LOOKAHEAD);
    let window_end_pre = (edit_range.end + REPARSE_LOOKAHEAD).min(pre_text.len());
    let delta = new_text.len() as i64 - edit_range.len() as i64;
    let window_end_post = (window_end_pre as i64 + delta).max(0) as usize;
    let window_end_post = window_end_post.min(post_text.len());

    if !pre_text.is_char_boundary(window_start)
        || !pre_text.is_char_boundary(window_end_pre)
        || !post_text.is_char_boundary(window_start)
        || !post_text.is_char_boundary(window_end_post)
    {
        return SyntaxTree::parse(post_text);
    }

    // Tokens wholly before the window are untouched by the edit and keep
    // their offsets; tokens wholly after it shift by the edit's net delta.
    let prefix: Vec<Token> = prior.tokens.iter().filter(|t| t.end <= window_start).copied().collect();
    let suffix: Vec<Token> = prior
        .tokens
        .iter()
        .filter(|t| t.full_start >= window_end_pre)
        .map(|t| Token {
            kind: t.kind,
            full_start: shift(t.full_start, delta),
            start: shift(t.start, delta),
            end: shift(t.end, delta),
        })
        .collect();

    let middle_text = &post_text[window_start..window_end_post];
    let middle_tokens: Vec<Token> = tokenize(middle_text)
        .into_iter()
        .map(|t| Token {
            kind: t.kind,
            full_start: t.full_start + window_start,
            start: t.start + window_start,
            end: t.end + window_start,
        })
        .collect();

    let mut tokens = prefix;
    tokens.extend(middle_tokens);
    tokens.extend(suffix);

    SyntaxTree { tokens, source_len: post_text.len() }
}

fn shift(offset: usize, delta: i64) -> usize {
    (offset as i64 + delta).max(0) as usize
}
