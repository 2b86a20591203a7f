//! Error type for URI parsing and encoding failures.

use thiserror::Error;

/// Failures that can occur while parsing or encoding document and
/// reference-document URIs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UriError {
    /// The input could not be parsed as a URI at all.
    #[error("malformed uri: {0}")]
    Malformed(String),

    /// A virtual URI's `document-type` segment was not `macro-expansion` or
    /// `generated-interface`.
    #[error("unknown reference-document type: {0}")]
    UnknownDocumentType(String),

    /// The `display-name` segment of a macro-expansion URI did not match the
    /// `L<a>C<b>-L<c>C<d>.<ext>` grammar.
    #[error("malformed macro-expansion range: {0}")]
    MalformedRange(String),

    /// A required query parameter was missing.
    #[error("missing query parameter `{0}`")]
    MissingParam(&'static str),

    /// A query parameter could not be parsed as the expected type.
    #[error("invalid query parameter `{name}`: {value}")]
    InvalidParam {
        /// Parameter name.
        name: &'static str,
        /// Raw value that failed to parse.
        value: String,
    },

    /// `primary_file` walked more than the bounded number of `parent` links
    /// without reaching a file URI; the chain is presumed cyclic.
    #[error("parent chain exceeds maximum depth ({0}); presumed cyclic")]
    ParentChainTooDeep(usize),
}
