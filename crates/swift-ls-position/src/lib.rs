//! Byte-offset and line/column position tracking.
//!
//! Documents are stored as UTF-8 text internally; the LSP wire protocol
//! addresses positions in UTF-16 code units. [`LineTable`] bridges the two
//! without rescanning the whole document on every lookup.

mod line_table;
mod span;
#[cfg(feature = "lsp-compat")]
mod wire;

pub use line_table::{Column, LinePosition, LineTable};
pub use span::ByteSpan;
#[cfg(feature = "lsp-compat")]
pub use wire::{byte_span_to_lsp_range, lsp_range_to_byte_span};
