//! Document and reference-document URI handling.
//!
//! This crate owns two concerns: converting between `file://` URIs and
//! filesystem paths ([`fsuri`]), and the grammar for reference-document
//! URIs synthesized by the service for macro expansions and generated
//! module interfaces ([`virtual_uri`]).

mod error;
mod fsuri;
mod virtual_uri;

pub use error::UriError;
pub use fsuri::{fs_path_to_uri, uri_to_fs_path};
pub use virtual_uri::{
    DocumentUri, GeneratedInterfaceRef, LineCol, LineCol1, MacroExpansionRef,
    MAX_PARENT_CHAIN_DEPTH, VirtualUri,
};
