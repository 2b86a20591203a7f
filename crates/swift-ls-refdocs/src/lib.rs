//! Macro-expansion edit cache and refcounted generated-interface registry:
//! the virtual-document subsystems behind `swift-generated-interface://`
//! and macro-expansion reference-document uris.

mod error;
mod interface_registry;
mod macro_expansion;

pub use error::RefDocError;
pub use interface_registry::{GeneratedInterfaceRegistry, InterfaceDescriptor};
pub use macro_expansion::MacroExpansionCache;
