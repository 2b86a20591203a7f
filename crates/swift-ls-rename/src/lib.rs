//! Compound-name parsing and per-piece workspace-edit construction for the
//! rename operation.

mod compound_name;
mod engine;
mod error;
mod types;

pub use compound_name::{CompoundName, Parameter};
pub use engine::rename;
pub use error::RenameError;
pub use types::{TextEdit, WorkspaceEdit};
