//! Single-slot completion-session state machine, placeholder rewriting, and
//! result mapping for the analysis daemon's code-complete dialogue.

mod error;
mod placeholder;
mod result_mapping;
mod session;

pub use error::CompletionError;
pub use result_mapping::{CompletionItem, CompletionItemKind, EditRange, InsertTextFormat, Position};
pub use session::{CompletionSession, SessionKey};
