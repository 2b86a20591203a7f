//! Single-slot completion-session state machine: closed/open, keyed on the
//! parameters that must match for an incoming request to be treated as a
//! filter refinement of the currently open dialogue rather than a fresh one.

use swift_ls_daemon::{AnalysisDaemon, CodeCompleteOpenRequest, CodeCompleteUpdateRequest, CompileContext};

use crate::error::CompletionError;
use crate::result_mapping::{self, CompletionItem};

/// The parameters that must all match for an incoming completion request to
/// reuse the currently open session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionKey {
    pub uri: String,
    pub utf8_start: usize,
    pub completion_pos: (u32, u32),
    pub compile_cmd: Vec<String>,
    pub client_snippet_support: bool,
}

enum SessionState {
    Closed,
    Open { key: SessionKey, daemon_name: String },
}

/// A single optional completion dialogue slot for one analysis-daemon
/// process. Callers are expected to serialize access themselves (e.g. via a
/// per-daemon serial task queue), matching the daemon's own single-dialogue
/// restriction.
pub struct CompletionSession {
    state: SessionState,
    next_name: u64,
}

impl Default for CompletionSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionSession {
    /// A fresh, closed session.
    pub fn new() -> Self {
        Self { state: SessionState::Closed, next_name: 0 }
    }

    /// Whether the session currently holds an open dialogue.
    pub fn is_open(&self) -> bool {
        matches!(self.state, SessionState::Open { .. })
    }

    /// Run `completion_list` against this session, driving `daemon` through
    /// the appropriate open/update/close requests.
    #[allow(clippy::too_many_arguments)]
    pub async fn completion_list<D: AnalysisDaemon>(
        &mut self,
        daemon: &D,
        source_text: &str,
        key: SessionKey,
        filter_text: &str,
        options: &[String],
    ) -> Result<Vec<CompletionItem>, CompletionError> {
        let must_reuse = options.iter().any(|o| o == "must_reuse");

        let reuse = match &self.state {
            SessionState::Open { key: current, .. } => *current == key,
            SessionState::Closed => false,
        };

        if reuse {
            let daemon_name = match &self.state {
                SessionState::Open { daemon_name, .. } => daemon_name.clone(),
                SessionState::Closed => unreachable!("reuse implies Open"),
            };
            let items = daemon
                .code_complete_update(CodeCompleteUpdateRequest { name: daemon_name, filter_text: filter_text.to_string() })
                .await?;
            return Ok(items
                .into_iter()
                .map(|item| result_mapping::map_item(&item, source_text, key.completion_pos, key.client_snippet_support))
                .collect());
        }

        if must_reuse {
            return Err(CompletionError::ServerCancelled);
        }

        if let SessionState::Open { daemon_name, .. } = &self.state {
            daemon.code_complete_close(daemon_name).await?;
        }

        let daemon_name = format!("completion-{}", self.next_name);
        self.next_name += 1;

        let context = CompileContext {
            source_file: key.uri.clone(),
            primary_file: key.uri.clone(),
            compiler_args: key.compile_cmd.clone(),
        };
        let items = daemon
            .code_complete_open(CodeCompleteOpenRequest {
                offset: key.utf8_start,
                name: daemon_name.clone(),
                context,
                source_text: source_text.to_string(),
            })
            .await?;

        let completion_pos = key.completion_pos;
        let client_snippet_support = key.client_snippet_support;
        self.state = SessionState::Open { key, daemon_name };

        Ok(items
            .into_iter()
            .map(|item| result_mapping::map_item(&item, source_text, completion_pos, client_snippet_support))
            .collect())
    }
}
