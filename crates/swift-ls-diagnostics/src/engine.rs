//! [`DiagnosticEngine`]: per-document debounced, cancellable diagnostic
//! production with parse/semantic stage merging.

use std::collections::HashMap;
use std::time::Duration;

use swift_ls_daemon::{AnalysisDaemon, CancellationToken, CompileContext, DaemonSeverity, DiagnosticsRequest};
use swift_ls_document::DocumentSnapshot;
use swift_ls_syntax::SyntaxTree;

use crate::cache::DiagnosticCache;
use crate::error::DiagnosticError;
use crate::parse_diagnostics;
use crate::types::{BuildSettings, Diagnostic, DiagnosticReport, Severity, Stage};

struct PerDocumentState {
    last_report: DiagnosticReport,
    in_flight: Option<CancellationToken>,
}

impl Default for PerDocumentState {
    fn default() -> Self {
        Self { last_report: DiagnosticReport::default(), in_flight: None }
    }
}

/// Debounced, cancellable, per-document diagnostic report production.
pub struct DiagnosticEngine {
    cache: DiagnosticCache,
    documents: HashMap<String, PerDocumentState>,
    debounce: Duration,
}

impl DiagnosticEngine {
    /// Construct an engine with the given debounce delay.
    pub fn new(debounce: Duration) -> Self {
        Self { cache: DiagnosticCache::new(), documents: HashMap::new(), debounce }
    }

    /// The configured debounce delay; callers schedule their publish task
    /// this far in the future after [`Self::begin_publish`].
    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Cancel any in-flight publish task for `uri` and register a fresh
    /// cancellation token for a newly scheduled one. The caller is
    /// expected to sleep for [`Self::debounce`] and then call
    /// [`Self::report_for`] with the returned token.
    pub fn begin_publish(&mut self, uri: &str) -> CancellationToken {
        let state = self.documents.entry(uri.to_string()).or_default();
        if let Some(prior) = state.in_flight.take() {
            prior.cancel();
        }
        let token = CancellationToken::new();
        state.in_flight = Some(token.clone());
        token
    }

    /// Produce the diagnostic report for `snapshot`, merging it into the
    /// document's previously published parse/semantic stages.
    ///
    /// Returns [`DiagnosticError::DocumentModified`] without mutating
    /// published state if `token` is cancelled at any suspension point.
    pub async fn report_for<D: AnalysisDaemon>(
        &mut self,
        daemon: &D,
        snapshot: &DocumentSnapshot,
        build_settings: BuildSettings,
        token: &CancellationToken,
    ) -> Result<DiagnosticReport, DiagnosticError> {
        let snapshot_id = snapshot.id();

        if let Some(cached) = self.cache.get(&snapshot_id, &build_settings) {
            return Ok(self.publish(snapshot.uri(), cached));
        }

        if token.is_cancelled() {
            return Err(DiagnosticError::DocumentModified);
        }

        let (stage, diagnostics) = if let BuildSettings::Real(args) = &build_settings {
            let context = CompileContext {
                source_file: snapshot.uri().to_string(),
                primary_file: snapshot.uri().to_string(),
                compiler_args: args.clone(),
            };
            let response = daemon.diagnostics(DiagnosticsRequest { context }).await?;
            if token.is_cancelled() {
                return Err(DiagnosticError::DocumentModified);
            }
            (Stage::Semantic, response.into_iter().map(from_daemon_diagnostic).collect())
        } else {
            let tree = SyntaxTree::parse(snapshot.text());
            (Stage::Parse, parse_diagnostics::synthesize(&tree, snapshot.text()))
        };

        if token.is_cancelled() {
            return Err(DiagnosticError::DocumentModified);
        }

        let report = {
            let state = self.documents.entry(snapshot.uri().to_string()).or_default();
            let merged = merge(&state.last_report, stage, diagnostics);
            state.last_report = merged.clone();
            state.in_flight = None;
            merged
        };

        self.cache.put(snapshot_id, build_settings, report.clone());
        Ok(report)
    }

    /// The most recently published report for `uri`, if any has been
    /// produced since the engine was constructed. Used by callers that
    /// need to read diagnostics without triggering a fresh computation
    /// (e.g. deriving quick-fixes for a code-actions request).
    pub fn cached_report(&self, uri: &str) -> Option<DiagnosticReport> {
        self.documents.get(uri).map(|state| state.last_report.clone())
    }

    fn publish(&mut self, uri: &str, report: DiagnosticReport) -> DiagnosticReport {
        let state = self.documents.entry(uri.to_string()).or_default();
        state.last_report = report.clone();
        report
    }
}

/// Merge a freshly produced stage result into the document's previous
/// report. Parse refreshes preserve the existing semantic diagnostics
/// until a fresh semantic result arrives; a semantic refresh replaces the
/// semantic set outright.
fn merge(previous: &DiagnosticReport, stage: Stage, diagnostics: Vec<Diagnostic>) -> DiagnosticReport {
    match stage {
        Stage::Parse => DiagnosticReport { parse: diagnostics, semantic: previous.semantic.clone() },
        Stage::Semantic => DiagnosticReport { parse: previous.parse.clone(), semantic: diagnostics },
    }
}

fn from_daemon_diagnostic(d: swift_ls_daemon::DaemonDiagnostic) -> Diagnostic {
    Diagnostic {
        range: d.range,
        severity: match d.severity {
            DaemonSeverity::Error => Severity::Error,
            DaemonSeverity::Warning => Severity::Warning,
            DaemonSeverity::Note => Severity::Information,
        },
        message: d.message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swift_ls_daemon::{
        CodeCompleteOpenRequest, CodeCompleteUpdateRequest, CompoundRenameName, CursorInfoRequest, CursorInfoResult,
        DaemonCompletionItem, DaemonError, EditorOpenInterfaceRequest, EditorOpenRequest, EditorReplaceTextRequest,
        FindUsrRequest, InterfaceResult, RefactoringEdit, RelatedIdentifiersRequest, RelatedIdentifiersResult,
        SemanticRefactoringRequest, SyntacticRenameRangesRequest,
    };
    use swift_ls_position::ByteSpan;

    struct FakeDaemon {
        diagnostics: Vec<swift_ls_daemon::DaemonDiagnostic>,
    }

    impl AnalysisDaemon for FakeDaemon {
        async fn editor_open(&self, _: EditorOpenRequest) -> Result<(), DaemonError> {
            Ok(())
        }
        async fn editor_close(&self, _: &str) -> Result<(), DaemonError> {
            Ok(())
        }
        async fn editor_replace_text(&self, _: EditorReplaceTextRequest) -> Result<(), DaemonError> {
            Ok(())
        }
        async fn cursor_info(&self, _: CursorInfoRequest) -> Result<CursorInfoResult, DaemonError> {
            Ok(CursorInfoResult::default())
        }
        async fn code_complete_open(&self, _: CodeCompleteOpenRequest) -> Result<Vec<DaemonCompletionItem>, DaemonError> {
            Ok(vec![])
        }
        async fn code_complete_update(
            &self,
            _: CodeCompleteUpdateRequest,
        ) -> Result<Vec<DaemonCompletionItem>, DaemonError> {
            Ok(vec![])
        }
        async fn code_complete_close(&self, _: &str) -> Result<(), DaemonError> {
            Ok(())
        }
        async fn related_identifiers(&self, _: RelatedIdentifiersRequest) -> Result<RelatedIdentifiersResult, DaemonError> {
            Ok(RelatedIdentifiersResult { ranges: vec![], compound_old_name: String::new() })
        }
        async fn find_syntactic_rename_ranges(
            &self,
            _: SyntacticRenameRangesRequest,
        ) -> Result<Vec<CompoundRenameName>, DaemonError> {
            Ok(vec![])
        }
        async fn semantic_refactoring(&self, _: SemanticRefactoringRequest) -> Result<Vec<RefactoringEdit>, DaemonError> {
            Ok(vec![])
        }
        async fn editor_open_interface(&self, _: EditorOpenInterfaceRequest) -> Result<InterfaceResult, DaemonError> {
            Ok(InterfaceResult { source_text: String::new() })
        }
        async fn editor_find_usr(&self, _: FindUsrRequest) -> Result<Option<usize>, DaemonError> {
            Ok(None)
        }
        async fn diagnostics(&self, _: swift_ls_daemon::DiagnosticsRequest) -> Result<Vec<swift_ls_daemon::DaemonDiagnostic>, DaemonError> {
            Ok(self.diagnostics.clone())
        }
        async fn expand_macro(&self, _: CompileContext, _: ByteSpan) -> Result<Vec<RefactoringEdit>, DaemonError> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn fallback_settings_produce_parse_stage_diagnostics() {
        let mut engine = DiagnosticEngine::new(Duration::from_millis(250));
        let daemon = FakeDaemon { diagnostics: vec![] };
        let snapshot = DocumentSnapshot::new("file:///a.swift", "swift", 1, "func f() {");
        let token = engine.begin_publish(snapshot.uri());

        let report = engine.report_for(&daemon, &snapshot, BuildSettings::Fallback, &token).await.unwrap();
        assert_eq!(report.parse.len(), 1);
        assert!(report.semantic.is_empty());
    }

    #[tokio::test]
    async fn semantic_refresh_preserves_prior_parse_diagnostics() {
        let mut engine = DiagnosticEngine::new(Duration::from_millis(250));
        let snapshot = DocumentSnapshot::new("file:///a.swift", "swift", 1, "func f() {");
        let token = engine.begin_publish(snapshot.uri());
        let fallback_daemon = FakeDaemon { diagnostics: vec![] };
        let first = engine.report_for(&fallback_daemon, &snapshot, BuildSettings::Fallback, &token).await.unwrap();
        assert_eq!(first.parse.len(), 1);

        let real_daemon = FakeDaemon {
            diagnostics: vec![swift_ls_daemon::DaemonDiagnostic {
                range: ByteSpan::new(0, 1),
                severity: DaemonSeverity::Warning,
                message: "unused".to_string(),
            }],
        };
        let token = engine.begin_publish(snapshot.uri());
        let second = engine
            .report_for(&real_daemon, &snapshot, BuildSettings::Real(vec!["-sdk".into()]), &token)
            .await
            .unwrap();
        assert_eq!(second.semantic.len(), 1);
        assert_eq!(second.parse.len(), 1, "prior parse diagnostics survive a semantic refresh");
    }

    #[tokio::test]
    async fn cancelled_token_yields_document_modified() {
        let mut engine = DiagnosticEngine::new(Duration::from_millis(250));
        let daemon = FakeDaemon { diagnostics: vec![] };
        let snapshot = DocumentSnapshot::new("file:///a.swift", "swift", 1, "func f() {");
        let token = engine.begin_publish(snapshot.uri());
        token.cancel();

        let err = engine.report_for(&daemon, &snapshot, BuildSettings::Fallback, &token).await.unwrap_err();
        assert_eq!(err, DiagnosticError::DocumentModified);
    }

    #[tokio::test]
    async fn begin_publish_cancels_prior_in_flight_token() {
        let mut engine = DiagnosticEngine::new(Duration::from_millis(250));
        let first_token = engine.begin_publish("file:///a.swift");
        let _second_token = engine.begin_publish("file:///a.swift");
        assert!(first_token.is_cancelled());
    }
}
