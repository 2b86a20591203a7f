//! Diagnostic report data model: severities, stages, build settings, and
//! the merged report shape published to the editor.

use swift_ls_position::ByteSpan;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Blocks successful compilation.
    Error,
    /// Does not block compilation.
    Warning,
    /// Informational only.
    Information,
    /// Style or deprecation hint.
    Hint,
}

/// Which stage produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Produced by the in-process syntactic parser (fallback path).
    Parse,
    /// Produced by the analysis daemon against real build settings.
    Semantic,
}

/// A single diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The diagnostic's range in the document.
    pub range: ByteSpan,
    /// Severity.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
}

/// Build settings resolved for a document, determining whether the
/// analysis daemon can be asked for authoritative semantic diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BuildSettings {
    /// Real compiler arguments are available.
    Real(Vec<String>),
    /// No real build settings are available; only syntactic diagnostics
    /// can be produced.
    Fallback,
}

impl BuildSettings {
    /// Whether these are fallback (non-real) settings.
    pub fn is_fallback(&self) -> bool {
        matches!(self, BuildSettings::Fallback)
    }
}

/// The merged parse+semantic diagnostic report for a document, as
/// published to the editor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiagnosticReport {
    /// Current parse-stage diagnostics.
    pub parse: Vec<Diagnostic>,
    /// Current semantic-stage diagnostics.
    pub semantic: Vec<Diagnostic>,
}

impl DiagnosticReport {
    /// All diagnostics, parse-stage first.
    pub fn all(&self) -> Vec<&Diagnostic> {
        self.parse.iter().chain(self.semantic.iter()).collect()
    }
}
