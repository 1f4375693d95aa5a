//! Internal diagnostic model for resolution and validation findings.

use miette::{Diagnostic, Report, Severity};
use std::fmt;

/// Severity level for a diagnostic.
///
/// This covers the full taxonomy required for validation diagnostics:
/// errors that fail validation, warnings about suspicious bindings,
/// and informational notes or advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagSeverity {
    /// A defect that fails validation.
    Error,
    /// A warning about a potentially unintended binding.
    Warning,
    /// An informational note or advice.
    Note,
}

impl fmt::Display for DiagSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagSeverity::Error => write!(f, "error"),
            DiagSeverity::Warning => write!(f, "warning"),
            DiagSeverity::Note => write!(f, "note"),
        }
    }
}

/// Role of a diagnostic label in the overall diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRole {
    /// The element this diagnostic is about.
    Primary,
    /// A supporting element (e.g. the other side of a mismatch).
    Secondary,
}

/// A labeled element within a diagnostic.
///
/// Documents carry no source text, so labels point at elements by their
/// hierarchical path (e.g. `/plastic/surface1/roughness`) together with
/// explanatory text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagLabel {
    /// Path of the element this label refers to.
    pub path: String,
    /// The label text explaining this element's relevance.
    pub message: String,
    /// Whether this is a primary or secondary label.
    pub role: LabelRole,
}

impl DiagLabel {
    /// Creates a new primary label.
    pub fn primary(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            role: LabelRole::Primary,
        }
    }

    /// Creates a new secondary label.
    pub fn secondary(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            role: LabelRole::Secondary,
        }
    }
}

/// A structured diagnostic message.
///
/// This is the internal diagnostic representation used throughout the
/// resolvers and the validator. It captures all information needed to render
/// rich reports: the affected elements, help text, and notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diag {
    /// The severity level of this diagnostic.
    pub severity: DiagSeverity,
    /// The main diagnostic message.
    pub message: String,
    /// Labeled elements showing where the problem lives.
    pub labels: Vec<DiagLabel>,
    /// Optional help text suggesting how to fix the issue.
    pub help: Option<String>,
    /// Additional notes providing context or related information.
    pub notes: Vec<String>,
    /// Optional diagnostic code (e.g. "UnresolvedNodeDef").
    pub code: Option<String>,
}

impl Diag {
    /// Creates a new diagnostic with the given severity and message.
    pub fn new(severity: DiagSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            labels: Vec::new(),
            help: None,
            notes: Vec::new(),
            code: None,
        }
    }

    /// Creates a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(DiagSeverity::Error, message)
    }

    /// Creates a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagSeverity::Warning, message)
    }

    /// Creates a new note diagnostic.
    pub fn note(message: impl Into<String>) -> Self {
        Self::new(DiagSeverity::Note, message)
    }

    /// Adds a primary label to this diagnostic.
    pub fn with_primary_label(
        mut self,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.labels.push(DiagLabel::primary(path, message));
        self
    }

    /// Adds a secondary label to this diagnostic.
    pub fn with_secondary_label(
        mut self,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.labels.push(DiagLabel::secondary(path, message));
        self
    }

    /// Adds a label to this diagnostic.
    pub fn with_label(mut self, label: DiagLabel) -> Self {
        self.labels.push(label);
        self
    }

    /// Sets the help text for this diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Adds a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Sets the diagnostic code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Returns the path of the primary label, if one was attached.
    pub fn primary_path(&self) -> Option<&str> {
        self.labels
            .iter()
            .find(|label| label.role == LabelRole::Primary)
            .map(|label| label.path.as_str())
    }

    /// Renders this diagnostic as a single human-readable line.
    ///
    /// The format is `severity: path: message`, with the path omitted when
    /// no primary label is attached.
    pub fn line(&self) -> String {
        match self.primary_path() {
            Some(path) => format!("{}: {}: {}", self.severity, path, self.message),
            None => format!("{}: {}", self.severity, self.message),
        }
    }
}

/// Converts internal diagnostics to miette Reports.
///
/// This function provides the bridge from our internal diagnostic model to
/// miette's rich error reporting. Element labels are preserved as related
/// advice entries since there is no source text to annotate.
pub fn convert_diagnostics_to_reports(diagnostics: &[Diag]) -> Vec<Report> {
    diagnostics.iter().map(convert_diag_to_report).collect()
}

/// Converts a single diagnostic to a miette Report.
///
/// This handles the full conversion including:
/// - Mapping severity levels
/// - Turning element labels into related advice entries
/// - Attaching help text and notes
/// - Including diagnostic codes
pub fn convert_diag_to_report(diag: &Diag) -> Report {
    Report::new(build_diagnostic(diag))
}

fn build_diagnostic(diag: &Diag) -> BuiltDiagnostic {
    // The primary element path becomes part of the headline message; the
    // remaining labels and notes are carried as related advice.
    let message = match diag.primary_path() {
        Some(path) => format!("{}: {}", path, diag.message),
        None => diag.message.clone(),
    };

    let mut related = Vec::new();
    for label in &diag.labels {
        if label.role == LabelRole::Secondary {
            related.push(NoteDiagnostic::new(format!(
                "{}: {}",
                label.path, label.message
            )));
        }
    }
    for note in &diag.notes {
        related.push(NoteDiagnostic::new(note.clone()));
    }

    BuiltDiagnostic {
        message,
        severity: match diag.severity {
            DiagSeverity::Error => Severity::Error,
            DiagSeverity::Warning => Severity::Warning,
            DiagSeverity::Note => Severity::Advice,
        },
        code: diag.code.clone(),
        help: diag.help.clone(),
        related,
    }
}

/// The final diagnostic type that implements miette's Diagnostic trait.
#[derive(Debug)]
struct BuiltDiagnostic {
    message: String,
    severity: Severity,
    code: Option<String>,
    help: Option<String>,
    related: Vec<NoteDiagnostic>,
}

#[derive(Debug)]
struct NoteDiagnostic {
    message: String,
}

impl NoteDiagnostic {
    fn new(message: String) -> Self {
        Self { message }
    }
}

impl fmt::Display for NoteDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for BuiltDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for BuiltDiagnostic {}
impl std::error::Error for NoteDiagnostic {}

impl Diagnostic for BuiltDiagnostic {
    fn severity(&self) -> Option<Severity> {
        Some(self.severity)
    }

    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.code
            .as_ref()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn related<'a>(&'a self) -> Option<Box<dyn Iterator<Item = &'a dyn Diagnostic> + 'a>> {
        if self.related.is_empty() {
            None
        } else {
            Some(Box::new(
                self.related.iter().map(|diag| diag as &dyn Diagnostic),
            ))
        }
    }
}

impl Diagnostic for NoteDiagnostic {
    fn severity(&self) -> Option<Severity> {
        Some(Severity::Advice)
    }
}
