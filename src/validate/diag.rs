//! Validation diagnostics extending the base diagnostic system.
//!
//! This module provides specialized diagnostic types for document
//! validation defects.

use crate::diag::{Diag, DiagLabel, DiagSeverity, LabelRole};

/// Categories of validation defects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagKind {
    /// A name reference that resolves to no element.
    UnresolvedReference,

    /// A shader ref that cannot be matched to any node definition.
    UnresolvedNodeDef,

    /// A connection to an output that does not resolve.
    UnresolvedConnection,

    /// An override that matches no binding in the inheritance chain.
    UnresolvedOverrideTarget,

    /// An inheritance chain that revisits a material.
    CyclicInheritance,

    /// Declared types that disagree across a binding relation.
    TypeMismatch,

    /// A binding carrying both a literal value and a live connection.
    DualBinding,

    /// A connected output sitting on a cyclic upstream node path.
    UpstreamCycle,
}

impl DiagKind {
    /// Returns a human-readable name for this diagnostic kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::UnresolvedReference => "UnresolvedReference",
            Self::UnresolvedNodeDef => "UnresolvedNodeDef",
            Self::UnresolvedConnection => "UnresolvedConnection",
            Self::UnresolvedOverrideTarget => "UnresolvedOverrideTarget",
            Self::CyclicInheritance => "CyclicInheritance",
            Self::TypeMismatch => "TypeMismatch",
            Self::DualBinding => "DualBinding",
            Self::UpstreamCycle => "UpstreamCycle",
        }
    }
}

/// Builder for validation diagnostics.
pub struct ValidationDiagBuilder {
    kind: DiagKind,
    message: String,
    labels: Vec<DiagLabel>,
    notes: Vec<String>,
    severity: DiagSeverity,
}

impl ValidationDiagBuilder {
    /// Creates a new validation diagnostic builder.
    pub fn new(kind: DiagKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            labels: Vec::new(),
            notes: Vec::new(),
            severity: DiagSeverity::Error,
        }
    }

    /// The defect category this diagnostic reports.
    pub fn kind(&self) -> DiagKind {
        self.kind
    }

    /// Adds a primary label at the given element path.
    pub fn with_primary_label(mut self, path: impl Into<String>, message: impl Into<String>) -> Self {
        self.labels.push(DiagLabel {
            path: path.into(),
            message: message.into(),
            role: LabelRole::Primary,
        });
        self
    }

    /// Adds a secondary label at the given element path.
    pub fn with_secondary_label(
        mut self,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.labels.push(DiagLabel {
            path: path.into(),
            message: message.into(),
            role: LabelRole::Secondary,
        });
        self
    }

    /// Adds a note/suggestion to the diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Sets the diagnostic severity.
    pub fn with_severity(mut self, severity: DiagSeverity) -> Self {
        self.severity = severity;
        self
    }

    /// Builds the diagnostic, carrying the kind as its code.
    pub fn build(self) -> Diag {
        let mut diag = Diag::new(self.severity, self.message).with_code(self.kind.name());
        for label in self.labels {
            diag = diag.with_label(label);
        }
        for note in self.notes {
            diag = diag.with_note(note);
        }
        diag
    }
}

/// Helper functions for creating common validation diagnostics.
impl ValidationDiagBuilder {
    /// Creates a cyclic inheritance diagnostic from a rendered walk.
    pub fn cyclic_inheritance(walk: &str, path: impl Into<String>) -> Self {
        Self::new(
            DiagKind::CyclicInheritance,
            format!("Cyclic material inheritance: {}", walk),
        )
        .with_primary_label(path, "inheritance returns to this material")
        .with_note("Break the loop by removing one of the inherit links.")
    }

    /// Creates a diagnostic for an inherit link naming a missing material.
    pub fn unresolved_material_reference(name: &str, path: impl Into<String>) -> Self {
        Self::new(
            DiagKind::UnresolvedReference,
            format!("Unresolved material reference '{}'", name),
        )
        .with_primary_label(path, "names a material that does not exist")
    }

    /// Creates a diagnostic for an explicit node definition reference that
    /// does not resolve.
    pub fn unresolved_node_def_reference(name: &str, path: impl Into<String>) -> Self {
        Self::new(
            DiagKind::UnresolvedReference,
            format!("Unresolved node definition reference '{}'", name),
        )
        .with_primary_label(path, "no node definition has this name")
    }

    /// Creates a diagnostic for a node family no definition implements.
    pub fn unresolved_node_family(family: &str, path: impl Into<String>) -> Self {
        Self::new(
            DiagKind::UnresolvedNodeDef,
            format!("No node definition implements node family '{}'", family),
        )
        .with_primary_label(path, "matches no node definition")
    }

    /// Creates a diagnostic for a shader ref that declares nothing to
    /// match against.
    pub fn undeclared_shader_ref(path: impl Into<String>) -> Self {
        Self::new(
            DiagKind::UnresolvedNodeDef,
            "Shader ref declares neither a node family nor a node definition",
        )
        .with_primary_label(path, "cannot be matched to any definition")
    }

    /// Creates an unresolved connection diagnostic.
    pub fn unresolved_connection(
        output: &str,
        node_graph: Option<&str>,
        path: impl Into<String>,
    ) -> Self {
        let message = match node_graph {
            Some(graph) => format!(
                "Unresolved connection to output '{}' in node graph '{}'",
                output, graph
            ),
            None => format!("Unresolved connection to output '{}'", output),
        };
        Self::new(DiagKind::UnresolvedConnection, message)
            .with_primary_label(path, "connection target does not resolve")
    }

    /// Creates a diagnostic for an override nothing receives.
    pub fn unresolved_override_target(name: &str, path: impl Into<String>) -> Self {
        Self::new(
            DiagKind::UnresolvedOverrideTarget,
            format!(
                "Override '{}' matches no binding in the inheritance chain",
                name
            ),
        )
        .with_primary_label(path, "nothing binds this name")
    }

    /// Creates a type mismatch diagnostic between a binding and its
    /// target.
    pub fn type_mismatch(
        declared: &str,
        target_declared: &str,
        path: impl Into<String>,
        target_path: impl Into<String>,
    ) -> Self {
        Self::new(
            DiagKind::TypeMismatch,
            format!(
                "Declared types disagree: '{}' vs '{}'",
                declared, target_declared
            ),
        )
        .with_primary_label(path, format!("declared as '{}'", declared))
        .with_secondary_label(target_path, format!("target declares '{}'", target_declared))
    }

    /// Creates a dual binding warning.
    pub fn dual_binding(output: &str, path: impl Into<String>) -> Self {
        Self::new(
            DiagKind::DualBinding,
            format!(
                "Binding carries both a literal value and a connection to '{}'",
                output
            ),
        )
        .with_primary_label(path, "value is shadowed by the connection")
        .with_note("The connection takes precedence; remove the value if that is intended.")
        .with_severity(DiagSeverity::Warning)
    }

    /// Creates an upstream cycle warning for a connected output.
    pub fn upstream_cycle(
        output: &str,
        path: impl Into<String>,
        output_path: impl Into<String>,
    ) -> Self {
        Self::new(
            DiagKind::UpstreamCycle,
            format!("Connected output '{}' lies on a cyclic node path", output),
        )
        .with_primary_label(path, "connection enters a cycle")
        .with_secondary_label(output_path, "output declared here")
        .with_severity(DiagSeverity::Warning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_match_their_variants() {
        assert_eq!(DiagKind::UnresolvedNodeDef.name(), "UnresolvedNodeDef");
        assert_eq!(DiagKind::CyclicInheritance.name(), "CyclicInheritance");
        assert_eq!(DiagKind::DualBinding.name(), "DualBinding");
    }

    #[test]
    fn build_carries_the_kind_as_code() {
        let diag = ValidationDiagBuilder::unresolved_override_target(
            "roughness",
            "/plastic/roughness",
        )
        .build();
        assert_eq!(diag.code.as_deref(), Some("UnresolvedOverrideTarget"));
        assert_eq!(diag.severity, DiagSeverity::Error);
        assert_eq!(
            diag.message,
            "Override 'roughness' matches no binding in the inheritance chain"
        );
        assert_eq!(diag.primary_path(), Some("/plastic/roughness"));
    }

    #[test]
    fn connection_message_names_the_graph_when_present() {
        let without = ValidationDiagBuilder::unresolved_connection(
            "albedo",
            None,
            "/plastic/surface1/base_color",
        )
        .build();
        assert_eq!(without.message, "Unresolved connection to output 'albedo'");

        let with = ValidationDiagBuilder::unresolved_connection(
            "albedo",
            Some("textures"),
            "/plastic/surface1/base_color",
        )
        .build();
        assert_eq!(
            with.message,
            "Unresolved connection to output 'albedo' in node graph 'textures'"
        );
    }

    #[test]
    fn warnings_are_built_with_warning_severity() {
        let dual = ValidationDiagBuilder::dual_binding("albedo", "/m/s/bind").build();
        assert_eq!(dual.severity, DiagSeverity::Warning);
        assert_eq!(dual.code.as_deref(), Some("DualBinding"));

        let cycle =
            ValidationDiagBuilder::upstream_cycle("out", "/m/s/bind", "/graph/out").build();
        assert_eq!(cycle.severity, DiagSeverity::Warning);
        assert_eq!(cycle.labels.len(), 2);
    }

    #[test]
    fn type_mismatch_labels_both_sides() {
        let diag = ValidationDiagBuilder::type_mismatch(
            "float",
            "color3",
            "/plastic/roughness",
            "/base/surface1/roughness",
        )
        .build();
        assert_eq!(diag.message, "Declared types disagree: 'float' vs 'color3'");
        assert_eq!(diag.labels.len(), 2);
        assert_eq!(diag.labels[0].message, "declared as 'float'");
        assert_eq!(diag.labels[1].message, "target declares 'color3'");
    }
}
