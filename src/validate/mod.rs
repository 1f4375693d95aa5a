//! Multi-pass document validation.
//!
//! The validator resolves every reference a document holds and checks the
//! result, producing either a [`Resolution`] artifact enriched with the
//! resolved relations, or a list of diagnostics when validation fails.
//! Validation never mutates the document and never stops at the first
//! finding: every defect is reported, one diagnostic per defective
//! element and category.
//!
//! # Architecture
//!
//! The validator follows a multi-pass architecture:
//!
//! 1. **Inheritance validation** - Walk ancestor chains, detect cycles,
//!    check inherit links
//! 2. **Reference validation** - Match shader refs to node definitions
//! 3. **Connection validation** - Resolve bind input connections, flag
//!    suspicious bindings
//! 4. **Override validation** - Match overrides to their receivers across
//!    the chain
//! 5. **Type validation** - Compare declared types across resolved
//!    relations
//!
//! # Example
//!
//! ```ignore
//! use shadebind::tree::Document;
//! use shadebind::validate::DocumentValidator;
//!
//! let mut doc = Document::new();
//! // ... build materials, node defs, bindings ...
//!
//! let outcome = DocumentValidator::new().validate_document(&doc);
//! if let Some(resolution) = &outcome.resolution {
//!     println!("document is well formed");
//! } else {
//!     for diag in &outcome.diagnostics {
//!         eprintln!("{}", diag.line());
//!     }
//! }
//! ```

pub mod diag;

mod inheritance_validation;
mod reference_validation;
mod connection_validation;
mod override_validation;
mod type_validation;

use crate::diag::{Diag, DiagSeverity};
use crate::model::{BindInputId, MaterialId, NodeDefId, OutputId, OverrideId, ShaderRefId};
use crate::resolve::BindingSite;
use crate::tree::{Document, ElementId};
use crate::validate::diag::{DiagKind, ValidationDiagBuilder};
use std::collections::{HashMap, HashSet};

/// Ancestor chains keyed by material; `None` marks a chain broken by a
/// cycle.
pub(super) type ChainMap = HashMap<MaterialId, Option<Vec<MaterialId>>>;

/// Configuration for document validation.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Report warnings as errors.
    pub strict: bool,

    /// Warn when a binding carries both a literal value and a live
    /// connection.
    pub warn_on_dual_binding: bool,

    /// Warn when a connected output sits on a cyclic upstream node path.
    pub warn_on_upstream_cycle: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            strict: false,
            warn_on_dual_binding: true,
            warn_on_upstream_cycle: true,
        }
    }
}

/// The resolved relations of a document that passed validation.
///
/// Everything here was computed against the document at validation time;
/// the maps hold ids, so later edits to the document are not reflected.
#[derive(Debug, Clone)]
pub struct Resolution {
    chains: HashMap<MaterialId, Vec<MaterialId>>,
    effective_refs: HashMap<MaterialId, Vec<ShaderRefId>>,
    shader_defs: HashMap<ShaderRefId, Vec<NodeDefId>>,
    connections: HashMap<BindInputId, OutputId>,
    receivers: HashMap<OverrideId, BindingSite>,
}

impl Resolution {
    /// The validated material's ancestors, nearest first.
    pub fn chain(&self, material: MaterialId) -> Option<&[MaterialId]> {
        self.chains.get(&material).map(Vec::as_slice)
    }

    /// The validated material's effective shader refs, own first then
    /// nearest ancestor first.
    pub fn effective_refs(&self, material: MaterialId) -> Option<&[ShaderRefId]> {
        self.effective_refs.get(&material).map(Vec::as_slice)
    }

    /// The node definitions a shader ref matched.
    pub fn shader_defs(&self, shader_ref: ShaderRefId) -> Option<&[NodeDefId]> {
        self.shader_defs.get(&shader_ref).map(Vec::as_slice)
    }

    /// The output a bind input's connection resolved to.
    pub fn connection(&self, bind: BindInputId) -> Option<OutputId> {
        self.connections.get(&bind).copied()
    }

    /// The binding site an override resolved to.
    pub fn receiver(&self, over: OverrideId) -> Option<BindingSite> {
        self.receivers.get(&over).copied()
    }
}

/// The result of validating a document or a single material.
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    /// The resolved relations, present only when validation succeeded.
    pub resolution: Option<Resolution>,

    /// All diagnostics gathered during validation, in pass order.
    pub diagnostics: Vec<Diag>,
}

impl ValidationOutcome {
    fn success(resolution: Resolution, diagnostics: Vec<Diag>) -> Self {
        Self {
            resolution: Some(resolution),
            diagnostics,
        }
    }

    fn failure(diagnostics: Vec<Diag>) -> Self {
        Self {
            resolution: None,
            diagnostics,
        }
    }

    /// Whether validation succeeded. Warnings do not fail validation
    /// unless the validator ran in strict mode.
    pub fn is_success(&self) -> bool {
        self.resolution.is_some()
    }

    /// Whether validation failed.
    pub fn is_failure(&self) -> bool {
        self.resolution.is_none()
    }

    /// The error diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diag> {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity == DiagSeverity::Error)
    }

    /// The warning diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diag> {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity == DiagSeverity::Warning)
    }
}

/// Collects diagnostics during validation, keeping one per defective
/// element and category and applying strict-mode escalation.
pub(super) struct Reporter {
    strict: bool,
    diagnostics: Vec<Diag>,
    seen: HashSet<(ElementId, DiagKind)>,
}

impl Reporter {
    fn new(strict: bool) -> Self {
        Self {
            strict,
            diagnostics: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Records a diagnostic against `subject` unless one of the same
    /// category was already recorded for it.
    pub(super) fn report(&mut self, subject: ElementId, builder: ValidationDiagBuilder) {
        let kind = builder.kind();
        if !self.seen.insert((subject, kind)) {
            return;
        }
        let mut diag = builder.build();
        if self.strict && diag.severity == DiagSeverity::Warning {
            diag.severity = DiagSeverity::Error;
        }
        self.diagnostics.push(diag);
    }

    /// Whether a diagnostic of this category was already recorded for
    /// `subject`.
    pub(super) fn was_reported(&self, subject: ElementId, kind: DiagKind) -> bool {
        self.seen.contains(&(subject, kind))
    }

    /// Marks `subject` as covered by an already-recorded diagnostic of
    /// this category without emitting another one.
    pub(super) fn mark_reported(&mut self, subject: ElementId, kind: DiagKind) {
        self.seen.insert((subject, kind));
    }

    fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == DiagSeverity::Error)
    }
}

/// Main document validator coordinating all validation passes.
pub struct DocumentValidator {
    config: ValidationConfig,
}

impl DocumentValidator {
    /// Creates a new validator with default configuration.
    pub fn new() -> Self {
        Self {
            config: ValidationConfig::default(),
        }
    }

    /// Creates a new validator with custom configuration.
    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Sets strict mode, which reports warnings as errors.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.config.strict = strict;
        self
    }

    /// Validates every material in the document.
    pub fn validate_document(&self, doc: &Document) -> ValidationOutcome {
        self.run(doc, doc.materials())
    }

    /// Validates a single material: its own subtree plus the chain walk
    /// and receiver searches that reach through its ancestors. Defects in
    /// other materials' subtrees are not reported.
    pub fn validate_material(&self, doc: &Document, material: MaterialId) -> ValidationOutcome {
        self.run(doc, vec![material])
    }

    fn run(&self, doc: &Document, materials: Vec<MaterialId>) -> ValidationOutcome {
        let mut reporter = Reporter::new(self.config.strict);

        // Pass 1: Inheritance Validation
        let chains =
            inheritance_validation::run_inheritance_validation(doc, &materials, &mut reporter);

        // Pass 2: Reference Validation
        let shader_defs =
            reference_validation::run_reference_validation(doc, &materials, &mut reporter);

        // Pass 3: Connection Validation
        let connections = connection_validation::run_connection_validation(
            doc,
            &materials,
            &self.config,
            &mut reporter,
        );

        // Pass 4: Override Validation
        let receivers =
            override_validation::run_override_validation(doc, &materials, &chains, &mut reporter);

        // Pass 5: Type Validation
        type_validation::run_type_validation(doc, &receivers, &connections, &mut reporter);

        // Only fail validation if there are errors (not warnings or notes)
        if reporter.has_errors() {
            ValidationOutcome::failure(reporter.diagnostics)
        } else {
            let resolution =
                build_resolution(doc, &materials, chains, shader_defs, connections, receivers);
            ValidationOutcome::success(resolution, reporter.diagnostics)
        }
    }
}

impl Default for DocumentValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn build_resolution(
    doc: &Document,
    materials: &[MaterialId],
    chains: ChainMap,
    shader_defs: Vec<(ShaderRefId, Vec<NodeDefId>)>,
    connections: Vec<(BindInputId, OutputId)>,
    receivers: Vec<(OverrideId, BindingSite)>,
) -> Resolution {
    let mut chain_map = HashMap::new();
    let mut effective_refs = HashMap::new();
    for &material in materials {
        if let Some(Some(chain)) = chains.get(&material) {
            let mut refs = material.shader_refs(doc);
            for &ancestor in chain {
                refs.extend(ancestor.shader_refs(doc));
            }
            effective_refs.insert(material, refs);
            chain_map.insert(material, chain.clone());
        }
    }
    Resolution {
        chains: chain_map,
        effective_refs,
        shader_defs: shader_defs.into_iter().collect(),
        connections: connections.into_iter().collect(),
        receivers: receivers.into_iter().collect(),
    }
}

impl Document {
    /// Validates the whole document with the default configuration.
    ///
    /// Appends one human-readable line per finding to `message` when one
    /// is provided, and returns whether validation passed.
    pub fn validate(&self, message: Option<&mut String>) -> bool {
        let outcome = DocumentValidator::new().validate_document(self);
        append_lines(message, &outcome);
        outcome.is_success()
    }

    /// Validates a single material with the default configuration.
    ///
    /// Appends one human-readable line per finding to `message` when one
    /// is provided, and returns whether validation passed.
    pub fn validate_material(&self, material: MaterialId, message: Option<&mut String>) -> bool {
        let outcome = DocumentValidator::new().validate_material(self, material);
        append_lines(message, &outcome);
        outcome.is_success()
    }
}

fn append_lines(message: Option<&mut String>, outcome: &ValidationOutcome) {
    if let Some(buffer) = message {
        for diag in &outcome.diagnostics {
            buffer.push_str(&diag.line());
            buffer.push('\n');
        }
    }
}
