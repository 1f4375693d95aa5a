//! Shading assembly document model with rich diagnostics.
//!
//! This library provides an element tree for materials, shader references,
//! node definitions and node graphs, a name-based resolution layer, and a
//! multi-pass validator with comprehensive error reporting built on miette
//! for beautiful diagnostic messages.
//!
//! # Example
//!
//! ```
//! use shadebind::tree::Document;
//!
//! let mut doc = Document::new();
//! doc.add_node_def(Some("ND_standard_surface"), Some("standard_surface")).unwrap();
//!
//! let plastic = doc.add_material(Some("plastic")).unwrap();
//! plastic.add_shader_ref(&mut doc, Some("surface1"), Some("standard_surface")).unwrap();
//!
//! // Check that the assembly resolves and validates cleanly
//! let mut report = String::new();
//! assert!(doc.validate(Some(&mut report)), "{report}");
//! ```

pub mod diag;
pub mod model;
pub mod resolve;
pub mod tree;
pub mod validate;

// Re-export element tree primitives.
pub use tree::{Document, Element, ElementId, ElementKind, TreeError};

// Re-export diagnostic types for convenience.
pub use diag::{Diag, DiagLabel, DiagSeverity, LabelRole};

// Re-export typed element handles.
pub use model::{
    BindInputId, BindParamId, InputId, LookId, MaterialAssignId, MaterialId, MaterialInheritId,
    NodeDefId, NodeGraphId, NodeId, OutputId, OverrideId, ParameterId, ShaderRefId,
};

// Re-export resolution and validation entry points.
pub use resolve::{BindingSite, CycleError};
pub use validate::diag::DiagKind;
pub use validate::{DocumentValidator, Resolution, ValidationConfig, ValidationOutcome};
