//! Reference validation: shader refs must match node definitions.

use crate::model::{MaterialId, NodeDefId, ShaderRefId};
use crate::tree::Document;
use crate::validate::{Reporter, diag::ValidationDiagBuilder};

/// Resolves the node definition matches of every shader ref owned by the
/// in-scope materials.
///
/// A shader ref must match at least one definition. The diagnostic
/// distinguishes why it did not: an explicit reference that dangles, a
/// node family nothing implements, or a shader ref declaring neither.
pub(super) fn run_reference_validation(
    doc: &Document,
    materials: &[MaterialId],
    reporter: &mut Reporter,
) -> Vec<(ShaderRefId, Vec<NodeDefId>)> {
    let mut shader_defs = Vec::new();
    for &material in materials {
        for sref in material.shader_refs(doc) {
            let defs = sref.referenced_defs(doc);
            if defs.is_empty() {
                report_unmatched(doc, sref, reporter);
            }
            shader_defs.push((sref, defs));
        }
    }
    shader_defs
}

fn report_unmatched(doc: &Document, sref: ShaderRefId, reporter: &mut Reporter) {
    if let Some(node_def) = sref.node_def_str(doc) {
        reporter.report(
            sref.element(),
            ValidationDiagBuilder::unresolved_node_def_reference(
                node_def,
                doc.element_path(sref),
            ),
        );
    } else if let Some(node) = sref.node(doc) {
        reporter.report(
            sref.element(),
            ValidationDiagBuilder::unresolved_node_family(node, doc.element_path(sref)),
        );
    } else {
        reporter.report(
            sref.element(),
            ValidationDiagBuilder::undeclared_shader_ref(doc.element_path(sref)),
        );
    }
}
