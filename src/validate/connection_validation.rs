//! Connection validation: bind input connections must resolve.

use crate::model::{BindInputId, MaterialId, OutputId};
use crate::tree::Document;
use crate::validate::{Reporter, ValidationConfig, diag::ValidationDiagBuilder};

/// Resolves the connection of every bound input owned by the in-scope
/// materials.
///
/// Only bindings that hold an `output` attribute are checked; a binding
/// carrying just a literal value is fine. Resolved connections are
/// additionally probed for dual bindings and cyclic upstream paths, both
/// reported as warnings when the configuration asks for them.
pub(super) fn run_connection_validation(
    doc: &Document,
    materials: &[MaterialId],
    config: &ValidationConfig,
    reporter: &mut Reporter,
) -> Vec<(BindInputId, OutputId)> {
    let mut connections = Vec::new();
    for &material in materials {
        for sref in material.shader_refs(doc) {
            for bind in sref.bind_inputs(doc) {
                check_bind_input(doc, bind, config, reporter, &mut connections);
            }
        }
    }
    connections
}

fn check_bind_input(
    doc: &Document,
    bind: BindInputId,
    config: &ValidationConfig,
    reporter: &mut Reporter,
    connections: &mut Vec<(BindInputId, OutputId)>,
) {
    let Some(output_name) = bind.output_str(doc) else {
        return;
    };
    let Some(output) = bind.connected_output(doc) else {
        reporter.report(
            bind.element(),
            ValidationDiagBuilder::unresolved_connection(
                output_name,
                bind.node_graph_str(doc),
                doc.element_path(bind),
            ),
        );
        return;
    };
    connections.push((bind, output));

    if config.warn_on_dual_binding && doc.value_str(bind).is_some() {
        reporter.report(
            bind.element(),
            ValidationDiagBuilder::dual_binding(output_name, doc.element_path(bind)),
        );
    }
    if config.warn_on_upstream_cycle && output.has_upstream_cycle(doc) {
        reporter.report(
            bind.element(),
            ValidationDiagBuilder::upstream_cycle(
                output_name,
                doc.element_path(bind),
                doc.element_path(output),
            ),
        );
    }
}
