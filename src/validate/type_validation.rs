//! Type validation: declared types must agree across resolved relations.

use crate::model::{BindInputId, OutputId, OverrideId};
use crate::resolve::BindingSite;
use crate::tree::Document;
use crate::validate::{Reporter, diag::ValidationDiagBuilder};

/// Compares declared types across the relations resolved by the earlier
/// passes: overrides against their receivers, bind inputs against their
/// connected outputs.
///
/// A side that declares no type is compatible with anything; only two
/// explicit declarations that differ are defects. Type names compare as
/// exact strings.
pub(super) fn run_type_validation(
    doc: &Document,
    receivers: &[(OverrideId, BindingSite)],
    connections: &[(BindInputId, OutputId)],
    reporter: &mut Reporter,
) {
    for &(over, site) in receivers {
        if let Some(declared) = doc.value_type(over)
            && let Some(target) = doc.value_type(site.element())
            && declared != target
        {
            reporter.report(
                over.element(),
                ValidationDiagBuilder::type_mismatch(
                    declared,
                    target,
                    doc.element_path(over),
                    site.path(doc),
                ),
            );
        }
    }

    for &(bind, output) in connections {
        if let Some(declared) = doc.value_type(bind)
            && let Some(target) = doc.value_type(output)
            && declared != target
        {
            reporter.report(
                bind.element(),
                ValidationDiagBuilder::type_mismatch(
                    declared,
                    target,
                    doc.element_path(bind),
                    doc.element_path(output),
                ),
            );
        }
    }
}
