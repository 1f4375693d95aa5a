//! Inheritance validation: chain termination and inherit link resolution.

use crate::model::MaterialId;
use crate::resolve::CycleError;
use crate::tree::Document;
use crate::validate::diag::{DiagKind, ValidationDiagBuilder};
use crate::validate::{ChainMap, Reporter};
use std::collections::HashMap;

/// Walks the ancestor chain of every in-scope material and checks its
/// inherit links.
///
/// Every link must name an existing material, including links past the
/// first, which never contribute a parent. A chain that revisits a
/// material is reported once per cycle and recorded as broken, so later
/// passes know to skip chain-dependent checks for its materials.
pub(super) fn run_inheritance_validation(
    doc: &Document,
    materials: &[MaterialId],
    reporter: &mut Reporter,
) -> ChainMap {
    let mut chains: ChainMap = HashMap::new();
    for &material in materials {
        for link in material.inherits(doc) {
            if let Some(name) = link.name(doc)
                && doc.material(name).is_none()
            {
                reporter.report(
                    link.element(),
                    ValidationDiagBuilder::unresolved_material_reference(
                        name,
                        doc.element_path(link),
                    ),
                );
            }
        }

        match material.ancestor_chain(doc) {
            Ok(chain) => {
                chains.insert(material, Some(chain));
            }
            Err(err) => {
                report_cycle(doc, &err, reporter);
                chains.insert(material, None);
            }
        }
    }
    chains
}

fn report_cycle(doc: &Document, err: &CycleError, reporter: &mut Reporter) {
    let members = err.cycle_members();
    let already = members
        .iter()
        .any(|member| reporter.was_reported(member.element(), DiagKind::CyclicInheritance));
    if already {
        return;
    }
    let Some((&first, rest)) = members.split_first() else {
        return;
    };
    reporter.report(
        first.element(),
        ValidationDiagBuilder::cyclic_inheritance(
            &err.cycle_description(),
            doc.element_path(first),
        ),
    );
    for member in rest {
        reporter.mark_reported(member.element(), DiagKind::CyclicInheritance);
    }
}
