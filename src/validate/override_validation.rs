//! Override validation: every override must reach a receiver.

use crate::model::{MaterialId, OverrideId};
use crate::resolve::{BindingSite, find_receiver};
use crate::tree::Document;
use crate::validate::{ChainMap, Reporter, diag::ValidationDiagBuilder};

/// Matches every override of the in-scope materials against the bindings
/// of their effective shader refs, using the chains walked in pass 1.
///
/// Materials whose chain is broken by a cycle are skipped: their search
/// set is undefined, and the cycle itself has already been reported.
pub(super) fn run_override_validation(
    doc: &Document,
    materials: &[MaterialId],
    chains: &ChainMap,
    reporter: &mut Reporter,
) -> Vec<(OverrideId, BindingSite)> {
    let mut receivers = Vec::new();
    for &material in materials {
        let Some(Some(chain)) = chains.get(&material) else {
            continue;
        };
        for over in material.overrides(doc) {
            let Some(name) = over.name(doc) else {
                continue;
            };
            match find_receiver(doc, material, chain, name) {
                Some(site) => receivers.push((over, site)),
                None => {
                    reporter.report(
                        over.element(),
                        ValidationDiagBuilder::unresolved_override_target(
                            name,
                            doc.element_path(over),
                        ),
                    );
                }
            }
        }
    }
    receivers
}
