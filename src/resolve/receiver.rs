//! Override receiver matching across the inheritance chain.

use crate::model::{BindInputId, BindParamId, MaterialId, OverrideId};
use crate::resolve::CycleError;
use crate::tree::{Document, ElementId, ElementKind};

/// The binding an override re-binds: a uniform or varying binding on some
/// shader ref in the owning material's effective set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingSite {
    /// A uniform value binding.
    Param(BindParamId),
    /// A varying value or connection binding.
    Input(BindInputId),
}

impl BindingSite {
    /// The underlying element id.
    pub fn element(self) -> ElementId {
        match self {
            BindingSite::Param(id) => id.element(),
            BindingSite::Input(id) => id.element(),
        }
    }

    /// The binding's name.
    pub fn name(self, doc: &Document) -> Option<&str> {
        doc.name(self.element())
    }

    /// The binding's slash-separated path from the document root.
    pub fn path(self, doc: &Document) -> String {
        doc.element_path(self.element())
    }
}

impl OverrideId {
    /// Finds the binding this override re-binds.
    ///
    /// Shader refs are searched in effective order: the owning material's
    /// own refs first, then each ancestor's, nearest ancestor first.
    /// Within one shader ref the bind elements are considered in
    /// declaration order, uniform and varying alike. The first name match
    /// wins; `Ok(None)` when nothing in the chain binds the name.
    ///
    /// Fails with [`CycleError`] when the owning material's chain does not
    /// terminate, since the search set is undefined in that case.
    pub fn receiver(self, doc: &Document) -> Result<Option<BindingSite>, CycleError> {
        let Some(material) = self.owning_material(doc) else {
            return Ok(None);
        };
        let chain = material.ancestor_chain(doc)?;
        let Some(name) = self.name(doc) else {
            return Ok(None);
        };
        Ok(find_receiver(doc, material, &chain, name))
    }

    fn owning_material(self, doc: &Document) -> Option<MaterialId> {
        let parent = doc.parent(self)?;
        MaterialId::from_element(doc, parent).ok()
    }
}

/// The receiver search over an already-walked chain. The validator reuses
/// this with its cached chains instead of re-walking per override.
pub(crate) fn find_receiver(
    doc: &Document,
    material: MaterialId,
    chain: &[MaterialId],
    name: &str,
) -> Option<BindingSite> {
    for mat in std::iter::once(material).chain(chain.iter().copied()) {
        for sref in mat.shader_refs(doc) {
            for &child in doc.children(sref) {
                if doc.name(child) != Some(name) {
                    continue;
                }
                match doc.kind(child) {
                    Some(ElementKind::BindParam) => {
                        return Some(BindingSite::Param(BindParamId::wrap(child)));
                    }
                    Some(ElementKind::BindInput) => {
                        return Some(BindingSite::Input(BindInputId::wrap(child)));
                    }
                    _ => {}
                }
            }
        }
    }
    None
}
