//! Looks: named sets of material-to-geometry assignments.

use crate::model::{GEOM_ATTR, LookId, MATERIAL_ATTR, MaterialAssignId, MaterialId};
use crate::tree::{Document, ElementKind, TreeError};

impl Document {
    /// Adds a look, or returns the existing one with that name.
    pub fn add_look(&mut self, name: Option<&str>) -> Result<LookId, TreeError> {
        let id = self.add_child(self.root(), ElementKind::Look, name)?;
        Ok(LookId::wrap(id))
    }

    /// Finds a look by name.
    pub fn look(&self, name: &str) -> Option<LookId> {
        self.find_top_level(ElementKind::Look, name).map(LookId::wrap)
    }

    /// All looks in document order.
    pub fn looks(&self) -> Vec<LookId> {
        self.top_level_of_kind(ElementKind::Look)
            .map(LookId::wrap)
            .collect()
    }

    /// Removes a look and its assignments. Does nothing when absent.
    pub fn remove_look(&mut self, name: &str) {
        self.remove_child_of_kind(self.root(), ElementKind::Look, name);
    }
}

impl LookId {
    /// Adds a material assignment to this look, or returns the existing
    /// one with that name. The assigned `material` name is applied only on
    /// creation.
    pub fn add_material_assign(
        self,
        doc: &mut Document,
        name: Option<&str>,
        material: Option<&str>,
    ) -> Result<MaterialAssignId, TreeError> {
        let existed = name
            .filter(|n| !n.is_empty())
            .and_then(|n| doc.child_of_kind(self, ElementKind::MaterialAssign, n))
            .is_some();
        let id = doc.add_child(self, ElementKind::MaterialAssign, name)?;
        if !existed && let Some(material) = material.filter(|m| !m.is_empty()) {
            doc.set_attribute(id, MATERIAL_ATTR, material);
        }
        Ok(MaterialAssignId::wrap(id))
    }

    /// Finds a material assignment by name.
    pub fn material_assign(self, doc: &Document, name: &str) -> Option<MaterialAssignId> {
        doc.child_of_kind(self, ElementKind::MaterialAssign, name)
            .map(MaterialAssignId::wrap)
    }

    /// The look's material assignments in declaration order.
    pub fn material_assigns(self, doc: &Document) -> Vec<MaterialAssignId> {
        doc.children_of_kind(self, ElementKind::MaterialAssign)
            .map(MaterialAssignId::wrap)
            .collect()
    }

    /// Removes a material assignment by name. Does nothing when absent.
    pub fn remove_material_assign(self, doc: &mut Document, name: &str) {
        doc.remove_child_of_kind(self, ElementKind::MaterialAssign, name);
    }
}

impl MaterialAssignId {
    /// The name of the material this assignment applies, if declared.
    pub fn material_str(self, doc: &Document) -> Option<&str> {
        doc.attribute(self, MATERIAL_ATTR)
    }

    /// Names the material this assignment applies.
    pub fn set_material_str(self, doc: &mut Document, material: &str) {
        doc.set_attribute(self, MATERIAL_ATTR, material);
    }

    /// The geometry expression this assignment targets, if declared.
    pub fn geom(self, doc: &Document) -> Option<&str> {
        doc.attribute(self, GEOM_ATTR)
    }

    /// Sets the geometry expression this assignment targets.
    pub fn set_geom(self, doc: &mut Document, geom: &str) {
        doc.set_attribute(self, GEOM_ATTR, geom);
    }

    /// Resolves the assigned material by name. `None` when the name does
    /// not resolve or no material is declared.
    pub fn referenced_material(self, doc: &Document) -> Option<MaterialId> {
        self.material_str(doc).and_then(|name| doc.material(name))
    }
}

impl MaterialId {
    /// All material assignments across all looks that apply this material,
    /// in document order. Matching is by current name, so renaming the
    /// material changes what this returns.
    pub fn referencing_material_assigns(self, doc: &Document) -> Vec<MaterialAssignId> {
        let Some(name) = self.name(doc) else {
            return Vec::new();
        };
        let mut assigns = Vec::new();
        for look in doc.looks() {
            for assign in look.material_assigns(doc) {
                if assign.material_str(doc) == Some(name) {
                    assigns.push(assign);
                }
            }
        }
        assigns
    }
}
