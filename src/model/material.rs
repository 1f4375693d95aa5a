//! Materials and their children: shader refs, overrides, inherit links.

use crate::model::{MaterialId, MaterialInheritId, NODE_ATTR, OverrideId, ShaderRefId};
use crate::tree::{Document, ElementKind, TreeError};

impl Document {
    /// Adds a material to the document, or returns the existing one when a
    /// material with that name is already present. With `None` a unique
    /// name is generated.
    pub fn add_material(&mut self, name: Option<&str>) -> Result<MaterialId, TreeError> {
        let id = self.add_child(self.root(), ElementKind::Material, name)?;
        Ok(MaterialId::wrap(id))
    }

    /// Finds a material by name.
    pub fn material(&self, name: &str) -> Option<MaterialId> {
        self.find_top_level(ElementKind::Material, name)
            .map(MaterialId::wrap)
    }

    /// All materials in document order.
    pub fn materials(&self) -> Vec<MaterialId> {
        self.top_level_of_kind(ElementKind::Material)
            .map(MaterialId::wrap)
            .collect()
    }

    /// Removes a material and everything under it. Does nothing when no
    /// material has that name.
    pub fn remove_material(&mut self, name: &str) {
        self.remove_child_of_kind(self.root(), ElementKind::Material, name);
    }
}

impl MaterialId {
    /// Adds a shader reference to this material, or returns the existing
    /// one when the name is already taken by a shader ref.
    ///
    /// The `node` family is applied only when the shader ref is actually
    /// created; a repeated add never rewrites an existing element.
    pub fn add_shader_ref(
        self,
        doc: &mut Document,
        name: Option<&str>,
        node: Option<&str>,
    ) -> Result<ShaderRefId, TreeError> {
        let existed = name
            .filter(|n| !n.is_empty())
            .and_then(|n| doc.child_of_kind(self, ElementKind::ShaderRef, n))
            .is_some();
        let id = doc.add_child(self, ElementKind::ShaderRef, name)?;
        if !existed && let Some(node) = node.filter(|n| !n.is_empty()) {
            doc.set_attribute(id, NODE_ATTR, node);
        }
        Ok(ShaderRefId::wrap(id))
    }

    /// Finds a shader reference of this material by name.
    pub fn shader_ref(self, doc: &Document, name: &str) -> Option<ShaderRefId> {
        doc.child_of_kind(self, ElementKind::ShaderRef, name)
            .map(ShaderRefId::wrap)
    }

    /// The material's own shader references in declaration order. This
    /// does not consult inheritance; see
    /// [`effective_shader_refs`](Self::effective_shader_refs) for the
    /// composed view.
    pub fn shader_refs(self, doc: &Document) -> Vec<ShaderRefId> {
        doc.children_of_kind(self, ElementKind::ShaderRef)
            .map(ShaderRefId::wrap)
            .collect()
    }

    /// Removes a shader reference by name. Does nothing when absent.
    pub fn remove_shader_ref(self, doc: &mut Document, name: &str) {
        doc.remove_child_of_kind(self, ElementKind::ShaderRef, name);
    }

    /// Adds a named override to this material, or returns the existing one.
    pub fn add_override(self, doc: &mut Document, name: &str) -> Result<OverrideId, TreeError> {
        let id = doc.add_child(self, ElementKind::Override, Some(name))?;
        Ok(OverrideId::wrap(id))
    }

    /// Finds an override of this material by name.
    pub fn override_named(self, doc: &Document, name: &str) -> Option<OverrideId> {
        doc.child_of_kind(self, ElementKind::Override, name)
            .map(OverrideId::wrap)
    }

    /// The material's overrides in declaration order.
    pub fn overrides(self, doc: &Document) -> Vec<OverrideId> {
        doc.children_of_kind(self, ElementKind::Override)
            .map(OverrideId::wrap)
            .collect()
    }

    /// Removes an override by name. Does nothing when absent.
    pub fn remove_override(self, doc: &mut Document, name: &str) {
        doc.remove_child_of_kind(self, ElementKind::Override, name);
    }

    /// Sets the value of the named override, creating the override when it
    /// does not exist yet. An empty `value_type` keeps the override's
    /// currently declared type.
    pub fn set_override_value(
        self,
        doc: &mut Document,
        name: &str,
        value: &str,
        value_type: &str,
    ) -> Result<OverrideId, TreeError> {
        let over = self.add_override(doc, name)?;
        doc.set_value(over, value, value_type);
        Ok(over)
    }

    /// Adds an inheritance link naming the material inherited from, or
    /// returns the existing link with that name.
    pub fn add_inherit(
        self,
        doc: &mut Document,
        material_name: &str,
    ) -> Result<MaterialInheritId, TreeError> {
        let id = doc.add_child(self, ElementKind::MaterialInherit, Some(material_name))?;
        Ok(MaterialInheritId::wrap(id))
    }

    /// Finds an inheritance link by the name of the material it points at.
    pub fn inherit(self, doc: &Document, material_name: &str) -> Option<MaterialInheritId> {
        doc.child_of_kind(self, ElementKind::MaterialInherit, material_name)
            .map(MaterialInheritId::wrap)
    }

    /// The material's inheritance links in declaration order.
    pub fn inherits(self, doc: &Document) -> Vec<MaterialInheritId> {
        doc.children_of_kind(self, ElementKind::MaterialInherit)
            .map(MaterialInheritId::wrap)
            .collect()
    }

    /// Removes an inheritance link by name. Does nothing when absent.
    pub fn remove_inherit(self, doc: &mut Document, material_name: &str) {
        doc.remove_child_of_kind(self, ElementKind::MaterialInherit, material_name);
    }
}
