//! Typed handles and domain operations over the element store.
//!
//! Each element kind gets a thin id newtype ([`MaterialId`],
//! [`ShaderRefId`], ...) that can only be obtained by creating an element
//! of that kind or by checking an untyped [`ElementId`] against the store.
//! Domain operations hang off these handles, so a bind input can never be
//! passed where a material is expected.
//!
//! Cross-references between elements are stored as names in the attribute
//! keys defined here, mirroring how assembly documents are interchanged.
//! They are resolved on demand by [`crate::resolve`] and never cached.

mod interface;
mod look;
mod material;
mod shader_ref;

use crate::tree::{Document, ElementId, ElementKind, TreeError};

/// Attribute holding the node family a shader ref or node instantiates.
pub const NODE_ATTR: &str = "node";
/// Attribute naming the exact node definition a shader ref binds to.
pub const NODE_DEF_ATTR: &str = "nodedef";
/// Attribute naming the node graph that hosts a connected output.
pub const NODE_GRAPH_ATTR: &str = "nodegraph";
/// Attribute naming the output a bind input connects to.
pub const OUTPUT_ATTR: &str = "output";
/// Attribute naming the upstream node an output or input connects to.
pub const NODE_NAME_ATTR: &str = "nodename";
/// Attribute holding a channel swizzle applied across a connection.
pub const CHANNELS_ATTR: &str = "channels";
/// Attribute naming the material a material assign applies.
pub const MATERIAL_ATTR: &str = "material";
/// Attribute naming the geometry a material assign targets.
pub const GEOM_ATTR: &str = "geom";
/// Attribute holding a literal value.
pub const VALUE_ATTR: &str = "value";
/// Attribute holding a declared type name.
pub const TYPE_ATTR: &str = "type";

macro_rules! typed_element_id {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(ElementId);

        impl $name {
            /// Wraps a raw id after checking that it refers to a live
            /// element of the matching kind.
            pub fn from_element(doc: &Document, id: ElementId) -> Result<Self, TreeError> {
                match doc.kind(id) {
                    Some(ElementKind::$kind) => Ok(Self(id)),
                    Some(found) => Err(TreeError::KindMismatch {
                        expected: ElementKind::$kind,
                        found,
                    }),
                    None => Err(TreeError::MissingElement(id)),
                }
            }

            /// The underlying element id.
            pub fn element(self) -> ElementId {
                self.0
            }

            /// The element's name.
            pub fn name(self, doc: &Document) -> Option<&str> {
                doc.name(self.0)
            }

            /// The element's slash-separated path from the document root.
            pub fn path(self, doc: &Document) -> String {
                doc.element_path(self.0)
            }

            pub(crate) fn wrap(id: ElementId) -> Self {
                Self(id)
            }
        }

        impl From<$name> for ElementId {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

typed_element_id!(
    /// Handle to a material element.
    MaterialId => Material
);
typed_element_id!(
    /// Handle to a shader reference inside a material.
    ShaderRefId => ShaderRef
);
typed_element_id!(
    /// Handle to a uniform value binding inside a shader reference.
    BindParamId => BindParam
);
typed_element_id!(
    /// Handle to a varying value or connection binding inside a shader
    /// reference.
    BindInputId => BindInput
);
typed_element_id!(
    /// Handle to a named override inside a material.
    OverrideId => Override
);
typed_element_id!(
    /// Handle to an inheritance link inside a material. The link's name
    /// is the name of the material inherited from.
    MaterialInheritId => MaterialInherit
);
typed_element_id!(
    /// Handle to a node definition.
    NodeDefId => NodeDef
);
typed_element_id!(
    /// Handle to a uniform port declared on a node definition or node.
    ParameterId => Parameter
);
typed_element_id!(
    /// Handle to a varying port declared on a node definition or node.
    InputId => Input
);
typed_element_id!(
    /// Handle to a typed output, free-standing or inside a node graph.
    OutputId => Output
);
typed_element_id!(
    /// Handle to a node instance inside a node graph.
    NodeId => Node
);
typed_element_id!(
    /// Handle to a node graph.
    NodeGraphId => NodeGraph
);
typed_element_id!(
    /// Handle to a look.
    LookId => Look
);
typed_element_id!(
    /// Handle to a material-to-geometry assignment inside a look.
    MaterialAssignId => MaterialAssign
);

impl Document {
    /// Sets the literal value of an element, together with its declared
    /// type when `value_type` is non-empty. An empty `value_type` keeps
    /// whatever type the element already declares.
    pub fn set_value(&mut self, id: impl Into<ElementId>, value: &str, value_type: &str) {
        let id = id.into();
        self.set_attribute(id, VALUE_ATTR, value);
        if !value_type.is_empty() {
            self.set_attribute(id, TYPE_ATTR, value_type);
        }
    }

    /// The literal value stored on an element, if any.
    pub fn value_str(&self, id: impl Into<ElementId>) -> Option<&str> {
        self.attribute(id, VALUE_ATTR)
    }

    /// The declared type of an element, if any.
    pub fn value_type(&self, id: impl Into<ElementId>) -> Option<&str> {
        self.attribute(id, TYPE_ATTR)
    }

    /// Sets only the declared type of an element.
    pub fn set_value_type(&mut self, id: impl Into<ElementId>, value_type: &str) {
        self.set_attribute(id, TYPE_ATTR, value_type);
    }
}
