//! Element records and the closed set of element kinds.

use smol_str::SmolStr;
use std::collections::HashMap;
use std::fmt;

/// Identifier of an element inside a [`Document`](crate::tree::Document).
///
/// Ids are handed out by the owning document and stay valid for the life of
/// the element. Removing an element retires its id permanently; ids are
/// never reused, so a stale id can only miss, never alias a newer element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) u32);

impl ElementId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The closed set of element kinds a document can hold.
///
/// Every element carries exactly one kind, fixed at creation. The kind
/// decides which category string names the element in paths and generated
/// names, and which kinds of children it may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// The document root. Exactly one per document, never a child.
    Document,
    /// A material: an ordered bundle of shader references.
    Material,
    /// A reference from a material to a shader node definition.
    ShaderRef,
    /// A literal value bound to a uniform shader port.
    BindParam,
    /// A value or connection bound to a varying shader port.
    BindInput,
    /// A named value a material re-binds across its shader references.
    Override,
    /// A link from a material to the material it inherits from.
    MaterialInherit,
    /// A shader node definition: name, node family, and declared ports.
    NodeDef,
    /// A uniform port declared on a node definition or instantiated node.
    Parameter,
    /// A varying port declared on a node definition or instantiated node.
    Input,
    /// A typed output, either free-standing or inside a node graph.
    Output,
    /// A node instance inside a node graph.
    Node,
    /// A graph of nodes with typed outputs.
    NodeGraph,
    /// A look: a set of material-to-geometry assignments.
    Look,
    /// An assignment of a material to geometry within a look.
    MaterialAssign,
}

impl ElementKind {
    /// The category string for this kind, used in generated names and
    /// diagnostics.
    pub fn category(self) -> &'static str {
        match self {
            ElementKind::Document => "document",
            ElementKind::Material => "material",
            ElementKind::ShaderRef => "shaderref",
            ElementKind::BindParam => "bindparam",
            ElementKind::BindInput => "bindinput",
            ElementKind::Override => "override",
            ElementKind::MaterialInherit => "materialinherit",
            ElementKind::NodeDef => "nodedef",
            ElementKind::Parameter => "parameter",
            ElementKind::Input => "input",
            ElementKind::Output => "output",
            ElementKind::Node => "node",
            ElementKind::NodeGraph => "nodegraph",
            ElementKind::Look => "look",
            ElementKind::MaterialAssign => "materialassign",
        }
    }

    /// Whether an element of this kind may contain a child of `child` kind.
    ///
    /// The containment table is closed: anything not listed here is
    /// rejected at insertion time.
    pub fn can_contain(self, child: ElementKind) -> bool {
        use ElementKind::*;
        match self {
            Document => matches!(child, Material | NodeDef | NodeGraph | Output | Look),
            Material => matches!(child, ShaderRef | Override | MaterialInherit),
            ShaderRef => matches!(child, BindParam | BindInput),
            NodeDef | Node => matches!(child, Parameter | Input),
            NodeGraph => matches!(child, Node | Output),
            Look => matches!(child, MaterialAssign),
            BindParam | BindInput | Override | MaterialInherit | Parameter | Input | Output
            | MaterialAssign => false,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.category())
    }
}

/// A single element in the document tree.
///
/// An element is a kind tag, a name unique among same-kind siblings, an
/// ordered child list, and a string attribute map. All cross-references
/// between elements (inheritance links, node bindings, connections) live in
/// attributes as names, not ids, and are resolved on demand.
#[derive(Debug, Clone)]
pub struct Element {
    pub(crate) kind: ElementKind,
    pub(crate) name: SmolStr,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    pub(crate) attrs: HashMap<SmolStr, SmolStr>,
}

impl Element {
    pub(crate) fn new(kind: ElementKind, name: SmolStr, parent: Option<ElementId>) -> Self {
        Self {
            kind,
            name,
            parent,
            children: Vec::new(),
            attrs: HashMap::new(),
        }
    }

    /// The kind tag assigned at creation.
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// The element's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parent element, if any. Only the document root has none.
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// The element's children in insertion order.
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Looks up an attribute by key.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(SmolStr::as_str)
    }

    /// Whether the element carries the given attribute, even when its value
    /// is the empty string.
    pub fn has_attribute(&self, key: &str) -> bool {
        self.attrs.contains_key(key)
    }

    /// Iterates over the element's attributes in no particular order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
