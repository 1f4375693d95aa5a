//! The document: an arena-backed element tree.

use crate::tree::{Element, ElementId, ElementKind, TreeError};
use smol_str::SmolStr;

/// An in-memory assembly document.
///
/// The document owns every element in a slot arena and hands out
/// [`ElementId`]s into it. Parent/child structure is explicit; all other
/// relations (inheritance links, shader bindings, connections) are weak
/// name references stored in attributes and resolved on demand, so editing
/// one element never invalidates another.
///
/// Removed elements leave tombstoned slots behind. Ids are never reused,
/// which keeps stale ids harmless: they miss instead of aliasing.
#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Option<Element>>,
}

impl Document {
    /// Creates an empty document containing only the root element.
    pub fn new() -> Self {
        Self {
            slots: vec![Some(Element::new(
                ElementKind::Document,
                SmolStr::default(),
                None,
            ))],
        }
    }

    /// The root element. Always present; every other element descends
    /// from it.
    pub fn root(&self) -> ElementId {
        ElementId(0)
    }

    fn slot(&self, id: ElementId) -> Option<&Element> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    fn slot_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Looks up an element by id. Returns `None` for removed elements.
    pub fn element(&self, id: impl Into<ElementId>) -> Option<&Element> {
        self.slot(id.into())
    }

    /// Whether the id refers to a live element of this document.
    pub fn contains(&self, id: impl Into<ElementId>) -> bool {
        self.slot(id.into()).is_some()
    }

    /// The number of live elements, including the root.
    pub fn element_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// The kind of an element.
    pub fn kind(&self, id: impl Into<ElementId>) -> Option<ElementKind> {
        self.slot(id.into()).map(Element::kind)
    }

    /// The name of an element.
    pub fn name(&self, id: impl Into<ElementId>) -> Option<&str> {
        self.slot(id.into()).map(Element::name)
    }

    /// The parent of an element. `None` for the root and for removed
    /// elements.
    pub fn parent(&self, id: impl Into<ElementId>) -> Option<ElementId> {
        self.slot(id.into()).and_then(Element::parent)
    }

    /// The children of an element in insertion order. Empty for removed
    /// elements.
    pub fn children(&self, id: impl Into<ElementId>) -> &[ElementId] {
        self.slot(id.into())
            .map_or(&[], |el| el.children.as_slice())
    }

    /// Adds a child element under `parent`.
    ///
    /// With `Some(name)`, an existing child of the same kind and name is
    /// returned as-is instead of creating a duplicate, which keeps repeated
    /// adds safe. With `None` (or an empty name) a fresh name of the form
    /// `<category><n>` is generated, unique among same-kind siblings.
    ///
    /// Fails if `parent` has been removed or if the containment table does
    /// not allow `kind` under the parent's kind.
    pub fn add_child(
        &mut self,
        parent: impl Into<ElementId>,
        kind: ElementKind,
        name: Option<&str>,
    ) -> Result<ElementId, TreeError> {
        let parent = parent.into();
        let parent_kind = self
            .slot(parent)
            .map(Element::kind)
            .ok_or(TreeError::MissingElement(parent))?;
        if !parent_kind.can_contain(kind) {
            return Err(TreeError::InvalidChild {
                parent: parent_kind,
                child: kind,
            });
        }

        let name = match name {
            Some(name) if !name.is_empty() => {
                if let Some(existing) = self.child_of_kind(parent, kind, name) {
                    return Ok(existing);
                }
                SmolStr::new(name)
            }
            _ => self.generate_child_name(parent, kind),
        };

        let id = ElementId(self.slots.len() as u32);
        self.slots
            .push(Some(Element::new(kind, name, Some(parent))));
        if let Some(parent_el) = self.slot_mut(parent) {
            parent_el.children.push(id);
        }
        Ok(id)
    }

    /// Finds a direct child by kind and name.
    pub fn child_of_kind(
        &self,
        parent: impl Into<ElementId>,
        kind: ElementKind,
        name: &str,
    ) -> Option<ElementId> {
        let parent = parent.into();
        self.children(parent).iter().copied().find(|&child| {
            self.slot(child)
                .is_some_and(|el| el.kind == kind && el.name.as_str() == name)
        })
    }

    /// Iterates over the direct children of the given kind, in insertion
    /// order.
    pub fn children_of_kind(
        &self,
        parent: impl Into<ElementId>,
        kind: ElementKind,
    ) -> impl Iterator<Item = ElementId> + '_ {
        let parent = parent.into();
        self.children(parent)
            .iter()
            .copied()
            .filter(move |&child| self.kind(child) == Some(kind))
    }

    /// Removes the child with the given kind and name, along with its
    /// whole subtree. Does nothing when no such child exists.
    pub fn remove_child_of_kind(
        &mut self,
        parent: impl Into<ElementId>,
        kind: ElementKind,
        name: &str,
    ) {
        let parent = parent.into();
        let Some(id) = self.child_of_kind(parent, kind, name) else {
            return;
        };
        if let Some(parent_el) = self.slot_mut(parent) {
            parent_el.children.retain(|&child| child != id);
        }
        // Tombstone the subtree; slots are never reused.
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(slot) = self.slots.get_mut(next.index())
                && let Some(el) = slot.take()
            {
                stack.extend(el.children);
            }
        }
    }

    /// Looks up an attribute on an element.
    pub fn attribute(&self, id: impl Into<ElementId>, key: &str) -> Option<&str> {
        self.slot(id.into()).and_then(|el| el.attribute(key))
    }

    /// Sets an attribute on an element, replacing any previous value.
    /// Has no effect when the element has been removed.
    pub fn set_attribute(&mut self, id: impl Into<ElementId>, key: &str, value: &str) {
        if let Some(el) = self.slot_mut(id.into()) {
            el.attrs.insert(SmolStr::new(key), SmolStr::new(value));
        }
    }

    /// Whether the element carries the attribute, even with an empty value.
    pub fn has_attribute(&self, id: impl Into<ElementId>, key: &str) -> bool {
        self.slot(id.into()).is_some_and(|el| el.has_attribute(key))
    }

    /// Removes an attribute from an element. Does nothing when the
    /// attribute is absent.
    pub fn remove_attribute(&mut self, id: impl Into<ElementId>, key: &str) {
        if let Some(el) = self.slot_mut(id.into()) {
            el.attrs.remove(key);
        }
    }

    /// Finds the first element with the given name anywhere in the
    /// document, in depth-first document order. Any kind matches.
    pub fn find_by_name(&self, name: &str) -> Option<ElementId> {
        let mut stack: Vec<ElementId> = self
            .children(self.root())
            .iter()
            .rev()
            .copied()
            .collect();
        while let Some(id) = stack.pop() {
            if let Some(el) = self.slot(id) {
                if el.name.as_str() == name {
                    return Some(id);
                }
                stack.extend(el.children.iter().rev().copied());
            }
        }
        None
    }

    /// Finds a top-level element by kind and name.
    pub fn find_top_level(&self, kind: ElementKind, name: &str) -> Option<ElementId> {
        self.child_of_kind(self.root(), kind, name)
    }

    /// Iterates over the top-level elements of the given kind, in
    /// insertion order.
    pub fn top_level_of_kind(&self, kind: ElementKind) -> impl Iterator<Item = ElementId> + '_ {
        self.children_of_kind(self.root(), kind)
    }

    /// The slash-separated path of an element from the root, e.g.
    /// `/plastic/surface1/roughness`. The root's path is `/`; removed
    /// elements render as `<missing>`.
    pub fn element_path(&self, id: impl Into<ElementId>) -> String {
        let id = id.into();
        if id == self.root() {
            return "/".to_string();
        }
        let mut segments = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == self.root() {
                break;
            }
            match self.slot(current) {
                Some(el) => {
                    segments.push(el.name.as_str());
                    cursor = el.parent;
                }
                None => return "<missing>".to_string(),
            }
        }
        let mut path = String::new();
        for segment in segments.iter().rev() {
            path.push('/');
            path.push_str(segment);
        }
        path
    }

    fn generate_child_name(&self, parent: ElementId, kind: ElementKind) -> SmolStr {
        let category = kind.category();
        let mut n = 1usize;
        loop {
            let candidate = format!("{category}{n}");
            if self.child_of_kind(parent, kind, &candidate).is_none() {
                return SmolStr::from(candidate);
            }
            n += 1;
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
