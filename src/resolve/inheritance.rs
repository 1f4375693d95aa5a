//! Inheritance chains: parent links, chain walking, cycle detection.

use crate::model::{MaterialId, ShaderRefId};
use crate::tree::Document;
use smol_str::SmolStr;
use std::fmt;

/// A material inheritance walk that revisited a material.
///
/// Carries the full walk in order, ending at the repeated material, so
/// callers can render the loop (`plastic -> base -> plastic`) and identify
/// which materials form the cycle proper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleError {
    walk: Vec<MaterialId>,
    names: Vec<SmolStr>,
    cycle_start: usize,
}

impl CycleError {
    fn new(doc: &Document, walk: Vec<MaterialId>) -> Self {
        let repeated = walk[walk.len() - 1];
        let cycle_start = walk
            .iter()
            .position(|&id| id == repeated)
            .unwrap_or(0);
        let names = walk
            .iter()
            .map(|&id| SmolStr::new(doc.name(id).unwrap_or("<missing>")))
            .collect();
        Self {
            walk,
            names,
            cycle_start,
        }
    }

    /// The full walk, starting at the material the query began from and
    /// ending at the repeated material.
    pub fn walk(&self) -> &[MaterialId] {
        &self.walk
    }

    /// The materials that form the cycle itself, excluding any lead-in
    /// from the starting material and the final repeat.
    pub fn cycle_members(&self) -> &[MaterialId] {
        &self.walk[self.cycle_start..self.walk.len() - 1]
    }

    /// The walk rendered as `a -> b -> a`.
    pub fn description(&self) -> String {
        self.names
            .iter()
            .map(SmolStr::as_str)
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    /// The cycle itself rendered as `b -> c -> b`, without any lead-in
    /// from the starting material.
    pub fn cycle_description(&self) -> String {
        let mut names: Vec<&str> = self.names[self.cycle_start..self.names.len() - 1]
            .iter()
            .map(SmolStr::as_str)
            .collect();
        names.push(&self.names[self.cycle_start]);
        names.join(" -> ")
    }
}

impl fmt::Display for CycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cyclic material inheritance: {}", self.description())
    }
}

impl std::error::Error for CycleError {}

impl MaterialId {
    /// The material this one inherits from, resolved by name.
    ///
    /// The first inheritance link names the parent; additional links are
    /// ignored. A link whose name does not resolve yields `None`, ending
    /// the chain there. Validation reports such dangling links.
    pub fn inherits_from(self, doc: &Document) -> Option<MaterialId> {
        self.inherits(doc)
            .first()
            .and_then(|link| link.name(doc))
            .and_then(|name| doc.material(name))
    }

    /// Rewrites this material's inheritance to point at `parent`, or
    /// clears it with `None`.
    ///
    /// The prospective chain is validated before anything is mutated:
    /// walking up from `parent` must terminate without revisiting a
    /// material, whether the loop would come back here or already exists
    /// among the ancestors. On rejection the document is left untouched.
    pub fn set_inherits_from(
        self,
        doc: &mut Document,
        parent: Option<MaterialId>,
    ) -> Result<(), CycleError> {
        if let Some(parent) = parent {
            let mut walk = vec![self];
            let mut cursor = parent;
            loop {
                if walk.contains(&cursor) {
                    walk.push(cursor);
                    return Err(CycleError::new(doc, walk));
                }
                walk.push(cursor);
                match cursor.inherits_from(doc) {
                    Some(next) => cursor = next,
                    None => break,
                }
            }
        }

        let links: Vec<String> = self
            .inherits(doc)
            .iter()
            .filter_map(|link| link.name(doc))
            .map(str::to_string)
            .collect();
        for link in links {
            self.remove_inherit(doc, &link);
        }
        if let Some(parent) = parent
            && let Some(name) = parent.name(doc).map(str::to_string)
        {
            // A stale handle is a no-op here, matching the attribute
            // mutators.
            self.add_inherit(doc, &name).ok();
        }
        Ok(())
    }

    /// The material's ancestors, nearest first, excluding the material
    /// itself. Empty when the material inherits from nothing.
    ///
    /// Fails with [`CycleError`] when the walk revisits a material; no
    /// partial chain is returned.
    pub fn ancestor_chain(self, doc: &Document) -> Result<Vec<MaterialId>, CycleError> {
        let mut chain = Vec::new();
        let mut walk = vec![self];
        let mut current = self;
        while let Some(parent) = current.inherits_from(doc) {
            if walk.contains(&parent) {
                walk.push(parent);
                return Err(CycleError::new(doc, walk));
            }
            chain.push(parent);
            walk.push(parent);
            current = parent;
        }
        Ok(chain)
    }

    /// The shader references in effect for this material: its own in
    /// declaration order, then each ancestor's, nearest ancestor first.
    ///
    /// The list is additive; same-named shader refs from different chain
    /// levels all appear.
    pub fn effective_shader_refs(
        self,
        doc: &Document,
    ) -> Result<Vec<ShaderRefId>, CycleError> {
        let chain = self.ancestor_chain(doc)?;
        let mut refs = self.shader_refs(doc);
        for ancestor in chain {
            refs.extend(ancestor.shader_refs(doc));
        }
        Ok(refs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_read_the_parent_link() {
        let mut doc = Document::new();
        let base = doc.add_material(Some("base")).unwrap();
        let plastic = doc.add_material(Some("plastic")).unwrap();

        assert_eq!(plastic.inherits_from(&doc), None);
        plastic.set_inherits_from(&mut doc, Some(base)).unwrap();
        assert_eq!(plastic.inherits_from(&doc), Some(base));
    }

    #[test]
    fn reassigning_the_parent_replaces_the_link() {
        let mut doc = Document::new();
        let base = doc.add_material(Some("base")).unwrap();
        let other = doc.add_material(Some("other")).unwrap();
        let plastic = doc.add_material(Some("plastic")).unwrap();

        plastic.set_inherits_from(&mut doc, Some(base)).unwrap();
        plastic.set_inherits_from(&mut doc, Some(other)).unwrap();

        assert_eq!(plastic.inherits_from(&doc), Some(other));
        assert_eq!(
            plastic.inherits(&doc).len(),
            1,
            "the old link must be removed, not shadowed"
        );

        plastic.set_inherits_from(&mut doc, None).unwrap();
        assert_eq!(plastic.inherits_from(&doc), None);
        assert!(plastic.inherits(&doc).is_empty());
    }

    #[test]
    fn ancestor_chain_is_nearest_first_and_excludes_the_start() {
        let mut doc = Document::new();
        let grandparent = doc.add_material(Some("grandparent")).unwrap();
        let parent = doc.add_material(Some("parent")).unwrap();
        let child = doc.add_material(Some("child")).unwrap();
        parent.set_inherits_from(&mut doc, Some(grandparent)).unwrap();
        child.set_inherits_from(&mut doc, Some(parent)).unwrap();

        assert_eq!(child.ancestor_chain(&doc).unwrap(), vec![parent, grandparent]);
        assert_eq!(parent.ancestor_chain(&doc).unwrap(), vec![grandparent]);
        assert!(grandparent.ancestor_chain(&doc).unwrap().is_empty());
    }

    #[test]
    fn dangling_parent_name_ends_the_chain() {
        let mut doc = Document::new();
        let plastic = doc.add_material(Some("plastic")).unwrap();
        plastic.add_inherit(&mut doc, "missing").unwrap();

        assert_eq!(plastic.inherits_from(&doc), None);
        assert!(plastic.ancestor_chain(&doc).unwrap().is_empty());
    }

    #[test]
    fn self_inheritance_is_rejected_without_mutating() {
        let mut doc = Document::new();
        let plastic = doc.add_material(Some("plastic")).unwrap();

        let err = plastic
            .set_inherits_from(&mut doc, Some(plastic))
            .unwrap_err();
        assert_eq!(err.description(), "plastic -> plastic");
        assert!(
            plastic.inherits(&doc).is_empty(),
            "a rejected assignment must leave the document untouched"
        );
    }

    #[test]
    fn two_step_cycle_is_rejected_without_mutating() {
        let mut doc = Document::new();
        let base = doc.add_material(Some("base")).unwrap();
        let plastic = doc.add_material(Some("plastic")).unwrap();
        plastic.set_inherits_from(&mut doc, Some(base)).unwrap();

        let err = base.set_inherits_from(&mut doc, Some(plastic)).unwrap_err();
        assert_eq!(err.description(), "base -> plastic -> base");
        assert_eq!(
            base.inherits_from(&doc),
            None,
            "base must not gain a parent from the rejected call"
        );
        assert_eq!(plastic.inherits_from(&doc), Some(base));
    }

    #[test]
    fn linking_under_a_broken_chain_is_rejected() {
        let mut doc = Document::new();
        let a = doc.add_material(Some("a")).unwrap();
        let b = doc.add_material(Some("b")).unwrap();
        let fresh = doc.add_material(Some("fresh")).unwrap();
        // Build a cycle through raw links, bypassing the checked setter.
        a.add_inherit(&mut doc, "b").unwrap();
        b.add_inherit(&mut doc, "a").unwrap();

        let err = fresh.set_inherits_from(&mut doc, Some(a)).unwrap_err();
        assert_eq!(err.description(), "fresh -> a -> b -> a");
        assert!(fresh.inherits(&doc).is_empty());
    }

    #[test]
    fn chain_query_reports_cycles_with_the_full_walk() {
        let mut doc = Document::new();
        let a = doc.add_material(Some("a")).unwrap();
        let b = doc.add_material(Some("b")).unwrap();
        let c = doc.add_material(Some("c")).unwrap();
        a.add_inherit(&mut doc, "b").unwrap();
        b.add_inherit(&mut doc, "c").unwrap();
        c.add_inherit(&mut doc, "b").unwrap();

        let err = a.ancestor_chain(&doc).unwrap_err();
        assert_eq!(err.description(), "a -> b -> c -> b");
        assert_eq!(err.cycle_description(), "b -> c -> b");
        assert_eq!(err.cycle_members(), &[b, c]);
        assert_eq!(err.to_string(), "cyclic material inheritance: a -> b -> c -> b");
    }

    #[test]
    fn effective_refs_compose_own_then_nearest_ancestor_first() {
        let mut doc = Document::new();
        let grandparent = doc.add_material(Some("grandparent")).unwrap();
        let parent = doc.add_material(Some("parent")).unwrap();
        let child = doc.add_material(Some("child")).unwrap();
        parent.set_inherits_from(&mut doc, Some(grandparent)).unwrap();
        child.set_inherits_from(&mut doc, Some(parent)).unwrap();

        let g1 = grandparent
            .add_shader_ref(&mut doc, Some("g1"), None)
            .unwrap();
        let p1 = parent.add_shader_ref(&mut doc, Some("p1"), None).unwrap();
        let c1 = child.add_shader_ref(&mut doc, Some("c1"), None).unwrap();
        let c2 = child.add_shader_ref(&mut doc, Some("c2"), None).unwrap();

        assert_eq!(
            child.effective_shader_refs(&doc).unwrap(),
            vec![c1, c2, p1, g1]
        );
    }

    #[test]
    fn effective_refs_keep_same_named_refs_from_every_level() {
        let mut doc = Document::new();
        let base = doc.add_material(Some("base")).unwrap();
        let plastic = doc.add_material(Some("plastic")).unwrap();
        plastic.set_inherits_from(&mut doc, Some(base)).unwrap();

        let own = plastic
            .add_shader_ref(&mut doc, Some("surface1"), None)
            .unwrap();
        let inherited = base
            .add_shader_ref(&mut doc, Some("surface1"), None)
            .unwrap();

        let refs = plastic.effective_shader_refs(&doc).unwrap();
        assert_eq!(refs, vec![own, inherited], "composition is additive, not keyed by name");
    }
}
