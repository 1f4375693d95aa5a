//! Upstream traversal inside node graphs.

use crate::model::{InputId, NodeGraphId, NodeId, OutputId};
use crate::tree::Document;
use std::collections::HashSet;

impl OutputId {
    /// The upstream node this output draws from, resolved by `nodename`
    /// within the output's own graph. Free-standing outputs have no
    /// upstream scope and always resolve to `None`.
    pub fn connected_node(self, doc: &Document) -> Option<NodeId> {
        let name = self.node_name(doc)?;
        let graph = self.owning_graph(doc)?;
        graph.node(doc, name)
    }

    /// Whether walking upstream from this output revisits a node.
    ///
    /// The walk follows `nodename` references across node inputs, staying
    /// within the output's graph. Dangling references simply end a branch;
    /// only a revisit on the current path counts as a cycle, so diamonds
    /// are fine.
    pub fn has_upstream_cycle(self, doc: &Document) -> bool {
        let Some(graph) = self.owning_graph(doc) else {
            return false;
        };
        let Some(start) = self.connected_node(doc) else {
            return false;
        };
        let mut path = Vec::new();
        let mut done = HashSet::new();
        walk_upstream(doc, graph, start, &mut path, &mut done)
    }

    fn owning_graph(self, doc: &Document) -> Option<NodeGraphId> {
        let parent = doc.parent(self)?;
        NodeGraphId::from_element(doc, parent).ok()
    }
}

impl InputId {
    /// The upstream node this port draws from, resolved by `nodename`
    /// within the enclosing graph. Ports on node definitions have no
    /// upstream scope and always resolve to `None`.
    pub fn connected_node(self, doc: &Document) -> Option<NodeId> {
        let name = self.node_name(doc)?;
        let graph = self.enclosing_graph(doc)?;
        graph.node(doc, name)
    }

    fn enclosing_graph(self, doc: &Document) -> Option<NodeGraphId> {
        let node = doc.parent(self)?;
        let graph = doc.parent(node)?;
        NodeGraphId::from_element(doc, graph).ok()
    }
}

fn walk_upstream(
    doc: &Document,
    graph: NodeGraphId,
    node: NodeId,
    path: &mut Vec<NodeId>,
    done: &mut HashSet<NodeId>,
) -> bool {
    if path.contains(&node) {
        return true;
    }
    if done.contains(&node) {
        return false;
    }
    path.push(node);
    for input in node.inputs(doc) {
        if let Some(name) = input.node_name(doc)
            && let Some(next) = graph.node(doc, name)
            && walk_upstream(doc, graph, next, path, done)
        {
            return true;
        }
    }
    path.pop();
    done.insert(node);
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with_output(doc: &mut Document) -> (NodeGraphId, OutputId) {
        let graph = doc.add_node_graph(Some("graph")).unwrap();
        let out = graph.add_output(doc, Some("out"), "color3").unwrap();
        (graph, out)
    }

    #[test]
    fn straight_chain_has_no_cycle() {
        let mut doc = Document::new();
        let (graph, out) = graph_with_output(&mut doc);
        let a = graph.add_node(&mut doc, Some("a"), Some("mix")).unwrap();
        let b = graph.add_node(&mut doc, Some("b"), Some("image")).unwrap();
        let a_in = a.add_input(&mut doc, "fg").unwrap();
        a_in.set_connected_node(&mut doc, Some(b));
        out.set_connected_node(&mut doc, Some(a));

        assert_eq!(out.connected_node(&doc), Some(a));
        assert_eq!(a_in.connected_node(&doc), Some(b));
        assert!(!out.has_upstream_cycle(&doc));
    }

    #[test]
    fn diamond_sharing_is_not_a_cycle() {
        let mut doc = Document::new();
        let (graph, out) = graph_with_output(&mut doc);
        let top = graph.add_node(&mut doc, Some("top"), Some("mix")).unwrap();
        let left = graph.add_node(&mut doc, Some("left"), Some("mult")).unwrap();
        let right = graph
            .add_node(&mut doc, Some("right"), Some("mult"))
            .unwrap();
        let shared = graph
            .add_node(&mut doc, Some("shared"), Some("image"))
            .unwrap();

        top.add_input(&mut doc, "fg")
            .unwrap()
            .set_connected_node(&mut doc, Some(left));
        top.add_input(&mut doc, "bg")
            .unwrap()
            .set_connected_node(&mut doc, Some(right));
        left.add_input(&mut doc, "in")
            .unwrap()
            .set_connected_node(&mut doc, Some(shared));
        right
            .add_input(&mut doc, "in")
            .unwrap()
            .set_connected_node(&mut doc, Some(shared));
        out.set_connected_node(&mut doc, Some(top));

        assert!(!out.has_upstream_cycle(&doc));
    }

    #[test]
    fn self_feeding_node_is_a_cycle() {
        let mut doc = Document::new();
        let (graph, out) = graph_with_output(&mut doc);
        let node = graph.add_node(&mut doc, Some("loop"), Some("mix")).unwrap();
        node.add_input(&mut doc, "fg")
            .unwrap()
            .set_connected_node(&mut doc, Some(node));
        out.set_connected_node(&mut doc, Some(node));

        assert!(out.has_upstream_cycle(&doc));
    }

    #[test]
    fn two_node_loop_is_a_cycle() {
        let mut doc = Document::new();
        let (graph, out) = graph_with_output(&mut doc);
        let a = graph.add_node(&mut doc, Some("a"), Some("mix")).unwrap();
        let b = graph.add_node(&mut doc, Some("b"), Some("mix")).unwrap();
        a.add_input(&mut doc, "fg")
            .unwrap()
            .set_connected_node(&mut doc, Some(b));
        b.add_input(&mut doc, "fg")
            .unwrap()
            .set_connected_node(&mut doc, Some(a));
        out.set_connected_node(&mut doc, Some(a));

        assert!(out.has_upstream_cycle(&doc));
    }

    #[test]
    fn dangling_upstream_names_end_the_branch() {
        let mut doc = Document::new();
        let (graph, out) = graph_with_output(&mut doc);
        let a = graph.add_node(&mut doc, Some("a"), Some("mix")).unwrap();
        a.add_input(&mut doc, "fg")
            .unwrap()
            .set_node_name(&mut doc, "missing");
        out.set_connected_node(&mut doc, Some(a));

        assert!(!out.has_upstream_cycle(&doc));
    }

    #[test]
    fn free_standing_outputs_have_no_upstream() {
        let mut doc = Document::new();
        let out = doc.add_output(Some("result"), "color3").unwrap();
        out.set_node_name(&mut doc, "anything");

        assert_eq!(out.connected_node(&doc), None);
        assert!(!out.has_upstream_cycle(&doc));
    }
}
