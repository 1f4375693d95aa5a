//! Shader references and the bindings they carry.

use crate::model::{
    BindInputId, BindParamId, CHANNELS_ATTR, NODE_ATTR, NODE_DEF_ATTR, NODE_GRAPH_ATTR,
    OUTPUT_ATTR, OutputId, ShaderRefId,
};
use crate::tree::{Document, ElementKind, TreeError};

impl ShaderRefId {
    /// The node family this shader ref instantiates, if declared.
    pub fn node(self, doc: &Document) -> Option<&str> {
        doc.attribute(self, NODE_ATTR)
    }

    /// Declares the node family this shader ref instantiates.
    pub fn set_node(self, doc: &mut Document, node: &str) {
        doc.set_attribute(self, NODE_ATTR, node);
    }

    /// The name of the exact node definition this shader ref binds to, if
    /// declared. Resolution of the name happens on demand via
    /// [`referenced_defs`](Self::referenced_defs).
    pub fn node_def_str(self, doc: &Document) -> Option<&str> {
        doc.attribute(self, NODE_DEF_ATTR)
    }

    /// Names the exact node definition this shader ref binds to.
    pub fn set_node_def_str(self, doc: &mut Document, node_def: &str) {
        doc.set_attribute(self, NODE_DEF_ATTR, node_def);
    }

    /// Adds a uniform value binding, or returns the existing one with that
    /// name.
    pub fn add_bind_param(self, doc: &mut Document, name: &str) -> Result<BindParamId, TreeError> {
        let id = doc.add_child(self, ElementKind::BindParam, Some(name))?;
        Ok(BindParamId::wrap(id))
    }

    /// Finds a uniform value binding by name.
    pub fn bind_param(self, doc: &Document, name: &str) -> Option<BindParamId> {
        doc.child_of_kind(self, ElementKind::BindParam, name)
            .map(BindParamId::wrap)
    }

    /// The shader ref's uniform bindings in declaration order.
    pub fn bind_params(self, doc: &Document) -> Vec<BindParamId> {
        doc.children_of_kind(self, ElementKind::BindParam)
            .map(BindParamId::wrap)
            .collect()
    }

    /// Removes a uniform value binding by name. Does nothing when absent.
    pub fn remove_bind_param(self, doc: &mut Document, name: &str) {
        doc.remove_child_of_kind(self, ElementKind::BindParam, name);
    }

    /// Adds a varying binding, or returns the existing one with that name.
    pub fn add_bind_input(self, doc: &mut Document, name: &str) -> Result<BindInputId, TreeError> {
        let id = doc.add_child(self, ElementKind::BindInput, Some(name))?;
        Ok(BindInputId::wrap(id))
    }

    /// Finds a varying binding by name.
    pub fn bind_input(self, doc: &Document, name: &str) -> Option<BindInputId> {
        doc.child_of_kind(self, ElementKind::BindInput, name)
            .map(BindInputId::wrap)
    }

    /// The shader ref's varying bindings in declaration order.
    pub fn bind_inputs(self, doc: &Document) -> Vec<BindInputId> {
        doc.children_of_kind(self, ElementKind::BindInput)
            .map(BindInputId::wrap)
            .collect()
    }

    /// Removes a varying binding by name. Does nothing when absent.
    pub fn remove_bind_input(self, doc: &mut Document, name: &str) {
        doc.remove_child_of_kind(self, ElementKind::BindInput, name);
    }
}

impl BindInputId {
    /// The name of the output this binding connects to, if any.
    pub fn output_str(self, doc: &Document) -> Option<&str> {
        doc.attribute(self, OUTPUT_ATTR)
    }

    /// Names the output this binding connects to.
    pub fn set_output_str(self, doc: &mut Document, output: &str) {
        doc.set_attribute(self, OUTPUT_ATTR, output);
    }

    /// The name of the node graph hosting the connected output, if the
    /// connection points into a graph.
    pub fn node_graph_str(self, doc: &Document) -> Option<&str> {
        doc.attribute(self, NODE_GRAPH_ATTR)
    }

    /// Names the node graph hosting the connected output.
    pub fn set_node_graph_str(self, doc: &mut Document, node_graph: &str) {
        doc.set_attribute(self, NODE_GRAPH_ATTR, node_graph);
    }

    /// The channel swizzle applied across the connection, if any.
    pub fn channels(self, doc: &Document) -> Option<&str> {
        doc.attribute(self, CHANNELS_ATTR)
    }

    /// Sets the channel swizzle applied across the connection.
    pub fn set_channels(self, doc: &mut Document, channels: &str) {
        doc.set_attribute(self, CHANNELS_ATTR, channels);
    }

    /// Points this binding at a concrete output, recording the hosting
    /// node graph when the output lives inside one. `None` disconnects
    /// the binding.
    ///
    /// Only names are stored; if the output is later renamed or removed
    /// the connection dangles and validation reports it.
    pub fn set_connected_output(self, doc: &mut Document, output: Option<OutputId>) {
        let Some(output) = output else {
            doc.remove_attribute(self, OUTPUT_ATTR);
            doc.remove_attribute(self, NODE_GRAPH_ATTR);
            return;
        };
        let Some(name) = doc.name(output).map(str::to_string) else {
            return;
        };
        let graph = doc
            .parent(output)
            .filter(|&parent| doc.kind(parent) == Some(ElementKind::NodeGraph))
            .and_then(|parent| doc.name(parent))
            .map(str::to_string);
        doc.set_attribute(self, OUTPUT_ATTR, &name);
        match graph {
            Some(graph) => doc.set_attribute(self, NODE_GRAPH_ATTR, &graph),
            None => doc.remove_attribute(self, NODE_GRAPH_ATTR),
        }
    }
}
