//! Resolution of shader definition references and output connections.

use crate::model::{BindInputId, MaterialId, NodeDefId, OutputId, ShaderRefId};
use crate::resolve::CycleError;
use crate::tree::Document;

impl ShaderRefId {
    /// The node definitions this shader ref can bind to.
    ///
    /// An explicit `nodedef` reference short-circuits family matching: the
    /// result is exactly that definition, or empty when the name does not
    /// resolve. Otherwise every definition implementing the declared node
    /// family matches, in document order. A shader ref declaring neither
    /// matches nothing.
    pub fn referenced_defs(self, doc: &Document) -> Vec<NodeDefId> {
        if let Some(node_def) = self.node_def_str(doc) {
            return doc.node_def(node_def).into_iter().collect();
        }
        if let Some(node) = self.node(doc) {
            return doc
                .node_defs()
                .into_iter()
                .filter(|def| def.node(doc) == Some(node))
                .collect();
        }
        Vec::new()
    }

    /// The outputs this shader ref's bindings connect to, in first
    /// occurrence order without duplicates.
    pub fn referenced_outputs(self, doc: &Document) -> Vec<OutputId> {
        let mut outputs = Vec::new();
        for bind in self.bind_inputs(doc) {
            if let Some(output) = bind.connected_output(doc)
                && !outputs.contains(&output)
            {
                outputs.push(output);
            }
        }
        outputs
    }
}

impl MaterialId {
    /// The node definitions referenced across this material's effective
    /// shader refs, in first occurrence order without duplicates.
    pub fn referenced_shader_defs(self, doc: &Document) -> Result<Vec<NodeDefId>, CycleError> {
        let mut defs = Vec::new();
        for sref in self.effective_shader_refs(doc)? {
            for def in sref.referenced_defs(doc) {
                if !defs.contains(&def) {
                    defs.push(def);
                }
            }
        }
        Ok(defs)
    }
}

impl BindInputId {
    /// Resolves the output this binding connects to.
    ///
    /// With a `nodegraph` attribute the output is looked up inside that
    /// graph; without one, among the document's free-standing outputs.
    /// `None` when the binding holds no `output` attribute or when either
    /// name fails to resolve.
    pub fn connected_output(self, doc: &Document) -> Option<OutputId> {
        let output = self.output_str(doc)?;
        match self.node_graph_str(doc) {
            Some(graph) => doc.node_graph(graph)?.output(doc, output),
            None => doc.output(output),
        }
    }
}
