//! Node definitions, node graphs, and their typed ports.

use crate::model::{
    CHANNELS_ATTR, InputId, NODE_ATTR, NODE_NAME_ATTR, NodeDefId, NodeGraphId, NodeId, OutputId,
    ParameterId,
};
use crate::tree::{Document, ElementKind, TreeError};

impl Document {
    /// Adds a node definition, or returns the existing one with that name.
    /// The `node` family is applied only on creation.
    pub fn add_node_def(
        &mut self,
        name: Option<&str>,
        node: Option<&str>,
    ) -> Result<NodeDefId, TreeError> {
        let existed = name
            .filter(|n| !n.is_empty())
            .and_then(|n| self.find_top_level(ElementKind::NodeDef, n))
            .is_some();
        let id = self.add_child(self.root(), ElementKind::NodeDef, name)?;
        if !existed && let Some(node) = node.filter(|n| !n.is_empty()) {
            self.set_attribute(id, NODE_ATTR, node);
        }
        Ok(NodeDefId::wrap(id))
    }

    /// Finds a node definition by name.
    pub fn node_def(&self, name: &str) -> Option<NodeDefId> {
        self.find_top_level(ElementKind::NodeDef, name)
            .map(NodeDefId::wrap)
    }

    /// All node definitions in document order.
    pub fn node_defs(&self) -> Vec<NodeDefId> {
        self.top_level_of_kind(ElementKind::NodeDef)
            .map(NodeDefId::wrap)
            .collect()
    }

    /// Removes a node definition by name. Does nothing when absent.
    pub fn remove_node_def(&mut self, name: &str) {
        self.remove_child_of_kind(self.root(), ElementKind::NodeDef, name);
    }

    /// Adds a node graph, or returns the existing one with that name.
    pub fn add_node_graph(&mut self, name: Option<&str>) -> Result<NodeGraphId, TreeError> {
        let id = self.add_child(self.root(), ElementKind::NodeGraph, name)?;
        Ok(NodeGraphId::wrap(id))
    }

    /// Finds a node graph by name.
    pub fn node_graph(&self, name: &str) -> Option<NodeGraphId> {
        self.find_top_level(ElementKind::NodeGraph, name)
            .map(NodeGraphId::wrap)
    }

    /// All node graphs in document order.
    pub fn node_graphs(&self) -> Vec<NodeGraphId> {
        self.top_level_of_kind(ElementKind::NodeGraph)
            .map(NodeGraphId::wrap)
            .collect()
    }

    /// Removes a node graph and everything in it. Does nothing when absent.
    pub fn remove_node_graph(&mut self, name: &str) {
        self.remove_child_of_kind(self.root(), ElementKind::NodeGraph, name);
    }

    /// Adds a free-standing output at the document level, or returns the
    /// existing one with that name. The declared type is applied only on
    /// creation.
    pub fn add_output(
        &mut self,
        name: Option<&str>,
        value_type: &str,
    ) -> Result<OutputId, TreeError> {
        let existed = name
            .filter(|n| !n.is_empty())
            .and_then(|n| self.find_top_level(ElementKind::Output, n))
            .is_some();
        let id = self.add_child(self.root(), ElementKind::Output, name)?;
        if !existed && !value_type.is_empty() {
            self.set_value_type(id, value_type);
        }
        Ok(OutputId::wrap(id))
    }

    /// Finds a free-standing document-level output by name.
    pub fn output(&self, name: &str) -> Option<OutputId> {
        self.find_top_level(ElementKind::Output, name)
            .map(OutputId::wrap)
    }

    /// All free-standing document-level outputs in document order.
    pub fn outputs(&self) -> Vec<OutputId> {
        self.top_level_of_kind(ElementKind::Output)
            .map(OutputId::wrap)
            .collect()
    }

    /// Removes a free-standing output by name. Does nothing when absent.
    pub fn remove_output(&mut self, name: &str) {
        self.remove_child_of_kind(self.root(), ElementKind::Output, name);
    }
}

/// Port management shared by node definitions and node instances.
macro_rules! interface_element_ops {
    ($id:ident) => {
        impl $id {
            /// Adds a uniform port, or returns the existing one with that
            /// name.
            pub fn add_parameter(
                self,
                doc: &mut Document,
                name: &str,
            ) -> Result<ParameterId, TreeError> {
                let id = doc.add_child(self, ElementKind::Parameter, Some(name))?;
                Ok(ParameterId::wrap(id))
            }

            /// Finds a uniform port by name.
            pub fn parameter(self, doc: &Document, name: &str) -> Option<ParameterId> {
                doc.child_of_kind(self, ElementKind::Parameter, name)
                    .map(ParameterId::wrap)
            }

            /// The element's uniform ports in declaration order.
            pub fn parameters(self, doc: &Document) -> Vec<ParameterId> {
                doc.children_of_kind(self, ElementKind::Parameter)
                    .map(ParameterId::wrap)
                    .collect()
            }

            /// Removes a uniform port by name. Does nothing when absent.
            pub fn remove_parameter(self, doc: &mut Document, name: &str) {
                doc.remove_child_of_kind(self, ElementKind::Parameter, name);
            }

            /// Sets the value of the named uniform port, creating the port
            /// when it does not exist yet.
            pub fn set_parameter_value(
                self,
                doc: &mut Document,
                name: &str,
                value: &str,
                value_type: &str,
            ) -> Result<ParameterId, TreeError> {
                let param = self.add_parameter(doc, name)?;
                doc.set_value(param, value, value_type);
                Ok(param)
            }

            /// The stored value of the named uniform port, if any.
            pub fn parameter_value<'a>(self, doc: &'a Document, name: &str) -> Option<&'a str> {
                self.parameter(doc, name).and_then(|param| doc.value_str(param))
            }

            /// Adds a varying port, or returns the existing one with that
            /// name.
            pub fn add_input(self, doc: &mut Document, name: &str) -> Result<InputId, TreeError> {
                let id = doc.add_child(self, ElementKind::Input, Some(name))?;
                Ok(InputId::wrap(id))
            }

            /// Finds a varying port by name.
            pub fn input(self, doc: &Document, name: &str) -> Option<InputId> {
                doc.child_of_kind(self, ElementKind::Input, name)
                    .map(InputId::wrap)
            }

            /// The element's varying ports in declaration order.
            pub fn inputs(self, doc: &Document) -> Vec<InputId> {
                doc.children_of_kind(self, ElementKind::Input)
                    .map(InputId::wrap)
                    .collect()
            }

            /// Removes a varying port by name. Does nothing when absent.
            pub fn remove_input(self, doc: &mut Document, name: &str) {
                doc.remove_child_of_kind(self, ElementKind::Input, name);
            }

            /// Sets the value of the named varying port, creating the port
            /// when it does not exist yet.
            pub fn set_input_value(
                self,
                doc: &mut Document,
                name: &str,
                value: &str,
                value_type: &str,
            ) -> Result<InputId, TreeError> {
                let input = self.add_input(doc, name)?;
                doc.set_value(input, value, value_type);
                Ok(input)
            }

            /// The stored value of the named varying port, if any.
            pub fn input_value<'a>(self, doc: &'a Document, name: &str) -> Option<&'a str> {
                self.input(doc, name).and_then(|input| doc.value_str(input))
            }
        }
    };
}

interface_element_ops!(NodeDefId);
interface_element_ops!(NodeId);

impl NodeDefId {
    /// The node family this definition implements, if declared.
    pub fn node(self, doc: &Document) -> Option<&str> {
        doc.attribute(self, NODE_ATTR)
    }

    /// Declares the node family this definition implements.
    pub fn set_node(self, doc: &mut Document, node: &str) {
        doc.set_attribute(self, NODE_ATTR, node);
    }
}

impl NodeId {
    /// The node family this instance belongs to, if declared.
    pub fn node(self, doc: &Document) -> Option<&str> {
        doc.attribute(self, NODE_ATTR)
    }
}

impl NodeGraphId {
    /// Adds a node instance to this graph, or returns the existing one
    /// with that name. The `node` family is applied only on creation.
    pub fn add_node(
        self,
        doc: &mut Document,
        name: Option<&str>,
        node: Option<&str>,
    ) -> Result<NodeId, TreeError> {
        let existed = name
            .filter(|n| !n.is_empty())
            .and_then(|n| doc.child_of_kind(self, ElementKind::Node, n))
            .is_some();
        let id = doc.add_child(self, ElementKind::Node, name)?;
        if !existed && let Some(node) = node.filter(|n| !n.is_empty()) {
            doc.set_attribute(id, NODE_ATTR, node);
        }
        Ok(NodeId::wrap(id))
    }

    /// Finds a node instance by name.
    pub fn node(self, doc: &Document, name: &str) -> Option<NodeId> {
        doc.child_of_kind(self, ElementKind::Node, name)
            .map(NodeId::wrap)
    }

    /// The graph's node instances in declaration order.
    pub fn nodes(self, doc: &Document) -> Vec<NodeId> {
        doc.children_of_kind(self, ElementKind::Node)
            .map(NodeId::wrap)
            .collect()
    }

    /// Removes a node instance by name. Does nothing when absent.
    pub fn remove_node(self, doc: &mut Document, name: &str) {
        doc.remove_child_of_kind(self, ElementKind::Node, name);
    }

    /// Adds an output to this graph, or returns the existing one with that
    /// name. The declared type is applied only on creation.
    pub fn add_output(
        self,
        doc: &mut Document,
        name: Option<&str>,
        value_type: &str,
    ) -> Result<OutputId, TreeError> {
        let existed = name
            .filter(|n| !n.is_empty())
            .and_then(|n| doc.child_of_kind(self, ElementKind::Output, n))
            .is_some();
        let id = doc.add_child(self, ElementKind::Output, name)?;
        if !existed && !value_type.is_empty() {
            doc.set_value_type(id, value_type);
        }
        Ok(OutputId::wrap(id))
    }

    /// Finds a graph output by name.
    pub fn output(self, doc: &Document, name: &str) -> Option<OutputId> {
        doc.child_of_kind(self, ElementKind::Output, name)
            .map(OutputId::wrap)
    }

    /// The graph's outputs in declaration order.
    pub fn outputs(self, doc: &Document) -> Vec<OutputId> {
        doc.children_of_kind(self, ElementKind::Output)
            .map(OutputId::wrap)
            .collect()
    }

    /// Removes a graph output by name. Does nothing when absent.
    pub fn remove_output(self, doc: &mut Document, name: &str) {
        doc.remove_child_of_kind(self, ElementKind::Output, name);
    }
}

/// Upstream wiring shared by outputs and varying ports.
macro_rules! upstream_port_ops {
    ($id:ident) => {
        impl $id {
            /// The name of the upstream node this port draws from, if any.
            pub fn node_name(self, doc: &Document) -> Option<&str> {
                doc.attribute(self, NODE_NAME_ATTR)
            }

            /// Names the upstream node this port draws from.
            pub fn set_node_name(self, doc: &mut Document, node_name: &str) {
                doc.set_attribute(self, NODE_NAME_ATTR, node_name);
            }

            /// Points this port at a concrete upstream node. `None`
            /// disconnects it. Only the node's name is stored.
            pub fn set_connected_node(self, doc: &mut Document, node: Option<NodeId>) {
                match node {
                    Some(node) => {
                        if let Some(name) = doc.name(node).map(str::to_string) {
                            doc.set_attribute(self, NODE_NAME_ATTR, &name);
                        }
                    }
                    None => doc.remove_attribute(self, NODE_NAME_ATTR),
                }
            }

            /// The channel swizzle applied across the connection, if any.
            pub fn channels(self, doc: &Document) -> Option<&str> {
                doc.attribute(self, CHANNELS_ATTR)
            }

            /// Sets the channel swizzle applied across the connection.
            pub fn set_channels(self, doc: &mut Document, channels: &str) {
                doc.set_attribute(self, CHANNELS_ATTR, channels);
            }
        }
    };
}

upstream_port_ops!(OutputId);
upstream_port_ops!(InputId);
