// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure containing nodes and links.

use crate::link::{Link, LinkId};
use crate::node::{Node, NodeId};
use crate::socket::SocketDirection;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A node graph.
///
/// Nodes and links iterate in insertion order, which keeps layout
/// results deterministic for a given construction sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    /// Graph name
    pub name: String,
    /// Nodes in the graph
    nodes: IndexMap<NodeId, Node>,
    /// Links between sockets
    links: IndexMap<LinkId, Link>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: IndexMap::new(),
            links: IndexMap::new(),
        }
    }

    /// Add a node to the graph
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    /// Remove a node and its links
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        self.links.retain(|_, l| !l.involves_node(node_id));
        self.nodes.swap_remove(&node_id)
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Get a mutable node by ID
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    /// Get all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get all node IDs
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Connect an output socket to an input socket.
    ///
    /// Socket endpoints are given as indices (source output index,
    /// target input index) and are validated here; a link that passes
    /// validation stays well formed for as long as its endpoint nodes
    /// keep their socket sequences intact.
    pub fn connect(
        &mut self,
        from_node: NodeId,
        from_socket: usize,
        to_node: NodeId,
        to_socket: usize,
    ) -> Result<LinkId, ConnectError> {
        let source = self
            .nodes
            .get(&from_node)
            .ok_or(ConnectError::NodeNotFound(from_node))?;
        let target = self
            .nodes
            .get(&to_node)
            .ok_or(ConnectError::NodeNotFound(to_node))?;

        if source.output(from_socket).is_none() {
            return Err(ConnectError::SocketOutOfRange {
                node: from_node,
                direction: SocketDirection::Output,
                index: from_socket,
            });
        }
        if target.input(to_socket).is_none() {
            return Err(ConnectError::SocketOutOfRange {
                node: to_node,
                direction: SocketDirection::Input,
                index: to_socket,
            });
        }

        if from_node == to_node {
            return Err(ConnectError::SelfLoop);
        }

        let link = Link::new(from_node, from_socket, to_node, to_socket);
        let id = link.id;
        self.links.insert(id, link);
        Ok(id)
    }

    /// Remove a link
    pub fn disconnect(&mut self, link_id: LinkId) -> Option<Link> {
        self.links.swap_remove(&link_id)
    }

    /// Get a link by ID
    pub fn link(&self, link_id: LinkId) -> Option<&Link> {
        self.links.get(&link_id)
    }

    /// Get all links
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.values()
    }

    /// Get links involving a node
    pub fn links_for_node(&self, node_id: NodeId) -> impl Iterator<Item = &Link> {
        self.links.values().filter(move |l| l.involves_node(node_id))
    }

    /// Get the number of links
    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

/// Error when creating a link
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    /// Node not found
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Socket index outside the node's socket sequence
    #[error("No {direction:?} socket {index} on node {node:?}")]
    SocketOutOfRange {
        /// Owning node
        node: NodeId,
        /// Which sequence was indexed
        direction: SocketDirection,
        /// Offending index
        index: usize,
    },

    /// Self-loop not allowed
    #[error("Self-loop not allowed")]
    SelfLoop,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_nodes() -> (Graph, NodeId, NodeId) {
        let mut graph = Graph::new("test");
        let a = graph.add_node(Node::new("A").with_output("Image"));
        let b = graph.add_node(Node::new("B").with_input("Image"));
        (graph, a, b)
    }

    #[test]
    fn test_connect_valid() {
        let (mut graph, a, b) = two_nodes();
        let id = graph.connect(a, 0, b, 0).unwrap();
        let link = graph.link(id).unwrap();
        assert_eq!(link.from_node, a);
        assert_eq!(link.to_node, b);
        assert_eq!(graph.link_count(), 1);
    }

    #[test]
    fn test_connect_unknown_node() {
        let (mut graph, a, _) = two_nodes();
        let ghost = NodeId::new();
        let err = graph.connect(a, 0, ghost, 0).unwrap_err();
        assert!(matches!(err, ConnectError::NodeNotFound(id) if id == ghost));
    }

    #[test]
    fn test_connect_socket_out_of_range() {
        let (mut graph, a, b) = two_nodes();
        let err = graph.connect(a, 3, b, 0).unwrap_err();
        assert!(matches!(
            err,
            ConnectError::SocketOutOfRange {
                direction: SocketDirection::Output,
                index: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_connect_self_loop() {
        let mut graph = Graph::new("test");
        let a = graph.add_node(Node::new("A").with_input("In").with_output("Out"));
        let err = graph.connect(a, 0, a, 0).unwrap_err();
        assert!(matches!(err, ConnectError::SelfLoop));
    }

    #[test]
    fn test_remove_node_drops_links() {
        let (mut graph, a, b) = two_nodes();
        graph.connect(a, 0, b, 0).unwrap();
        graph.remove_node(b);
        assert_eq!(graph.link_count(), 0);
        assert_eq!(graph.node_count(), 1);
        assert!(graph.node(a).is_some());
    }

    #[test]
    fn test_ron_round_trip() {
        let (mut graph, a, b) = two_nodes();
        graph.connect(a, 0, b, 0).unwrap();

        let text = ron::to_string(&graph).unwrap();
        let restored: Graph = ron::from_str(&text).unwrap();

        assert_eq!(restored.node_count(), 2);
        assert_eq!(restored.link_count(), 1);
        assert_eq!(restored.node(a).unwrap().name, "A");
        assert_eq!(restored.node(b).unwrap().inputs[0].name, "Image");
    }
}
