// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the graph model.

use crate::socket::Socket;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// A node instance in the graph.
///
/// The position is the node's top-left corner; y grows upward, matching
/// the node-editor convention where sockets stack downward from the top
/// edge. The layout solver mutates `position` in place and leaves every
/// other field untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Display name
    pub name: String,
    /// Top-left corner, `[x, y]`
    pub position: [f64; 2],
    /// Box width
    pub width: f64,
    /// Declared box height. Hosts typically leave this at their default
    /// (100.0) until the node is customized.
    pub height: f64,
    /// Height of the node as last drawn by the host, or 0.0 if the host
    /// has not measured it yet.
    pub rendered_height: f64,
    /// Input sockets, top to bottom
    pub inputs: Vec<Socket>,
    /// Output sockets, top to bottom
    pub outputs: Vec<Socket>,
}

impl Node {
    /// Create a new node with no sockets at the origin
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(),
            name: name.into(),
            position: [0.0, 0.0],
            width: 140.0,
            height: 100.0,
            rendered_height: 0.0,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Set the position
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = [x, y];
        self
    }

    /// Set the box size
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Append an input socket
    pub fn with_input(mut self, name: impl Into<String>) -> Self {
        self.inputs.push(Socket::new(name));
        self
    }

    /// Append an output socket
    pub fn with_output(mut self, name: impl Into<String>) -> Self {
        self.outputs.push(Socket::new(name));
        self
    }

    /// Get an input socket by index
    pub fn input(&self, index: usize) -> Option<&Socket> {
        self.inputs.get(index)
    }

    /// Get an output socket by index
    pub fn output(&self, index: usize) -> Option<&Socket> {
        self.outputs.get(index)
    }

    /// Get all sockets, inputs first
    pub fn sockets(&self) -> impl Iterator<Item = &Socket> {
        self.inputs.iter().chain(self.outputs.iter())
    }
}
