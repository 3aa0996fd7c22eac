// SPDX-License-Identifier: MIT OR Apache-2.0
//! Socket definitions for node inputs/outputs.

use serde::{Deserialize, Serialize};

/// Socket direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocketDirection {
    /// Input socket
    Input,
    /// Output socket
    Output,
}

/// A connection slot on a node.
///
/// Sockets are identified by their index within the owning node's input
/// or output sequence; the index also determines the socket's vertical
/// offset from the node's top edge during layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Socket {
    /// Socket name
    pub name: String,
}

impl Socket {
    /// Create a new socket
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
