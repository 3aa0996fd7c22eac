// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node graph model for Wirelay.
//!
//! This crate provides the graph description consumed by the layout
//! solver:
//! - Nodes with a 2D position, a box size, and ordered socket slots
//! - Directed, socket-indexed links
//! - Construction-time link validation
//! - Serialization support
//!
//! ## Architecture
//!
//! A [`Graph`] owns its nodes and links in insertion-ordered maps.
//! Links store socket *indices* rather than socket identities, so a
//! malformed connection is rejected when it is created instead of
//! surfacing as a silent mismatch later.

pub mod graph;
pub mod link;
pub mod node;
pub mod socket;

pub use graph::{ConnectError, Graph};
pub use link::{Link, LinkId};
pub use node::{Node, NodeId};
pub use socket::{Socket, SocketDirection};
