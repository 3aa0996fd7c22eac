// SPDX-License-Identifier: MIT OR Apache-2.0
//! Layout parameters and the node-height policy.

use wirelay_graph::Node;

/// Declared height most host editors assign to a freshly created node.
pub const HOST_DEFAULT_HEIGHT: f64 = 100.0;

/// Height assumed for a node the host has neither drawn nor customized.
pub const FALLBACK_HEIGHT: f64 = 200.0;

const HEIGHT_EPSILON: f64 = 1e-5;

/// Policy for the effective height of a node during overlap resolution.
pub type HeightFn = fn(&Node) -> f64;

/// Default height policy.
///
/// Prefers the height the host actually drew; failing that, the declared
/// height when it has been customized away from [`HOST_DEFAULT_HEIGHT`];
/// failing that, [`FALLBACK_HEIGHT`]. Callers whose host reports sizes
/// differently can supply their own [`HeightFn`] instead.
pub fn default_height(node: &Node) -> f64 {
    if node.rendered_height > HEIGHT_EPSILON {
        node.rendered_height
    } else if (node.height - HOST_DEFAULT_HEIGHT).abs() > HEIGHT_EPSILON {
        node.height
    } else {
        FALLBACK_HEIGHT
    }
}

/// Parameters for a layout run.
#[derive(Debug, Clone, Copy)]
pub struct LayoutOptions {
    /// Hard bound on relaxation steps across both stages
    pub max_iterations: usize,
    /// Convergence threshold on the iteration-to-iteration energy delta
    pub epsilon: f64,
    /// Desired horizontal gap between a node's right edge and a linked
    /// node's left edge
    pub target_spacing: f64,
    /// Vertical pitch between stacked sockets on the same node
    pub socket_offset: f64,
    /// Enable the horizontal spacing constraint
    pub horizontal: bool,
    /// Enable the vertical socket-alignment constraint
    pub vertical: bool,
    /// Enable overlap resolution during the refinement stage
    pub resolve_overlaps: bool,
    /// Emit per-iteration diagnostics through `tracing`
    pub verbose: bool,
    /// Effective node height used for overlap resolution
    pub height: HeightFn,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            max_iterations: 2000,
            epsilon: 1e-5,
            target_spacing: 50.0,
            socket_offset: 20.0,
            horizontal: true,
            vertical: true,
            resolve_overlaps: true,
            verbose: false,
            height: default_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_default() {
        let options = LayoutOptions::default();
        assert_eq!(options.max_iterations, 2000);
        assert_eq!(options.target_spacing, 50.0);
        assert_eq!(options.socket_offset, 20.0);
        assert!(options.horizontal);
        assert!(options.vertical);
        assert!(options.resolve_overlaps);
        assert!(!options.verbose);
    }

    #[test]
    fn test_default_height_prefers_rendered() {
        let mut node = Node::new("n").with_size(140.0, 100.0);
        node.rendered_height = 240.0;
        assert_eq!(default_height(&node), 240.0);
    }

    #[test]
    fn test_default_height_uses_customized_declared_height() {
        let node = Node::new("n").with_size(140.0, 160.0);
        assert_eq!(default_height(&node), 160.0);
    }

    #[test]
    fn test_default_height_falls_back_for_untouched_node() {
        let node = Node::new("n").with_size(140.0, HOST_DEFAULT_HEIGHT);
        assert_eq!(default_height(&node), FALLBACK_HEIGHT);
    }
}
