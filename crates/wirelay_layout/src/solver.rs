// SPDX-License-Identifier: MIT OR Apache-2.0
//! The two-stage relaxation solver.

use crate::options::LayoutOptions;
use std::collections::HashMap;
use wirelay_graph::{Graph, NodeId, SocketDirection};

/// Damping applied to overlap-resolution corrections.
const OVERLAP_K: f64 = 0.9;

/// Links whose slack exceeds `target_spacing` times this factor are left
/// alone rather than pulled back together.
const FAR_APART_FACTOR: f64 = 2.0;

/// Diagnostics from a layout run.
///
/// Hitting the iteration bound is not an error; the graph keeps the
/// best-effort positions from the last completed iteration. Callers that
/// need a convergence guarantee can inspect `converged` and retry with
/// relaxed parameters or different initial positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOutcome {
    /// Whether the energy delta fell below epsilon in the refinement stage
    pub converged: bool,
    /// Relaxation steps executed across both stages
    pub iterations: usize,
}

/// Error for a malformed graph description
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// Link references a node absent from the graph
    #[error("Link references missing node: {0:?}")]
    NodeNotFound(NodeId),

    /// Link references a socket index outside the node's socket sequence
    #[error("Link references {direction:?} socket {index} on node {node:?}, which has {count}")]
    SocketOutOfRange {
        /// Owning node
        node: NodeId,
        /// Which sequence was indexed
        direction: SocketDirection,
        /// Offending index
        index: usize,
        /// Length of the sequence
        count: usize,
    },
}

/// A link resolved to dense node indices, checked against the graph.
struct ResolvedLink {
    from: usize,
    from_socket: usize,
    to: usize,
    to_socket: usize,
}

/// Per-stage constraint parameters.
struct StagePlan {
    target_spacing: f64,
    horizontal_k: f64,
    vertical_k: f64,
    overlaps: bool,
}

impl StagePlan {
    /// Loose first stage: double spacing, strong horizontal damping, no
    /// overlap pass, so the graph spreads out before boxes start pushing
    /// on each other.
    fn expansion(base_spacing: f64) -> Self {
        Self {
            target_spacing: base_spacing * 2.0,
            horizontal_k: 0.9,
            vertical_k: 0.5,
            overlaps: false,
        }
    }

    /// Tight second stage: base spacing, gentler spacing corrections,
    /// overlap resolution active.
    fn refinement(base_spacing: f64) -> Self {
        Self {
            target_spacing: base_spacing,
            horizontal_k: 0.5,
            vertical_k: 0.05,
            overlaps: true,
        }
    }
}

/// Mutable solver state: one entry per node, in graph insertion order.
struct Bodies {
    x: Vec<f64>,
    y: Vec<f64>,
    width: Vec<f64>,
    height: Vec<f64>,
}

/// Compute positions for every node in `graph`.
///
/// Positions are updated in place; no other node field changes. The
/// routine always terminates: either the energy delta drops below
/// `options.epsilon` in the refinement stage, or `options.max_iterations`
/// steps have run. Within one iteration every correction observes the
/// positions written by the corrections before it (Gauss–Seidel
/// ordering), which is what makes the relaxation settle in practice.
pub fn layout(graph: &mut Graph, options: &LayoutOptions) -> Result<LayoutOutcome, LayoutError> {
    let links = resolve_links(graph)?;

    // Nothing to relax: no constraints and at most one box.
    if links.is_empty() && graph.node_count() <= 1 {
        return Ok(LayoutOutcome {
            converged: true,
            iterations: 0,
        });
    }

    if options.verbose {
        tracing::debug!("Arranging {} nodes:", graph.node_count());
        for node in graph.nodes() {
            tracing::debug!("- {}", node.name);
        }
    }

    let mut bodies = Bodies {
        x: graph.nodes().map(|n| n.position[0]).collect(),
        y: graph.nodes().map(|n| n.position[1]).collect(),
        width: graph.nodes().map(|n| n.width).collect(),
        height: graph.nodes().map(|n| (options.height)(n)).collect(),
    };

    let mut stage = StagePlan::expansion(options.target_spacing);
    let mut refining = false;
    let mut previous_energy = f64::MAX;
    let mut iterations = 0;
    let mut converged = false;

    while iterations < options.max_iterations {
        iterations += 1;
        let mut energy = 0.0;

        if options.horizontal {
            energy += relax_horizontal(&links, &mut bodies, &stage);
        }
        if options.vertical {
            energy += relax_vertical(&links, &mut bodies, &stage, options.socket_offset);
        }
        if options.resolve_overlaps && stage.overlaps {
            energy += relax_overlaps(&mut bodies, &stage);
        }

        if options.verbose {
            tracing::debug!("Iteration #{}: {}", iterations, previous_energy - energy);
        }

        if (previous_energy - energy).abs() < options.epsilon {
            if refining {
                converged = true;
                break;
            }
            stage = StagePlan::refinement(options.target_spacing);
            refining = true;
        }

        previous_energy = energy;
    }

    for (i, id) in graph.node_ids().collect::<Vec<_>>().into_iter().enumerate() {
        if let Some(node) = graph.node_mut(id) {
            node.position = [bodies.x[i], bodies.y[i]];
        }
    }

    Ok(LayoutOutcome {
        converged,
        iterations,
    })
}

/// Check every link against the graph and resolve its endpoints to dense
/// node indices. Fails before any position is touched, so a malformed
/// description never produces a half-arranged graph.
fn resolve_links(graph: &Graph) -> Result<Vec<ResolvedLink>, LayoutError> {
    let index_of: HashMap<NodeId, usize> =
        graph.node_ids().enumerate().map(|(i, id)| (id, i)).collect();

    let mut resolved = Vec::with_capacity(graph.link_count());
    for link in graph.links() {
        let from = *index_of
            .get(&link.from_node)
            .ok_or(LayoutError::NodeNotFound(link.from_node))?;
        let to = *index_of
            .get(&link.to_node)
            .ok_or(LayoutError::NodeNotFound(link.to_node))?;

        // node() cannot fail here; index_of was built from the same map.
        let source = graph
            .node(link.from_node)
            .ok_or(LayoutError::NodeNotFound(link.from_node))?;
        let target = graph
            .node(link.to_node)
            .ok_or(LayoutError::NodeNotFound(link.to_node))?;

        if link.from_socket >= source.outputs.len() {
            return Err(LayoutError::SocketOutOfRange {
                node: link.from_node,
                direction: SocketDirection::Output,
                index: link.from_socket,
                count: source.outputs.len(),
            });
        }
        if link.to_socket >= target.inputs.len() {
            return Err(LayoutError::SocketOutOfRange {
                node: link.to_node,
                direction: SocketDirection::Input,
                index: link.to_socket,
                count: target.inputs.len(),
            });
        }

        resolved.push(ResolvedLink {
            from,
            from_socket: link.from_socket,
            to,
            to_socket: link.to_socket,
        });
    }
    Ok(resolved)
}

/// One damped pass of the horizontal spacing constraint. For each link
/// the signed slack `C = (x_to - x_from - w_from) - target` is driven
/// toward zero by moving both endpoints symmetrically; already
/// well-separated links are skipped. Returns the energy contributed.
fn relax_horizontal(links: &[ResolvedLink], bodies: &mut Bodies, stage: &StagePlan) -> f64 {
    let k = stage.horizontal_k;
    let mut energy = 0.0;

    for link in links {
        let slack = bodies.x[link.to] - bodies.x[link.from] - bodies.width[link.from];
        let c = slack - stage.target_spacing;
        if c >= stage.target_spacing * FAR_APART_FACTOR {
            continue;
        }

        // Equality constraint with unit gradients (-1, +1).
        let lagrange = c / 2.0;
        bodies.x[link.from] += k * lagrange;
        bodies.x[link.to] -= k * lagrange;
        energy += k * k * 2.0 * lagrange * lagrange;
    }
    energy
}

/// One damped pass of the vertical socket-alignment constraint. The
/// effective y of a socket is the node's y minus `socket_offset` times
/// the socket's index; linked sockets are pulled to equal effective y.
fn relax_vertical(
    links: &[ResolvedLink],
    bodies: &mut Bodies,
    stage: &StagePlan,
    socket_offset: f64,
) -> f64 {
    let k = stage.vertical_k;
    let mut energy = 0.0;

    for link in links {
        let y_from = bodies.y[link.from] - socket_offset * link.from_socket as f64;
        let y_to = bodies.y[link.to] - socket_offset * link.to_socket as f64;
        let c = y_from - y_to;

        // Equality constraint with unit gradients (+1, -1).
        let lagrange = c / 2.0;
        bodies.y[link.from] -= k * lagrange;
        bodies.y[link.to] += k * lagrange;
        energy += k * k * 2.0 * lagrange * lagrange;
    }
    energy
}

/// One pass of pairwise overlap resolution over margin-inflated bounding
/// boxes. A colliding pair is separated along whichever axis needs the
/// smaller push; the other axis is left for later iterations.
fn relax_overlaps(bodies: &mut Bodies, stage: &StagePlan) -> f64 {
    let margin = 0.5 * stage.target_spacing;
    let n = bodies.x.len();
    let mut energy = 0.0;

    for i in 0..n {
        for j in (i + 1)..n {
            let cx_i = bodies.x[i] + 0.5 * bodies.width[i];
            let cx_j = bodies.x[j] + 0.5 * bodies.width[j];
            let rx_i = 0.5 * bodies.width[i] + margin;
            let rx_j = 0.5 * bodies.width[j] + margin;

            let cy_i = bodies.y[i] - 0.5 * bodies.height[i];
            let cy_j = bodies.y[j] - 0.5 * bodies.height[j];
            let ry_i = 0.5 * bodies.height[i] + margin;
            let ry_j = 0.5 * bodies.height[j] + margin;

            let gap_x = (cx_i - cx_j).abs() - (rx_i + rx_j);
            let gap_y = (cy_i - cy_j).abs() - (ry_i + ry_j);

            // Boxes collide only when both axis gaps are negative.
            if gap_x >= 0.0 || gap_y >= 0.0 {
                continue;
            }

            if gap_x > gap_y {
                let sign = if cx_i >= cx_j { 1.0 } else { -1.0 };
                let delta = -(gap_x / 2.0) * sign;
                bodies.x[i] += OVERLAP_K * delta;
                bodies.x[j] -= OVERLAP_K * delta;
                energy += OVERLAP_K * OVERLAP_K * 2.0 * delta * delta;
            } else {
                let sign = if cy_i >= cy_j { 1.0 } else { -1.0 };
                let delta = -(gap_y / 2.0) * sign;
                bodies.y[i] += OVERLAP_K * delta;
                bodies.y[j] -= OVERLAP_K * delta;
                energy += OVERLAP_K * OVERLAP_K * 2.0 * delta * delta;
            }
        }
    }
    energy
}
