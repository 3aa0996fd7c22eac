// SPDX-License-Identifier: MIT OR Apache-2.0
//! Constraint-relaxation layout for Wirelay node graphs.
//!
//! This crate computes 2D positions for a [`wirelay_graph::Graph`] so
//! that:
//! - linked nodes sit a fixed horizontal distance apart,
//! - linked sockets line up vertically,
//! - unrelated nodes do not overlap.
//!
//! ## Architecture
//!
//! There is no closed-form solution for these goals together, so the
//! solver runs damped Gauss–Seidel relaxation over the constraint set,
//! in two stages: a loose "expansion" stage that spreads the graph out,
//! then a "refinement" stage that tightens spacing while pushing
//! overlapping boxes apart. Convergence is detected heuristically from
//! the change in the per-iteration correction energy.

pub mod options;
pub mod solver;

pub use options::{default_height, HeightFn, LayoutOptions};
pub use solver::{layout, LayoutError, LayoutOutcome};
