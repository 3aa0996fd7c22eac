// SPDX-License-Identifier: MIT OR Apache-2.0
//! Build a small compositing-style node chain and arrange it.
//!
//! Run with `cargo run --example compositor_chain`; set `RUST_LOG=debug`
//! (or pass `verbose` below) to watch the per-iteration energy deltas.

use wirelay_graph::{Graph, Node};
use wirelay_layout::{layout, LayoutOptions};

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("wirelay_layout=debug".parse().expect("valid directive"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut graph = Graph::new("compositor");

    let source = graph.add_node(
        Node::new("Source")
            .with_size(140.0, 120.0)
            .with_output("Image"),
    );
    let blur = graph.add_node(
        Node::new("Blur")
            .with_size(140.0, 160.0)
            .with_input("Image")
            .with_input("Size")
            .with_output("Image"),
    );
    let mix = graph.add_node(
        Node::new("Mix")
            .with_size(140.0, 180.0)
            .with_input("Fac")
            .with_input("Image")
            .with_input("Image")
            .with_output("Image"),
    );
    let output = graph.add_node(
        Node::new("Output")
            .with_size(140.0, 100.0)
            .with_input("Image"),
    );

    graph.connect(source, 0, blur, 0).expect("valid link");
    graph.connect(source, 0, mix, 1).expect("valid link");
    graph.connect(blur, 0, mix, 2).expect("valid link");
    graph.connect(mix, 0, output, 0).expect("valid link");

    let options = LayoutOptions {
        verbose: true,
        ..Default::default()
    };
    let outcome = layout(&mut graph, &options).expect("well-formed graph");

    println!(
        "converged: {} after {} iterations",
        outcome.converged, outcome.iterations
    );
    for node in graph.nodes() {
        println!(
            "{:>8}: ({:8.2}, {:8.2})",
            node.name, node.position[0], node.position[1]
        );
    }
}
