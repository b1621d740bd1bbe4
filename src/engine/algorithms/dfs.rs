// Depth-first traversal over an explicit stack
// A node counts as visited when popped, so it may sit on the stack several times

use std::collections::HashSet;

use crate::engine::adjacency::{Adjacency, NeighborOrder};
use crate::engine::algorithms::reject_empty;
use crate::engine::graph::Graph;
use crate::engine::step::{Recorder, Step, StepBuilder};
use crate::engine::types::{Color, EdgeId, NodeId, Parameters};

pub fn run(graph: &Graph, parameters: &Parameters, recorder: &mut Recorder) {
    if reject_empty(graph, recorder) {
        return;
    }
    let Some((start, fell_back)) = graph.resolve_or_first(parameters.start_node.as_ref()) else {
        return;
    };
    let adjacency = Adjacency::build(graph, NeighborOrder::Descending);

    let mut stack = vec![start.clone()];
    let mut visited: HashSet<NodeId> = HashSet::new();
    // Every edge that led to a push. Never pruned, so it can include edges
    // whose target was later reached another way.
    let mut path_edges: HashSet<EdgeId> = HashSet::new();

    let intro = match (&parameters.start_node, fell_back) {
        (Some(requested), true) => format!(
            "Start node {} does not exist. Pushing node {} onto the stack.",
            requested, start
        ),
        _ => format!("Starting DFS. Pushing node {} onto the stack.", start),
    };
    recorder.record(Step::builder(intro).node(&start, Color::Frontier).build());

    while let Some(u) = stack.pop() {
        if recorder.is_truncated() {
            break;
        }
        if !visited.insert(u.clone()) {
            continue;
        }

        recorder.record(
            snapshot(&visited, &u, &path_edges, format!("Pop node {} and mark it visited.", u))
                .build(),
        );

        for neighbor in adjacency.neighbors(u.as_str()) {
            let v = &neighbor.node;
            if visited.contains(v) {
                continue;
            }

            recorder.record(
                snapshot(
                    &visited,
                    &u,
                    &path_edges,
                    format!("Examine edge ({}, {}).", u, v),
                )
                .node(v, Color::Frontier)
                .edge(&neighbor.edge, Color::Frontier)
                .build(),
            );

            stack.push(v.clone());
            path_edges.insert(neighbor.edge.clone());

            recorder.record(
                snapshot(&visited, &u, &path_edges, format!("Push {} onto the stack.", v))
                    .node(v, Color::Frontier)
                    .build(),
            );
        }
    }

    recorder.record(
        Step::builder(format!(
            "DFS finished. Visited {} of {} nodes.",
            visited.len(),
            graph.node_count()
        ))
        .nodes(&visited, Color::Settled)
        .edges(&path_edges, Color::Settled)
        .build(),
    );
}

/// Visited nodes settled except the current one, which stays active.
fn snapshot(
    visited: &HashSet<NodeId>,
    current: &NodeId,
    path_edges: &HashSet<EdgeId>,
    description: String,
) -> StepBuilder {
    Step::builder(description)
        .nodes(visited.iter().filter(|id| *id != current), Color::Settled)
        .node(current, Color::Active)
        .edges(path_edges, Color::Settled)
}
