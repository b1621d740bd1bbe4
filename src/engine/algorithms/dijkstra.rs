// Dijkstra's single-source shortest paths with a lazily-pruned binary heap

use std::collections::{BinaryHeap, HashSet};

use crate::engine::adjacency::{Adjacency, NeighborOrder};
use crate::engine::algorithms::{Distances, MinEntry, join_path, reject_empty};
use crate::engine::graph::Graph;
use crate::engine::step::{Recorder, Step};
use crate::engine::types::{Color, EdgeId, NodeId, Parameters, format_number};

pub fn run(graph: &Graph, parameters: &Parameters, recorder: &mut Recorder) {
    if reject_empty(graph, recorder) {
        return;
    }
    let Some((source, fell_back)) = graph.resolve_or_first(parameters.source.as_ref()) else {
        return;
    };
    let target = parameters
        .target
        .as_ref()
        .filter(|id| graph.contains(id.as_str()))
        .cloned();

    for edge in graph.edges().filter(|edge| edge.weight < 0.0) {
        recorder.record(
            Step::builder(format!(
                "Warning: edge ({}, {}) has negative weight {}. Dijkstra does not support negative weights, results may be wrong.",
                edge.source,
                edge.target,
                format_number(edge.weight)
            ))
            .edge(&edge.id, Color::Rejected)
            .build(),
        );
    }

    let adjacency = Adjacency::build(graph, NeighborOrder::Ascending);
    let mut distances = Distances::new(graph, &source);
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut heap = BinaryHeap::from([MinEntry {
        weight: 0.0,
        item: source.clone(),
    }]);

    let mut intro = String::new();
    if let (Some(requested), true) = (&parameters.source, fell_back) {
        intro.push_str(&format!("Source node {} does not exist. ", requested));
    }
    if let Some(requested) = parameters.target.as_ref().filter(|_| target.is_none()) {
        intro.push_str(&format!(
            "Target node {} does not exist, computing all distances. ",
            requested
        ));
    }
    intro.push_str(&format!(
        "Initialize Dijkstra from source {}: distance({}) = 0, every other node = ∞.",
        source, source
    ));
    recorder.record(
        Step::builder(intro)
            .node(&source, Color::Active)
            .node_labels(distances.labels(graph))
            .build(),
    );

    while let Some(MinEntry { item: u, .. }) = heap.pop() {
        if recorder.is_truncated() {
            break;
        }
        if !visited.insert(u.clone()) {
            continue;
        }

        let labels = distances.labels(graph);
        let incoming = distances.previous(u.as_str()).map(|(_, edge)| edge.clone());
        recorder.record(
            Step::builder(format!(
                "Settle node {} with shortest distance {}.",
                u,
                format_number(distances.get(u.as_str()))
            ))
            .nodes(visited.iter().filter(|id| **id != u), Color::Settled)
            .node(&u, Color::Active)
            .edges(incoming.iter(), Color::Settled)
            .node_labels(labels.clone())
            .build(),
        );

        if target.as_ref() == Some(&u) {
            let (path, path_edges) = distances.path_to(graph, &source, &u);
            recorder.record(
                Step::builder(format!(
                    "Shortest path from {} to {}: {}, total length {}.",
                    source,
                    u,
                    join_path(&path),
                    format_number(distances.get(u.as_str()))
                ))
                .nodes(&path, Color::Settled)
                .edges(&path_edges, Color::Settled)
                .node_labels(labels)
                .build(),
            );
            return;
        }

        let base = distances.get(u.as_str());
        let mut relaxed: Vec<(NodeId, f64, EdgeId, f64)> = Vec::new();
        for neighbor in adjacency.neighbors(u.as_str()) {
            if visited.contains(&neighbor.node) {
                continue;
            }
            let candidate = base + neighbor.weight;
            let old = distances.get(neighbor.node.as_str());
            if candidate < old {
                distances.update(&neighbor.node, candidate, &u, &neighbor.edge);
                heap.push(MinEntry {
                    weight: candidate,
                    item: neighbor.node.clone(),
                });
                relaxed.push((
                    neighbor.node.clone(),
                    neighbor.weight,
                    neighbor.edge.clone(),
                    old,
                ));
            }
        }

        if relaxed.is_empty() {
            continue;
        }

        let updates = relaxed
            .iter()
            .map(|(v, w, _, old)| {
                format!(
                    "{}: {} -> {} (edge weight {})",
                    v,
                    format_number(*old),
                    format_number(distances.get(v.as_str())),
                    format_number(*w)
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        let mut step = Step::builder(format!("Relax neighbors of {}: {}.", u, updates))
            .nodes(visited.iter().filter(|id| **id != u), Color::Settled)
            .node(&u, Color::Active)
            .nodes(relaxed.iter().map(|(v, ..)| v), Color::Frontier)
            .edges(relaxed.iter().map(|(_, _, edge, _)| edge), Color::Frontier)
            .edges(incoming.iter(), Color::Settled)
            .node_labels(distances.labels(graph));
        for (_, weight, edge, _) in &relaxed {
            step = step.edge_label(edge, format_number(*weight));
        }
        recorder.record(step.build());
    }

    if let Some(target) = target {
        // Reaching here means the target was never settled
        recorder.record(
            Step::builder(format!(
                "No path from {} to {}. The graph may be disconnected.",
                source, target
            ))
            .nodes(
                graph.node_ids().filter(|id| !visited.contains(*id)),
                Color::Rejected,
            )
            .node_labels(distances.labels(graph))
            .build(),
        );
        return;
    }

    let (reachable, unreachable): (Vec<&NodeId>, Vec<&NodeId>) = graph
        .node_ids()
        .partition(|id| distances.is_reachable(id.as_str()));
    recorder.record(
        Step::builder(format!(
            "Dijkstra from {} finished. Shortest distances to all reachable nodes are known.",
            source
        ))
        .nodes(reachable, Color::Settled)
        .nodes(unreachable, Color::Rejected)
        .edges(distances.tree_edges(), Color::Settled)
        .node_labels(distances.labels(graph))
        .build(),
    );
}
