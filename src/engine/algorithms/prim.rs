// Prim's minimum spanning tree grown outward from a start node
// Heap ties break on from, then to, then edge id. Only undirected graphs are accepted

use std::collections::{BinaryHeap, HashSet};

use crate::engine::adjacency::{Adjacency, NeighborOrder};
use crate::engine::algorithms::{MinEntry, reject_empty};
use crate::engine::graph::Graph;
use crate::engine::step::{Recorder, Step};
use crate::engine::types::{Color, EdgeId, NodeId, Parameters, format_number};

type Candidate = MinEntry<(NodeId, NodeId, EdgeId)>;

pub fn run(graph: &Graph, parameters: &Parameters, recorder: &mut Recorder) {
    if reject_empty(graph, recorder) {
        return;
    }
    if graph.is_directed() {
        recorder.record(Step::message(
            "Prim requires an undirected graph. Set isDirected to false.",
        ));
        return;
    }
    let Some((start, fell_back)) = graph.resolve_or_first(parameters.start_node.as_ref()) else {
        return;
    };
    let adjacency = Adjacency::build(graph, NeighborOrder::Ascending);

    let mut visited: HashSet<NodeId> = HashSet::from([start.clone()]);
    let mut mst_edges: Vec<EdgeId> = Vec::new();
    let mut total_weight = 0.0;
    let mut heap: BinaryHeap<Candidate> = BinaryHeap::new();
    push_candidates(&mut heap, &adjacency, &start, &visited);

    let intro = match (&parameters.start_node, fell_back) {
        (Some(requested), true) => format!(
            "Start node {} does not exist. Starting Prim from node {}, its incident edges enter the priority queue.",
            requested, start
        ),
        _ => format!(
            "Starting Prim from node {}. Its incident edges enter the priority queue.",
            start
        ),
    };
    recorder.record(Step::builder(intro).node(&start, Color::Active).build());

    while visited.len() < graph.node_count() {
        if recorder.is_truncated() {
            return;
        }
        let Some(MinEntry {
            weight,
            item: (from, to, edge),
        }) = heap.pop()
        else {
            break;
        };
        if visited.contains(&to) {
            continue;
        }

        visited.insert(to.clone());
        mst_edges.push(edge.clone());
        total_weight += weight;

        recorder.record(
            Step::builder(format!(
                "Add edge ({}, {}) with weight {} to the tree. Total weight so far: {}.",
                from,
                to,
                format_number(weight),
                format_number(total_weight)
            ))
            .nodes(visited.iter().filter(|id| **id != to), Color::Settled)
            .node(&to, Color::Active)
            .edges(&mst_edges, Color::Settled)
            .edge_label(&edge, format_number(weight))
            .build(),
        );

        push_candidates(&mut heap, &adjacency, &to, &visited);
    }
    if recorder.is_truncated() {
        return;
    }

    if visited.len() < graph.node_count() {
        recorder.set_spanning_complete(false);
        recorder.record(
            Step::builder("The graph is disconnected. A complete spanning tree cannot be built.")
                .nodes(
                    graph.node_ids().filter(|id| !visited.contains(*id)),
                    Color::Rejected,
                )
                .edges(&mst_edges, Color::Settled)
                .build(),
        );
        return;
    }

    recorder.set_spanning_complete(true);
    recorder.record(
        Step::builder(format!(
            "Prim finished. Minimum spanning tree weight: {}.",
            format_number(total_weight)
        ))
        .nodes(graph.node_ids(), Color::Settled)
        .edges(&mst_edges, Color::Settled)
        .build(),
    );
}

fn push_candidates(
    heap: &mut BinaryHeap<Candidate>,
    adjacency: &Adjacency<'_>,
    from: &NodeId,
    visited: &HashSet<NodeId>,
) {
    for neighbor in adjacency.neighbors(from.as_str()) {
        if visited.contains(&neighbor.node) {
            continue;
        }
        heap.push(MinEntry {
            weight: neighbor.weight,
            item: (from.clone(), neighbor.node.clone(), neighbor.edge.clone()),
        });
    }
}
