// Kruskal's minimum spanning tree over stably sorted edges
// Direction is ignored. A disconnected graph yields a spanning forest and spanning_complete = false

use crate::engine::algorithms::reject_empty;
use crate::engine::graph::{Edge, Graph};
use crate::engine::step::{Recorder, Step};
use crate::engine::types::{Color, EdgeId, Parameters, format_number};
use crate::engine::union_find::UnionFind;

pub fn run(graph: &Graph, _parameters: &Parameters, recorder: &mut Recorder) {
    if reject_empty(graph, recorder) {
        return;
    }

    let mut sets = UnionFind::new(graph.node_ids());
    let mut sorted: Vec<&Edge> = graph.edges().collect();
    sorted.sort_by(|a, b| a.weight.total_cmp(&b.weight));

    let mut mst_edges: Vec<EdgeId> = Vec::new();
    let mut total_weight = 0.0;

    recorder.record(Step::message(format!(
        "Sort {} edges by weight in ascending order.",
        sorted.len()
    )));

    for edge in sorted {
        if recorder.is_truncated() {
            return;
        }
        let (u, v) = (&edge.source, &edge.target);

        recorder.record(
            Step::builder(format!(
                "Examine edge ({}, {}) with weight {}.",
                u,
                v,
                format_number(edge.weight)
            ))
            .node(u, Color::Frontier)
            .node(v, Color::Frontier)
            .edges(&mst_edges, Color::Settled)
            .edge(&edge.id, Color::Frontier)
            .build(),
        );

        if sets.union(u.as_str(), v.as_str()) {
            mst_edges.push(edge.id.clone());
            total_weight += edge.weight;
            recorder.record(
                Step::builder(format!(
                    "Accept edge ({}, {}). It joins two separate components.",
                    u, v
                ))
                .node(u, Color::Settled)
                .node(v, Color::Settled)
                .edges(&mst_edges, Color::Settled)
                .build(),
            );
        } else {
            recorder.record(
                Step::builder(format!(
                    "Reject edge ({}, {}). Its endpoints are already connected, it would form a cycle.",
                    u, v
                ))
                .node(u, Color::Rejected)
                .node(v, Color::Rejected)
                .edges(&mst_edges, Color::Settled)
                .edge(&edge.id, Color::Rejected)
                .build(),
            );
        }
    }

    let complete = mst_edges.len() + 1 == graph.node_count();
    recorder.set_spanning_complete(complete);

    let description = if complete {
        format!(
            "Kruskal finished. Minimum spanning tree weight: {}.",
            format_number(total_weight)
        )
    } else {
        format!(
            "Kruskal finished. The graph is disconnected, so the {} accepted edges form a minimum spanning forest of {} components with total weight {}.",
            mst_edges.len(),
            sets.component_count(),
            format_number(total_weight)
        )
    };
    recorder.record(
        Step::builder(description)
            .nodes(graph.node_ids(), Color::Settled)
            .edges(&mst_edges, Color::Settled)
            .build(),
    );
}
