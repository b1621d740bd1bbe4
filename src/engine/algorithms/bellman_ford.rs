// Bellman-Ford shortest paths with negative weights and cycle detection

use crate::engine::algorithms::{Distances, join_path, reject_empty};
use crate::engine::graph::Graph;
use crate::engine::step::{Recorder, Step};
use crate::engine::types::{Color, EdgeId, NodeId, Parameters, format_number};

struct Link<'a> {
    from: &'a NodeId,
    to: &'a NodeId,
    weight: f64,
    edge: &'a EdgeId,
}

pub fn run(graph: &Graph, parameters: &Parameters, recorder: &mut Recorder) {
    if reject_empty(graph, recorder) {
        return;
    }
    let requested = parameters.source.as_ref().or(parameters.start_node.as_ref());
    let Some((source, fell_back)) = graph.resolve_or_first(requested) else {
        return;
    };
    let target = parameters
        .target
        .as_ref()
        .filter(|id| graph.contains(id.as_str()))
        .cloned();

    let mut distances = Distances::new(graph, &source);

    let mut intro = String::new();
    if let (Some(requested), true) = (requested, fell_back) {
        intro.push_str(&format!("Source node {} does not exist. ", requested));
    }
    if let Some(requested) = parameters.target.as_ref().filter(|_| target.is_none()) {
        intro.push_str(&format!(
            "Target node {} does not exist, computing all distances. ",
            requested
        ));
    }
    intro.push_str(&format!(
        "Initialize: distance({}) = 0, every other node = ∞.",
        source
    ));
    recorder.record(
        Step::builder(intro)
            .node(&source, Color::Settled)
            .node_labels(distances.labels(graph))
            .build(),
    );

    let mut arcs = Vec::new();
    for edge in graph.edges() {
        arcs.push(Link {
            from: &edge.source,
            to: &edge.target,
            weight: edge.weight,
            edge: &edge.id,
        });
        if !graph.is_directed() {
            arcs.push(Link {
                from: &edge.target,
                to: &edge.source,
                weight: edge.weight,
                edge: &edge.id,
            });
        }
    }

    let passes = graph.node_count().saturating_sub(1);
    for pass in 1..=passes {
        if recorder.is_truncated() {
            return;
        }
        recorder.record(
            Step::builder(format!("Pass {} / {}.", pass, passes))
                .node_labels(distances.labels(graph))
                .build(),
        );

        let mut changed = false;
        for arc in &arcs {
            let from_distance = distances.get(arc.from.as_str());
            if !from_distance.is_finite() {
                continue;
            }
            let candidate = from_distance + arc.weight;
            let old = distances.get(arc.to.as_str());
            if candidate < old {
                distances.update(arc.to, candidate, arc.from, arc.edge);
                changed = true;
                recorder.record(
                    Step::builder(format!(
                        "Update {}: {} -> {} (via {}, weight {}).",
                        arc.to,
                        format_number(old),
                        format_number(candidate),
                        arc.from,
                        format_number(arc.weight)
                    ))
                    .node(arc.from, Color::Active)
                    .node(arc.to, Color::Settled)
                    .edge(arc.edge, Color::Settled)
                    .node_labels(distances.labels(graph))
                    .build(),
                );
            }
        }

        if !changed {
            recorder.record(
                Step::builder("No distance changed in this pass. Converged early.")
                    .node_labels(distances.labels(graph))
                    .build(),
            );
            break;
        }
    }
    if recorder.is_truncated() {
        return;
    }

    for arc in &arcs {
        let from_distance = distances.get(arc.from.as_str());
        if from_distance.is_finite() && from_distance + arc.weight < distances.get(arc.to.as_str())
        {
            recorder.record(
                Step::builder(format!(
                    "Error: negative cycle detected at edge ({} -> {}). Shortest paths are undefined.",
                    arc.from, arc.to
                ))
                .node(arc.from, Color::Rejected)
                .node(arc.to, Color::Rejected)
                .edge(arc.edge, Color::Rejected)
                .node_labels(distances.labels(graph))
                .build(),
            );
            return;
        }
    }

    match target {
        Some(target) if distances.is_reachable(target.as_str()) => {
            let (path, path_edges) = distances.path_to(graph, &source, &target);
            recorder.record(
                Step::builder(format!(
                    "Shortest path from {} to {}: {}, total length {}.",
                    source,
                    target,
                    join_path(&path),
                    format_number(distances.get(target.as_str()))
                ))
                .nodes(&path, Color::Settled)
                .edges(&path_edges, Color::Settled)
                .node_labels(distances.labels(graph))
                .build(),
            );
        }
        Some(target) => {
            recorder.record(
                Step::builder(format!("{} is unreachable from {}.", target, source))
                    .node(&source, Color::Settled)
                    .node(&target, Color::Rejected)
                    .node_labels(distances.labels(graph))
                    .build(),
            );
        }
        None => {
            recorder.record(
                Step::builder(format!(
                    "Bellman-Ford from {} finished. Shortest distances to every reachable node are known.",
                    source
                ))
                .nodes(
                    graph
                        .node_ids()
                        .filter(|id| distances.is_reachable(id.as_str())),
                    Color::Settled,
                )
                .node_labels(distances.labels(graph))
                .build(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Limits;
    use crate::engine::step::Trace;
    use crate::schemas::graph::GraphInput;
    use serde_json::{Value, json};

    fn trace(graph: Value, source: Option<&str>, target: Option<&str>) -> Trace {
        let input: GraphInput = serde_json::from_value(graph).unwrap();
        let graph = Graph::normalize(input, &Limits::default()).unwrap();
        let parameters = Parameters {
            source: source.map(NodeId::from),
            target: target.map(NodeId::from),
            ..Parameters::default()
        };
        let mut recorder = Recorder::new(10_000);
        run(&graph, &parameters, &mut recorder);
        recorder.finish("bellman_ford")
    }

    #[test]
    fn test_negative_edge_shortens_path() {
        let trace = trace(
            json!({
                "nodes": [{"id": "A"}, {"id": "B"}, {"id": "C"}],
                "edges": [
                    {"id": "ab", "source": "A", "target": "B", "weight": 4},
                    {"id": "ac", "source": "A", "target": "C", "weight": 2},
                    {"id": "cb", "source": "C", "target": "B", "weight": -3}
                ],
                "isDirected": true
            }),
            Some("A"),
            Some("B"),
        );
        let last = trace.steps.last().unwrap();

        assert_eq!(
            last.description,
            "Shortest path from A to B: A -> C -> B, total length -1."
        );
        let edges: Vec<&str> = last.highlight_edges.keys().map(EdgeId::as_str).collect();
        assert_eq!(edges, vec!["ac", "cb"]);
    }

    #[test]
    fn test_negative_cycle_is_reported_without_path() {
        let trace = trace(
            json!({
                "nodes": [{"id": "A"}, {"id": "B"}, {"id": "C"}],
                "edges": [
                    {"id": "ab", "source": "A", "target": "B", "weight": 1},
                    {"id": "bc", "source": "B", "target": "C", "weight": -3},
                    {"id": "cb", "source": "C", "target": "B", "weight": 1}
                ],
                "isDirected": true
            }),
            Some("A"),
            Some("C"),
        );
        let last = trace.steps.last().unwrap();

        assert!(last.description.starts_with("Error: negative cycle detected"));
        assert!(last.highlight_edges.values().all(|c| *c == Color::Rejected));
        assert!(!trace
            .steps
            .iter()
            .any(|s| s.description.starts_with("Shortest path")));
    }

    #[test]
    fn test_converges_early() {
        let trace = trace(
            json!({
                "nodes": [{"id": "A"}, {"id": "B"}, {"id": "C"}, {"id": "D"}],
                "edges": [
                    {"id": "ab", "source": "A", "target": "B", "weight": 1},
                    {"id": "bc", "source": "B", "target": "C", "weight": 1},
                    {"id": "cd", "source": "C", "target": "D", "weight": 1}
                ],
                "isDirected": true
            }),
            Some("A"),
            None,
        );
        let headers: Vec<&str> = trace
            .steps
            .iter()
            .map(|s| s.description.as_str())
            .filter(|d| d.starts_with("Pass "))
            .collect();

        // Edges are listed in path order, so the first pass settles everything
        assert_eq!(headers, vec!["Pass 1 / 3.", "Pass 2 / 3."]);
        assert!(trace
            .steps
            .iter()
            .any(|s| s.description.contains("Converged early")));
        let labels = trace.steps.last().unwrap().node_labels.clone().unwrap();
        assert_eq!(labels["D"], "3");
    }

    #[test]
    fn test_unreachable_target() {
        let trace = trace(
            json!({
                "nodes": [{"id": "A"}, {"id": "B"}],
                "edges": [],
                "isDirected": true
            }),
            Some("A"),
            Some("B"),
        );
        let last = trace.steps.last().unwrap();

        assert_eq!(last.description, "B is unreachable from A.");
        assert_eq!(last.highlight_nodes[&NodeId::from("B")], Color::Rejected);
    }

    #[test]
    fn test_unknown_target_is_narrated() {
        let trace = trace(
            json!({
                "nodes": [{"id": "A"}, {"id": "B"}],
                "edges": [{"id": "ab", "source": "A", "target": "B", "weight": 2}]
            }),
            Some("A"),
            Some("Q"),
        );

        assert_eq!(
            trace.steps[0].description,
            "Target node Q does not exist, computing all distances. Initialize: distance(A) = 0, every other node = ∞."
        );
        assert!(
            trace
                .steps
                .last()
                .unwrap()
                .description
                .starts_with("Bellman-Ford from A finished")
        );
    }

    #[test]
    fn test_start_node_is_used_when_source_missing() {
        let input: GraphInput = serde_json::from_value(json!({
            "nodes": [{"id": "A"}, {"id": "B"}],
            "edges": [{"id": "ab", "source": "A", "target": "B", "weight": 7}]
        }))
        .unwrap();
        let graph = Graph::normalize(input, &Limits::default()).unwrap();
        let parameters = Parameters {
            start_node: Some(NodeId::from("B")),
            ..Parameters::default()
        };
        let mut recorder = Recorder::new(1_000);
        run(&graph, &parameters, &mut recorder);
        let trace = recorder.finish("bellman_ford");

        assert_eq!(
            trace.steps[0].description,
            "Initialize: distance(B) = 0, every other node = ∞."
        );
        let labels = trace.steps.last().unwrap().node_labels.clone().unwrap();
        assert_eq!(labels["A"], "7");
    }
}
