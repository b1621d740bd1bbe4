// Breadth-first traversal narrated one queue operation at a time

use std::collections::{HashSet, VecDeque};

use crate::engine::adjacency::{Adjacency, NeighborOrder};
use crate::engine::algorithms::reject_empty;
use crate::engine::graph::Graph;
use crate::engine::step::{Recorder, Step, StepBuilder};
use crate::engine::types::{Color, NodeId, Parameters};

pub fn run(graph: &Graph, parameters: &Parameters, recorder: &mut Recorder) {
    if reject_empty(graph, recorder) {
        return;
    }
    let Some((start, fell_back)) = graph.resolve_or_first(parameters.start_node.as_ref()) else {
        return;
    };
    let adjacency = Adjacency::build(graph, NeighborOrder::Ascending);

    let mut queue = VecDeque::from([start.clone()]);
    let mut visited = HashSet::from([start.clone()]);
    let mut processed: HashSet<NodeId> = HashSet::new();

    let intro = match (&parameters.start_node, fell_back) {
        (Some(requested), true) => format!(
            "Start node {} does not exist. Starting BFS from node {}.",
            requested, start
        ),
        _ => format!("Starting BFS from node {}.", start),
    };
    recorder.record(Step::builder(intro).node(&start, Color::Frontier).build());

    while let Some(u) = queue.pop_front() {
        if recorder.is_truncated() {
            break;
        }

        recorder.record(
            snapshot(&processed, &queue, format!("Examining node {}.", u))
                .node(&u, Color::Active)
                .build(),
        );

        for neighbor in adjacency.neighbors(u.as_str()) {
            let v = &neighbor.node;
            let seen = if visited.contains(v) {
                Color::Frontier
            } else {
                Color::Rejected
            };
            recorder.record(
                snapshot(
                    &processed,
                    &queue,
                    format!("Inspecting neighbor {} of {}.", v, u),
                )
                .node(&u, Color::Active)
                .node(v, seen)
                .edge(&neighbor.edge, Color::Frontier)
                .build(),
            );

            if visited.insert(v.clone()) {
                queue.push_back(v.clone());
                recorder.record(
                    snapshot(&processed, &queue, format!("Enqueue {}.", v))
                        .node(&u, Color::Active)
                        .edge(&neighbor.edge, Color::Settled)
                        .build(),
                );
            }
        }

        processed.insert(u.clone());
        recorder.record(snapshot(&processed, &queue, format!("Done with node {}.", u)).build());
    }

    recorder.record(
        Step::builder(format!(
            "BFS finished. Reached {} of {} nodes.",
            processed.len(),
            graph.node_count()
        ))
        .nodes(&processed, Color::Settled)
        .build(),
    );
}

fn snapshot(
    processed: &HashSet<NodeId>,
    queue: &VecDeque<NodeId>,
    description: String,
) -> StepBuilder {
    Step::builder(description)
        .nodes(processed, Color::Settled)
        .nodes(queue, Color::Frontier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Limits;
    use crate::engine::step::Trace;
    use crate::schemas::graph::GraphInput;
    use serde_json::{Value, json};

    fn trace(graph: Value, start: Option<&str>) -> Trace {
        let input: GraphInput = serde_json::from_value(graph).unwrap();
        let graph = Graph::normalize(input, &Limits::default()).unwrap();
        let parameters = Parameters {
            start_node: start.map(NodeId::from),
            ..Parameters::default()
        };
        let mut recorder = Recorder::new(10_000);
        run(&graph, &parameters, &mut recorder);
        recorder.finish("bfs")
    }

    fn line() -> Value {
        json!({
            "nodes": [{"id": "A"}, {"id": "B"}, {"id": "C"}, {"id": "D"}],
            "edges": [
                {"id": "ab", "source": "A", "target": "B"},
                {"id": "bc", "source": "B", "target": "C"}
            ],
            "isDirected": false
        })
    }

    #[test]
    fn test_step_sequence_on_a_line() {
        let trace = trace(line(), Some("A"));
        let descriptions: Vec<&str> = trace.steps.iter().map(|s| s.description.as_str()).collect();

        assert_eq!(
            descriptions,
            vec![
                "Starting BFS from node A.",
                "Examining node A.",
                "Inspecting neighbor B of A.",
                "Enqueue B.",
                "Done with node A.",
                "Examining node B.",
                "Inspecting neighbor A of B.",
                "Inspecting neighbor C of B.",
                "Enqueue C.",
                "Done with node B.",
                "Examining node C.",
                "Inspecting neighbor B of C.",
                "Done with node C.",
                "BFS finished. Reached 3 of 4 nodes.",
            ]
        );
    }

    #[test]
    fn test_inspect_colors() {
        let trace = trace(line(), Some("A"));
        let a = NodeId::from("A");
        let b = NodeId::from("B");

        // B is unvisited when A inspects it
        assert_eq!(trace.steps[2].highlight_nodes[&b], Color::Rejected);
        // A is already processed when B looks back at it
        assert_eq!(trace.steps[6].highlight_nodes[&a], Color::Settled);
        assert_eq!(trace.steps[6].highlight_nodes[&b], Color::Active);
    }

    #[test]
    fn test_final_step_settles_only_reachable_nodes() {
        let trace = trace(line(), Some("A"));
        let last = trace.steps.last().unwrap();

        let settled: Vec<&str> = last.highlight_nodes.keys().map(NodeId::as_str).collect();
        assert_eq!(settled, vec!["A", "B", "C"]);
        assert!(last.highlight_nodes.values().all(|c| *c == Color::Settled));
    }

    #[test]
    fn test_unknown_start_falls_back_to_first_node() {
        let trace = trace(line(), Some("Q"));
        assert_eq!(
            trace.steps[0].description,
            "Start node Q does not exist. Starting BFS from node A."
        );
    }

    #[test]
    fn test_directed_graph_follows_direction() {
        let trace = trace(
            json!({
                "nodes": [{"id": "A"}, {"id": "B"}],
                "edges": [{"id": "ab", "source": "A", "target": "B"}],
                "isDirected": true
            }),
            Some("B"),
        );
        let last = trace.steps.last().unwrap();
        assert_eq!(last.highlight_nodes.len(), 1);
        assert!(last.highlight_nodes.contains_key("B"));
    }
}
