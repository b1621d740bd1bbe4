// The six step-emitting algorithm engines and the helpers they share

pub mod bellman_ford;
pub mod bfs;
pub mod dfs;
pub mod dijkstra;
pub mod kruskal;
pub mod prim;

use crate::engine::graph::Graph;
use crate::engine::step::{Recorder, Step};
use crate::engine::types::{EdgeId, NodeId, format_number};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

pub(crate) const EMPTY_GRAPH_MESSAGE: &str = "Empty graph. Add at least one node.";

/// Records the empty-graph terminal step. Returns true when the run must stop.
pub(crate) fn reject_empty(graph: &Graph, recorder: &mut Recorder) -> bool {
    if graph.is_empty() {
        recorder.record(Step::message(EMPTY_GRAPH_MESSAGE));
        return true;
    }
    false
}

/// Min-heap entry for [`std::collections::BinaryHeap`]: smallest weight pops
/// first, ties pop the smallest `item`.
#[derive(Debug, Clone)]
pub(crate) struct MinEntry<T> {
    pub weight: f64,
    pub item: T,
}

impl<T: Ord> Ord for MinEntry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.item.cmp(&self.item))
    }
}

impl<T: Ord> PartialOrd for MinEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> PartialEq for MinEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: Ord> Eq for MinEntry<T> {}

/// Tentative distances plus the predecessor link (node and exact edge) that
/// produced each one.
#[derive(Debug, Clone)]
pub(crate) struct Distances {
    distance: HashMap<NodeId, f64>,
    previous: HashMap<NodeId, (NodeId, EdgeId)>,
}

impl Distances {
    pub fn new(graph: &Graph, source: &NodeId) -> Self {
        let mut distance: HashMap<NodeId, f64> = graph
            .node_ids()
            .map(|id| (id.clone(), f64::INFINITY))
            .collect();
        distance.insert(source.clone(), 0.0);
        Self {
            distance,
            previous: HashMap::new(),
        }
    }

    pub fn get(&self, id: &str) -> f64 {
        self.distance.get(id).copied().unwrap_or(f64::INFINITY)
    }

    pub fn is_reachable(&self, id: &str) -> bool {
        self.get(id).is_finite()
    }

    pub fn update(&mut self, node: &NodeId, distance: f64, via: &NodeId, edge: &EdgeId) {
        self.distance.insert(node.clone(), distance);
        self.previous.insert(node.clone(), (via.clone(), edge.clone()));
    }

    pub fn previous(&self, id: &str) -> Option<&(NodeId, EdgeId)> {
        self.previous.get(id)
    }

    /// Every predecessor edge currently recorded.
    pub fn tree_edges(&self) -> impl Iterator<Item = &EdgeId> {
        self.previous.values().map(|(_, edge)| edge)
    }

    pub fn labels(&self, graph: &Graph) -> BTreeMap<NodeId, String> {
        graph
            .node_ids()
            .map(|id| (id.clone(), format_number(self.get(id.as_str()))))
            .collect()
    }

    /// Walks predecessor links back from `target` and returns the path in
    /// source-to-target order with the edges used.
    ///
    /// The walk stops at `source`, at a node without a predecessor, or after
    /// one step per node, so a corrupted chain can never loop forever.
    pub fn path_to(
        &self,
        graph: &Graph,
        source: &NodeId,
        target: &NodeId,
    ) -> (Vec<NodeId>, Vec<EdgeId>) {
        let mut nodes = vec![target.clone()];
        let mut edges = Vec::new();
        let mut current = target.clone();

        for _ in 0..graph.node_count() {
            if current == *source {
                break;
            }
            let Some((prev, edge)) = self.previous(current.as_str()) else {
                break;
            };
            edges.push(edge.clone());
            nodes.push(prev.clone());
            current = prev.clone();
        }

        nodes.reverse();
        edges.reverse();
        (nodes, edges)
    }
}

pub(crate) fn join_path(path: &[NodeId]) -> String {
    path.iter()
        .map(NodeId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn test_min_entry_pops_smallest_first() {
        let mut heap = BinaryHeap::new();
        heap.push(MinEntry { weight: 3.0, item: "c" });
        heap.push(MinEntry { weight: -1.0, item: "a" });
        heap.push(MinEntry { weight: 3.0, item: "b" });
        heap.push(MinEntry { weight: 0.5, item: "z" });

        let order: Vec<&str> = std::iter::from_fn(|| heap.pop().map(|e| e.item)).collect();
        assert_eq!(order, vec!["a", "z", "b", "c"]);
    }
}
