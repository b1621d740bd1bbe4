// Direction-aware neighbor lists read off the normalized petgraph
use crate::engine::graph::{Edge, Graph};
use crate::engine::types::{EdgeId, NodeId};
use petgraph::Direction;
use petgraph::graph::EdgeIndex;
use petgraph::visit::EdgeRef;

#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    pub node: NodeId,
    pub weight: f64,
    pub edge: EdgeId,
}

/// How each node's neighbor list is ordered. Parallel edges to the same
/// neighbor always keep input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeighborOrder {
    /// By neighbor id, ascending.
    Ascending,
    /// By neighbor id, descending. A stack fed in this order pops ascending.
    Descending,
}

#[derive(Debug, Clone)]
pub struct Adjacency<'g> {
    graph: &'g Graph,
    lists: Vec<Vec<Neighbor>>,
}

impl<'g> Adjacency<'g> {
    /// Outgoing edges for a directed graph. An undirected graph also walks
    /// incoming edges, so each edge shows up at both endpoints under the
    /// same id.
    pub fn build(graph: &'g Graph, order: NeighborOrder) -> Self {
        let inner = graph.inner();
        let mut lists = Vec::with_capacity(inner.node_count());

        for idx in inner.node_indices() {
            let mut entries: Vec<(EdgeIndex, Neighbor)> = inner
                .edges_directed(idx, Direction::Outgoing)
                .map(|edge| (edge.id(), neighbor(&edge.weight().target, edge.weight())))
                .collect();
            if !graph.is_directed() {
                entries.extend(
                    inner
                        .edges_directed(idx, Direction::Incoming)
                        .map(|edge| (edge.id(), neighbor(&edge.weight().source, edge.weight()))),
                );
            }

            entries.sort_by(|(ia, a), (ib, b)| {
                let by_node = match order {
                    NeighborOrder::Ascending => a.node.cmp(&b.node),
                    NeighborOrder::Descending => b.node.cmp(&a.node),
                };
                by_node.then(ia.cmp(ib))
            });
            lists.push(entries.into_iter().map(|(_, n)| n).collect());
        }

        Self { graph, lists }
    }

    pub fn neighbors(&self, id: &str) -> &[Neighbor] {
        self.graph
            .index_of(id)
            .and_then(|idx| self.lists.get(idx.index()))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

fn neighbor(node: &NodeId, edge: &Edge) -> Neighbor {
    Neighbor {
        node: node.clone(),
        weight: edge.weight,
        edge: edge.id.clone(),
    }
}
