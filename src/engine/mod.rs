// Trace-generating graph algorithm engine
// A run normalizes the caller's graph, hands it to one engine and returns every step it recorded

pub mod adjacency;
pub mod algorithms;
pub mod graph;
pub mod step;
pub mod types;
pub mod union_find;

use crate::schemas::graph::GraphInput;
use graph::Graph;
use std::fmt;
use std::str::FromStr;
use step::{Recorder, Trace};
use types::Parameters;

pub use step::Step;

/// Defensive bounds applied to every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_nodes: usize,
    pub max_edges: usize,
    pub max_steps: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_nodes: 2_000,
            max_edges: 20_000,
            max_steps: 100_000,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("graph has {count} {kind}, the limit is {limit}")]
    GraphTooLarge {
        kind: &'static str,
        count: usize,
        limit: usize,
    },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("algorithm \"{0}\" is not supported")]
pub struct UnknownAlgorithm(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bfs,
    Dfs,
    Dijkstra,
    BellmanFord,
    Prim,
    Kruskal,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Dijkstra,
        Algorithm::BellmanFord,
        Algorithm::Prim,
        Algorithm::Kruskal,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::BellmanFord => "bellman_ford",
            Algorithm::Prim => "prim",
            Algorithm::Kruskal => "kruskal",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Bfs => "Breadth-First Search",
            Algorithm::Dfs => "Depth-First Search",
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::BellmanFord => "Bellman-Ford",
            Algorithm::Prim => "Prim",
            Algorithm::Kruskal => "Kruskal",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Algorithm::Bfs => "Level-by-level traversal from a start node using a FIFO queue",
            Algorithm::Dfs => "Depth-first traversal from a start node using an explicit stack",
            Algorithm::Dijkstra => "Shortest paths from a source for non-negative edge weights",
            Algorithm::BellmanFord => {
                "Shortest paths with negative weights and negative cycle detection"
            }
            Algorithm::Prim => "Minimum spanning tree grown from a start node",
            Algorithm::Kruskal => "Minimum spanning tree from sorted edges and union-find",
        }
    }

    pub fn supported_ids() -> Vec<&'static str> {
        Self::ALL.iter().map(Algorithm::id).collect()
    }

    /// Normalizes `input` and traces the algorithm over it.
    pub fn run(
        &self,
        input: GraphInput,
        parameters: &Parameters,
        limits: &Limits,
    ) -> Result<Trace, EngineError> {
        let graph = Graph::normalize(input, limits)?;
        Ok(self.trace(&graph, parameters, limits))
    }

    /// Traces the algorithm over an already normalized graph.
    pub fn trace(&self, graph: &Graph, parameters: &Parameters, limits: &Limits) -> Trace {
        log::debug!(
            "Running {} on {} nodes / {} edges",
            self.id(),
            graph.node_count(),
            graph.edge_count()
        );
        let mut recorder = Recorder::new(limits.max_steps);

        match self {
            Algorithm::Bfs => algorithms::bfs::run(graph, parameters, &mut recorder),
            Algorithm::Dfs => algorithms::dfs::run(graph, parameters, &mut recorder),
            Algorithm::Dijkstra => algorithms::dijkstra::run(graph, parameters, &mut recorder),
            Algorithm::BellmanFord => {
                algorithms::bellman_ford::run(graph, parameters, &mut recorder)
            }
            Algorithm::Prim => algorithms::prim::run(graph, parameters, &mut recorder),
            Algorithm::Kruskal => algorithms::kruskal::run(graph, parameters, &mut recorder),
        }

        log::debug!("{} recorded {} steps", self.id(), recorder.len());
        recorder.finish(self.id())
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.id() == normalized)
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_algorithm_names() {
        assert_eq!("BFS".parse::<Algorithm>(), Ok(Algorithm::Bfs));
        assert_eq!("bellman-ford".parse::<Algorithm>(), Ok(Algorithm::BellmanFord));
        assert_eq!(" kruskal ".parse::<Algorithm>(), Ok(Algorithm::Kruskal));
        assert_eq!(
            "ford_fulkerson".parse::<Algorithm>(),
            Err(UnknownAlgorithm("ford_fulkerson".to_string()))
        );
    }

    #[test]
    fn test_ids_round_trip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.id().parse::<Algorithm>(), Ok(algorithm));
        }
        assert_eq!(
            Algorithm::supported_ids(),
            vec!["bfs", "dfs", "dijkstra", "bellman_ford", "prim", "kruskal"]
        );
    }
}
