// Normalize the frontend graph into canonical string ids before any engine runs
use crate::engine::types::{EdgeId, NodeId};
use crate::engine::{EngineError, Limits};
use crate::schemas::graph::GraphInput;
use petgraph::graph::{DiGraph, NodeIndex};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

pub const DEFAULT_WEIGHT: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub weight: f64,
    /// Carried through from the input; direction is decided by the graph flag
    pub is_directed: Option<bool>,
}

/// Immutable canonical graph for a single algorithm run.
///
/// Edges are always stored source to target. Whether they are walked both
/// ways is decided by [`Graph::is_directed`]. Node and edge indices follow
/// input order, which is what "first node" fallbacks and tie-breaks use.
#[derive(Debug, Clone)]
pub struct Graph {
    graph: DiGraph<Node, Edge>,
    node_map: HashMap<NodeId, NodeIndex>,
    directed: bool,
}

impl Graph {
    pub fn normalize(input: GraphInput, limits: &Limits) -> Result<Self, EngineError> {
        if input.nodes.len() > limits.max_nodes {
            return Err(EngineError::GraphTooLarge {
                kind: "nodes",
                count: input.nodes.len(),
                limit: limits.max_nodes,
            });
        }
        if input.edges.len() > limits.max_edges {
            return Err(EngineError::GraphTooLarge {
                kind: "edges",
                count: input.edges.len(),
                limit: limits.max_edges,
            });
        }

        let mut graph = DiGraph::with_capacity(input.nodes.len(), input.edges.len());
        let mut node_map = HashMap::with_capacity(input.nodes.len());

        // Add Nodes
        for node in input.nodes {
            let Some(id) = coerce_id(&node.id) else {
                log::warn!("Dropping node without a usable id: {}", node.id);
                continue;
            };
            let id = NodeId::from(id);
            if node_map.contains_key(&id) {
                log::warn!("Duplicate node id {}, keeping the first occurrence", id);
                continue;
            }
            let idx = graph.add_node(Node {
                id: id.clone(),
                x: node.x,
                y: node.y,
                label: node.label,
            });
            node_map.insert(id, idx);
        }

        // Add Edges
        let mut edge_ids: HashSet<EdgeId> = HashSet::with_capacity(input.edges.len());
        for (position, edge) in input.edges.into_iter().enumerate() {
            let (Some(source), Some(target)) = (coerce_id(&edge.source), coerce_id(&edge.target))
            else {
                log::warn!("Dropping edge #{} without usable endpoints", position);
                continue;
            };
            let (Some(&src), Some(&dst)) =
                (node_map.get(source.as_str()), node_map.get(target.as_str()))
            else {
                log::warn!(
                    "Dropping edge #{} ({} -> {}), an endpoint is not a node",
                    position,
                    source,
                    target
                );
                continue;
            };

            let id = unique_edge_id(coerce_id(&edge.id), position, &edge_ids);
            let weight = match edge.weight.as_ref() {
                None | Some(Value::Null) => DEFAULT_WEIGHT,
                Some(raw) => coerce_weight(raw).unwrap_or_else(|| {
                    log::warn!("Edge {} has unusable weight {}, using 1", id, raw);
                    DEFAULT_WEIGHT
                }),
            };
            edge_ids.insert(id.clone());
            graph.add_edge(
                src,
                dst,
                Edge {
                    id,
                    source: NodeId::from(source),
                    target: NodeId::from(target),
                    weight,
                    is_directed: edge.is_directed,
                },
            );
        }

        Ok(Self {
            graph,
            node_map,
            directed: input.is_directed,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes().map(|node| &node.id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node_map.contains_key(id)
    }

    pub fn first_node(&self) -> Option<&NodeId> {
        self.node_ids().next()
    }

    /// Edges between known nodes, in input order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.graph.edge_weights()
    }

    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }

    pub fn inner(&self) -> &DiGraph<Node, Edge> {
        &self.graph
    }

    /// Returns the requested node if it exists, otherwise the first node.
    ///
    /// The flag is true when the request was present but unknown.
    pub fn resolve_or_first(&self, requested: Option<&NodeId>) -> Option<(NodeId, bool)> {
        match requested {
            Some(id) if self.contains(id.as_str()) => Some((id.clone(), false)),
            Some(_) => self.first_node().map(|id| (id.clone(), true)),
            None => self.first_node().map(|id| (id.clone(), false)),
        }
    }
}

/// Later edges reusing an id get `e{position}` instead, so every highlight
/// key names exactly one edge.
fn unique_edge_id(requested: Option<String>, position: usize, taken: &HashSet<EdgeId>) -> EdgeId {
    if let Some(id) = requested {
        if !taken.contains(id.as_str()) {
            return EdgeId::from(id);
        }
        log::warn!("Duplicate edge id {}, renaming edge #{}", id, position);
    }

    let base = format!("e{}", position);
    let mut candidate = base.clone();
    let mut suffix = 1;
    while taken.contains(candidate.as_str()) {
        candidate = format!("{}_{}", base, suffix);
        suffix += 1;
    }
    EdgeId::from(candidate)
}

/// Coerces a loosely typed JSON id into its canonical string form.
///
/// Integral numbers lose their fraction so `1` and `1.0` name the same node.
pub fn coerce_id(value: &Value) -> Option<String> {
    let id = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
                    _ => n.to_string(),
                }
            }
        }
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    (!id.is_empty()).then_some(id)
}

fn coerce_weight(value: &Value) -> Option<f64> {
    let weight = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    weight.is_finite().then_some(weight)
}
