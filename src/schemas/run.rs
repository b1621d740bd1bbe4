// Request and response bodies of the run / listing endpoints
use crate::engine::graph::coerce_id;
use crate::engine::step::{Step, Trace};
use crate::engine::types::{Color, NodeId, Parameters};
use crate::engine::Algorithm;
use crate::schemas::graph::GraphInput;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ParametersInput {
    #[serde(default, alias = "startNode")]
    pub start_node: Option<Value>,
    #[serde(default)]
    pub source: Option<Value>,
    #[serde(default)]
    pub target: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RunRequest {
    /// One of bfs, dfs, dijkstra, bellman_ford, prim, kruskal
    pub algorithm: String,
    pub graph: GraphInput,
    #[serde(default)]
    pub parameters: ParametersInput,

    // Older clients send the parameters next to the graph
    #[serde(default, alias = "startNode")]
    pub start_node: Option<Value>,
    #[serde(default)]
    pub source: Option<Value>,
    #[serde(default)]
    pub target: Option<Value>,
}

impl RunRequest {
    /// Nested parameters win over top-level ones. Ids are coerced the same
    /// way graph ids are.
    pub fn parameters(&self) -> Parameters {
        let pick = |nested: &Option<Value>, inline: &Option<Value>| {
            nested
                .as_ref()
                .and_then(coerce_id)
                .or_else(|| inline.as_ref().and_then(coerce_id))
                .map(NodeId::from)
        };
        Parameters {
            start_node: pick(&self.parameters.start_node, &self.start_node),
            source: pick(&self.parameters.source, &self.source),
            target: pick(&self.parameters.target, &self.target),
        }
    }
}

/// Maps semantic roles to the colors the frontend paints with.
pub fn palette(color: Color) -> &'static str {
    match color {
        Color::Settled => "#10b981",
        Color::Active => "#3b82f6",
        Color::Frontier => "#f59e0b",
        Color::Rejected => "#ef4444",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepView {
    pub highlight_nodes: BTreeMap<String, &'static str>,
    pub highlight_edges: BTreeMap<String, &'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_labels: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_labels: Option<BTreeMap<String, String>>,
    pub description: String,
}

impl From<Step> for StepView {
    fn from(step: Step) -> Self {
        Self {
            highlight_nodes: step
                .highlight_nodes
                .into_iter()
                .map(|(id, color)| (id.to_string(), palette(color)))
                .collect(),
            highlight_edges: step
                .highlight_edges
                .into_iter()
                .map(|(id, color)| (id.to_string(), palette(color)))
                .collect(),
            node_labels: step.node_labels.map(|labels| {
                labels
                    .into_iter()
                    .map(|(id, label)| (id.to_string(), label))
                    .collect()
            }),
            edge_labels: step.edge_labels.map(|labels| {
                labels
                    .into_iter()
                    .map(|(id, label)| (id.to_string(), label))
                    .collect()
            }),
            description: step.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResponse {
    pub name: String,
    pub steps: Vec<StepView>,
    pub truncated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spanning_complete: Option<bool>,
}

impl From<Trace> for RunResponse {
    fn from(trace: Trace) -> Self {
        Self {
            name: trace.name,
            steps: trace.steps.into_iter().map(StepView::from).collect(),
            truncated: trace.truncated,
            spanning_complete: trace.spanning_complete,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

impl From<Algorithm> for AlgorithmInfo {
    fn from(algorithm: Algorithm) -> Self {
        Self {
            id: algorithm.id(),
            name: algorithm.name(),
            description: algorithm.description(),
        }
    }
}
