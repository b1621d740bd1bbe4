// Graph definitions as the frontend sends them
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct NodeInput {
    /// String or number; coerced to a string id by the normalizer. Nodes
    /// without one are dropped there.
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EdgeInput {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub source: Value,
    #[serde(default)]
    pub target: Value,

    /// Number or numeric string, defaults to 1
    #[serde(default)]
    pub weight: Option<Value>,
    #[serde(default)]
    pub is_directed: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GraphInput {
    #[serde(default)]
    pub nodes: Vec<NodeInput>,
    #[serde(default)]
    pub edges: Vec<EdgeInput>,
    #[serde(default)]
    pub is_directed: bool,
}
