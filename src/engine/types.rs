// Types shared by the normalizer, the recorder and every algorithm engine
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Canonical node identifier. Always a string once the graph is normalized.
    NodeId
);

string_id!(
    /// Canonical edge identifier. Reverse traversals of an undirected edge keep it.
    EdgeId
);

/// Semantic highlight role of a node or edge within a single step.
///
/// Variants are declared in ascending precedence: when one id is painted with
/// several roles while a step is being built, the greatest one is kept.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Color {
    /// Discarded candidate, unreachable node, or error.
    Rejected,
    /// Discovered but not yet fully processed.
    Frontier,
    /// Currently being processed.
    Active,
    /// Done or accepted into the result.
    Settled,
}

/// Algorithm-specific run parameters, already coerced to canonical ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    pub start_node: Option<NodeId>,
    pub source: Option<NodeId>,
    pub target: Option<NodeId>,
}

/// Renders a distance or weight for a node/edge label.
///
/// Infinity becomes `∞`, integral values drop the fraction and everything
/// else is rounded to two decimals.
pub fn format_number(value: f64) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{}", rounded)
}
