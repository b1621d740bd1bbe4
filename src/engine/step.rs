// Visualization snapshots and the append-only recorder the engines write to
// Highlight maps are ordered by id so two runs over the same input serialize identically

use crate::engine::types::{Color, EdgeId, NodeId};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub highlight_nodes: BTreeMap<NodeId, Color>,
    pub highlight_edges: BTreeMap<EdgeId, Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_labels: Option<BTreeMap<NodeId, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_labels: Option<BTreeMap<EdgeId, String>>,
    pub description: String,
}

impl Step {
    pub fn builder(description: impl Into<String>) -> StepBuilder {
        StepBuilder {
            step: Step {
                highlight_nodes: BTreeMap::new(),
                highlight_edges: BTreeMap::new(),
                node_labels: None,
                edge_labels: None,
                description: description.into(),
            },
        }
    }

    /// A step that only carries narration.
    pub fn message(description: impl Into<String>) -> Self {
        Self::builder(description).build()
    }
}

/// Assembles one step. Painting an id twice keeps the higher-precedence
/// color (see [`Color`]), whatever order the calls come in.
#[derive(Debug, Clone)]
pub struct StepBuilder {
    step: Step,
}

impl StepBuilder {
    pub fn node(mut self, id: &NodeId, color: Color) -> Self {
        paint(&mut self.step.highlight_nodes, id, color);
        self
    }

    pub fn nodes<'a>(mut self, ids: impl IntoIterator<Item = &'a NodeId>, color: Color) -> Self {
        for id in ids {
            paint(&mut self.step.highlight_nodes, id, color);
        }
        self
    }

    pub fn edge(mut self, id: &EdgeId, color: Color) -> Self {
        paint(&mut self.step.highlight_edges, id, color);
        self
    }

    pub fn edges<'a>(mut self, ids: impl IntoIterator<Item = &'a EdgeId>, color: Color) -> Self {
        for id in ids {
            paint(&mut self.step.highlight_edges, id, color);
        }
        self
    }

    pub fn node_labels(mut self, labels: BTreeMap<NodeId, String>) -> Self {
        self.step.node_labels = Some(labels);
        self
    }

    pub fn edge_label(mut self, id: &EdgeId, label: impl Into<String>) -> Self {
        self.step
            .edge_labels
            .get_or_insert_with(BTreeMap::new)
            .insert(id.clone(), label.into());
        self
    }

    pub fn build(self) -> Step {
        self.step
    }
}

fn paint<K: Ord + Clone>(map: &mut BTreeMap<K, Color>, id: &K, color: Color) {
    map.entry(id.clone())
        .and_modify(|current| *current = (*current).max(color))
        .or_insert(color);
}

/// Full output of one algorithm run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trace {
    pub name: String,
    pub steps: Vec<Step>,
    pub truncated: bool,
    /// Set by the MST engines: whether the accepted edges span every node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spanning_complete: Option<bool>,
}

pub const TRUNCATION_MESSAGE: &str =
    "Step limit reached. The remaining steps of this run were not recorded.";

/// Append-only step log with a hard cap.
///
/// A trace that fits the cap exactly is kept whole. The first step offered
/// past the cap turns the last slot into a truncation marker, and everything
/// after it is ignored. Engines poll
/// [`Recorder::is_truncated`] at the top of their main loops.
#[derive(Debug)]
pub struct Recorder {
    steps: Vec<Step>,
    max_steps: usize,
    truncated: bool,
    spanning_complete: Option<bool>,
}

impl Recorder {
    pub fn new(max_steps: usize) -> Self {
        Self {
            steps: Vec::new(),
            max_steps: max_steps.max(1),
            truncated: false,
            spanning_complete: None,
        }
    }

    pub fn record(&mut self, step: Step) {
        if self.truncated {
            return;
        }
        if self.steps.len() >= self.max_steps {
            log::warn!("Step limit of {} reached, truncating trace", self.max_steps);
            self.steps.pop();
            self.steps.push(Step::message(TRUNCATION_MESSAGE));
            self.truncated = true;
            return;
        }
        self.steps.push(step);
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn set_spanning_complete(&mut self, complete: bool) {
        self.spanning_complete = Some(complete);
    }

    pub fn finish(self, name: impl Into<String>) -> Trace {
        Trace {
            name: name.into(),
            steps: self.steps,
            truncated: self.truncated,
            spanning_complete: self.spanning_complete,
        }
    }
}
