// Disjoint set union over node ids, used by Kruskal for cycle checks

use crate::engine::types::NodeId;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: HashMap<NodeId, NodeId>,
    components: usize,
}

impl UnionFind {
    /// Creates one singleton set per id.
    pub fn new<'a>(ids: impl IntoIterator<Item = &'a NodeId>) -> Self {
        let parent: HashMap<NodeId, NodeId> =
            ids.into_iter().map(|id| (id.clone(), id.clone())).collect();
        let components = parent.len();
        Self { parent, components }
    }

    /// Returns the representative of `id`, or `None` if the id is unknown.
    ///
    /// Walks to the root first, then rewrites every node on the walked chain
    /// to point directly at it.
    pub fn find(&mut self, id: &str) -> Option<NodeId> {
        let mut root = self.parent.get_key_value(id)?.0.clone();
        loop {
            let parent = &self.parent[&root];
            if *parent == root {
                break;
            }
            root = parent.clone();
        }

        let mut node = NodeId::from(id);
        while node != root {
            let Some(slot) = self.parent.get_mut(&node) else {
                break;
            };
            node = std::mem::replace(slot, root.clone());
        }

        Some(root)
    }

    /// Merges the sets of `a` and `b`.
    ///
    /// Returns `false` without mutating anything when both already share a
    /// root (the edge would close a cycle) or when either id is unknown.
    pub fn union(&mut self, a: &str, b: &str) -> bool {
        let (Some(root_a), Some(root_b)) = (self.find(a), self.find(b)) else {
            return false;
        };
        if root_a == root_b {
            return false;
        }
        self.parent.insert(root_a, root_b);
        self.components -= 1;
        true
    }

    pub fn component_count(&self) -> usize {
        self.components
    }
}
