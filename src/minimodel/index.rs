//! Parent/child index over a program tree.
//!
//! Groups own their children and never point back up. When a consumer needs
//! to go upwards (the parent of a group, its depth) it builds a [`GroupIndex`]
//! once and asks it, instead of the tree.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use super::group::{make_unique_id, Group};
use crate::ids::UniqueGroupID;

/// Directed graph of unique group ids, edges running parent → child and
/// weighted by the child's position in its parent.
///
/// # Invariants
///
/// - every node has at most one incoming edge
/// - a unique id appears at most once; on duplicates the first group met in
///   depth-first order is indexed, matching [`Program::get_group`](super::Program::get_group),
///   and the later subtree is skipped
#[derive(Debug, Clone)]
pub struct GroupIndex {
    graph: DiGraph<UniqueGroupID, usize>,
    node_by_id: HashMap<UniqueGroupID, NodeIndex>,
    root: NodeIndex,
}

impl GroupIndex {
    pub fn build(root: &Group) -> Self {
        let mut graph = DiGraph::new();
        let mut node_by_id = HashMap::new();
        let root_node = graph.add_node(root.unique_id().clone());
        node_by_id.insert(root.unique_id().clone(), root_node);

        let mut index = Self {
            graph,
            node_by_id,
            root: root_node,
        };
        index.add_children(root, root_node);
        index
    }

    fn add_children(&mut self, group: &Group, parent: NodeIndex) {
        for (position, child) in group.subgroups().iter().enumerate() {
            if self.node_by_id.contains_key(child.unique_id()) {
                log::warn!(
                    "duplicate group {} under {}; keeping the first occurrence",
                    child.unique_id(),
                    group.unique_id()
                );
                continue;
            }
            let node = self.graph.add_node(child.unique_id().clone());
            self.node_by_id.insert(child.unique_id().clone(), node);
            self.graph.add_edge(parent, node, position);
            self.add_children(child, node);
        }
    }

    pub fn root(&self) -> &UniqueGroupID {
        &self.graph[self.root]
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, id: &UniqueGroupID) -> bool {
        self.node_by_id.contains_key(id)
    }

    fn parent_node(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(node, Direction::Incoming)
            .next()
    }

    /// The parent of `id`, or `None` for the root and unknown ids.
    pub fn parent_of(&self, id: &UniqueGroupID) -> Option<&UniqueGroupID> {
        let node = *self.node_by_id.get(id)?;
        self.parent_node(node).map(|p| &self.graph[p])
    }

    /// Position of `id` within its parent's children.
    pub fn position_of(&self, id: &UniqueGroupID) -> Option<usize> {
        let node = *self.node_by_id.get(id)?;
        self.graph
            .edges_directed(node, Direction::Incoming)
            .next()
            .map(|e| *e.weight())
    }

    /// Number of edges between the root and `id`; the root has depth 0.
    pub fn depth_of(&self, id: &UniqueGroupID) -> Option<usize> {
        let mut node = *self.node_by_id.get(id)?;
        let mut depth = 0;
        while let Some(parent) = self.parent_node(node) {
            node = parent;
            depth += 1;
        }
        Some(depth)
    }

    /// Direct children of `id`, in order.
    pub fn children_of(&self, id: &UniqueGroupID) -> Vec<&UniqueGroupID> {
        let Some(&node) = self.node_by_id.get(id) else {
            return Vec::new();
        };
        let mut children: Vec<(usize, NodeIndex)> = self
            .graph
            .edges_directed(node, Direction::Outgoing)
            .map(|e| (*e.weight(), e.target()))
            .collect();
        children.sort_unstable();
        children.into_iter().map(|(_, n)| &self.graph[n]).collect()
    }

    /// Resolves a group's declared `parent_id` to an indexed unique id.
    ///
    /// Returns `None` when the group declares no parent or the parent is not
    /// part of this tree.
    pub fn declared_parent(&self, group: &Group) -> Option<&UniqueGroupID> {
        let parent = make_unique_id(group.parent_id()?, group.program_id());
        let node = *self.node_by_id.get(&parent)?;
        Some(&self.graph[node])
    }
}
