//! Ordered n-ary tree of named nodes.
//!
//! Both backends describe a directory hierarchy as a [`Tree`] before it is
//! rendered. Nodes live in an arena owned by the tree and refer to their
//! children through [`NodeId`] handles, so dropping the tree releases every
//! node and name at once.

use std::fmt;

/// Handle to a node of a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A single node: an optional name and its ordered children.
#[derive(Debug, Default)]
pub struct TreeNode {
    name: Option<String>,
    children: Vec<NodeId>,
}

impl TreeNode {
    /// Returns the node's name; `None` only for the synthetic root.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the node's children in insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

/// Arena-backed tree with an unnamed root.
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<TreeNode>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Creates a tree holding only the unnamed root.
    pub fn new() -> Self {
        Self {
            nodes: vec![TreeNode::default()],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Appends a new node named `name` as the last child of `parent`.
    ///
    /// # Panics
    /// Panics if `parent` does not belong to this tree.
    pub fn add_child(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode {
            name: Some(name.into()),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Returns the node behind `id`.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    /// Number of named nodes, i.e. every node except the root.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every node except the root.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[0].children.clear();
    }

    /// Visits every named node in pre-order, yielding its depth (1 for the
    /// root's children) and name.
    pub fn walk(&self) -> Vec<(usize, &str)> {
        let mut out = Vec::with_capacity(self.len());
        let mut pending: Vec<(NodeId, usize)> = self
            .node(self.root())
            .children
            .iter()
            .rev()
            .map(|&id| (id, 1))
            .collect();

        while let Some((id, depth)) = pending.pop() {
            let node = self.node(id);
            if let Some(name) = node.name() {
                out.push((depth, name));
            }
            pending.extend(node.children.iter().rev().map(|&child| (child, depth + 1)));
        }

        out
    }
}

/// Renders one row per node: `(depth - 1)` continuation bars, a branch marker
/// and the node name.
impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, name) in self.walk() {
            writeln!(f, "{}├── {}", "│   ".repeat(depth - 1), name)?;
        }
        Ok(())
    }
}
