//! Domain entities: core data structures

use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::error::InvalidNodeId;
use crate::domain::locator::PreOrder;

/// Process-unique node identifier.
///
/// Backed by `NonZeroU64`, so an id is always strictly positive and can never
/// be confused with "no selection".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(NonZeroU64);

impl NodeId {
    /// The first id handed out for a seed forest.
    pub const FIRST: NodeId = NodeId(NonZeroU64::MIN);

    /// Returns `None` for zero.
    pub fn new(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }

    /// The next id up, or `None` once the id space is exhausted.
    pub(crate) fn successor(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NodeId {
    type Err = InvalidNodeId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .ok()
            .and_then(NodeId::new)
            .ok_or_else(|| InvalidNodeId(s.to_string()))
    }
}

/// Shared, immutable handle to a subtree.
///
/// Edits never mutate a node behind a `NodeRef`; they build a new node and a
/// new ancestor chain, so untouched subtrees can be shared between forests.
pub type NodeRef = Arc<Node>;

/// A named node owning an ordered sequence of children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    name: String,
    children: Vec<NodeRef>,
}

impl Node {
    /// Create a leaf node.
    pub fn new(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Builder-style helper appending owned children in order.
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children.into_iter().map(Arc::new));
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[NodeRef] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Copy of this node with `children` replacing its child sequence.
    pub(crate) fn with_child_refs(&self, children: Vec<NodeRef>) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            children,
        }
    }

    /// Copy of this node with `child` appended after the existing children.
    pub(crate) fn with_appended(&self, child: NodeRef) -> Self {
        let mut children = Vec::with_capacity(self.children.len() + 1);
        children.extend(self.children.iter().cloned());
        children.push(child);
        self.with_child_refs(children)
    }

    /// Copy of this node carrying a new name. Children are shared.
    pub(crate) fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            id: self.id,
            name: name.into(),
            children: self.children.clone(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.id)
    }
}

/// Ordered sequence of root-level nodes.
///
/// Cloning a forest is cheap: only the root handles are copied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forest {
    roots: Vec<NodeRef>,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a forest from owned roots.
    ///
    /// Id uniqueness across the given nodes is the caller's responsibility;
    /// see [`Forest::has_unique_ids`].
    pub fn from_roots(roots: impl IntoIterator<Item = Node>) -> Self {
        Self {
            roots: roots.into_iter().map(Arc::new).collect(),
        }
    }

    pub(crate) fn from_refs(roots: Vec<NodeRef>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[NodeRef] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes at every depth.
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Depth-first, pre-order walk yielding `(depth, node)`; roots are depth 0.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder::new(self)
    }

    pub fn ids(&self) -> Vec<NodeId> {
        self.iter().map(|(_, node)| node.id()).collect()
    }

    pub fn has_unique_ids(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        self.iter().all(|(_, node)| seen.insert(node.id()))
    }
}
