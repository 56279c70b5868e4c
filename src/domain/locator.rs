//! Tree locator: depth-first, pre-order lookup by id.
//!
//! A node is tested before its children are descended into. Since ids are
//! unique, the traversal order only affects cost, never the result.

use tracing::instrument;

use crate::domain::entities::{Forest, Node, NodeId, NodeRef};

/// A located node together with its structural context.
#[derive(Debug, Clone, Copy)]
pub struct Located<'a> {
    pub node: &'a NodeRef,
    /// `None` for root-level nodes
    pub parent: Option<&'a NodeRef>,
    /// The sibling sequence owning `node` (the root sequence or the parent's children)
    pub siblings: &'a [NodeRef],
    /// Position of `node` within `siblings`
    pub index: usize,
}

impl Located<'_> {
    pub fn parent_id(&self) -> Option<NodeId> {
        self.parent.map(|parent| parent.id())
    }
}

#[instrument(level = "trace", skip(forest))]
pub fn locate(forest: &Forest, id: NodeId) -> Option<Located<'_>> {
    locate_in(forest.roots(), None, id)
}

fn locate_in<'a>(
    nodes: &'a [NodeRef],
    parent: Option<&'a NodeRef>,
    id: NodeId,
) -> Option<Located<'a>> {
    for (index, node) in nodes.iter().enumerate() {
        if node.id() == id {
            return Some(Located {
                node,
                parent,
                siblings: nodes,
                index,
            });
        }
        if let Some(found) = locate_in(node.children(), Some(node), id) {
            return Some(found);
        }
    }
    None
}

pub fn contains(forest: &Forest, id: NodeId) -> bool {
    locate(forest, id).is_some()
}

/// Ids of `node` and all of its descendants, in pre-order.
pub fn subtree_ids(node: &Node) -> Vec<NodeId> {
    let mut ids = vec![node.id()];
    let mut stack: Vec<&NodeRef> = node.children().iter().rev().collect();
    while let Some(current) = stack.pop() {
        ids.push(current.id());
        stack.extend(current.children().iter().rev());
    }
    ids
}

/// Pre-order iterator over a forest, yielding `(depth, node)`.
pub struct PreOrder<'a> {
    stack: Vec<(usize, &'a NodeRef)>,
}

impl<'a> PreOrder<'a> {
    pub(crate) fn new(forest: &'a Forest) -> Self {
        // Push in reverse order for left-to-right traversal
        let stack = forest.roots().iter().rev().map(|root| (0, root)).collect();
        Self { stack }
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        for child in node.children().iter().rev() {
            self.stack.push((depth + 1, child));
        }
        Some((depth, &**node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed::Seed;

    fn id(raw: u64) -> NodeId {
        NodeId::new(raw).unwrap()
    }

    #[test]
    fn test_locate_root_has_no_parent() {
        let seed = Seed::default();
        let found = locate(seed.forest(), id(1)).unwrap();
        assert_eq!(found.node.name(), "Node 1");
        assert!(found.parent.is_none());
        assert_eq!(found.siblings.len(), 1);
        assert_eq!(found.index, 0);
    }

    #[test]
    fn test_locate_nested_reports_owning_sequence() {
        let seed = Seed::default();
        let found = locate(seed.forest(), id(4)).unwrap();
        assert_eq!(found.parent_id(), Some(id(2)));
        assert_eq!(found.index, 1);
        let sibling_ids: Vec<_> = found.siblings.iter().map(|n| n.id().get()).collect();
        assert_eq!(sibling_ids, vec![3, 4, 5]);
    }

    #[test]
    fn test_locate_missing() {
        let seed = Seed::default();
        assert!(locate(seed.forest(), id(99)).is_none());
        assert!(!contains(seed.forest(), id(99)));
        assert!(locate(&Forest::new(), id(1)).is_none());
    }

    #[test]
    fn test_pre_order_depths() {
        let seed = Seed::default();
        let walk: Vec<_> = seed
            .forest()
            .iter()
            .map(|(depth, node)| (depth, node.id().get()))
            .collect();
        assert_eq!(walk, vec![(0, 1), (1, 2), (2, 3), (2, 4), (2, 5)]);
    }

    #[test]
    fn test_subtree_ids() {
        let seed = Seed::default();
        let node_2 = locate(seed.forest(), id(2)).unwrap().node;
        let ids: Vec<_> = subtree_ids(node_2).into_iter().map(NodeId::get).collect();
        assert_eq!(ids, vec![2, 3, 4, 5]);
    }
}
