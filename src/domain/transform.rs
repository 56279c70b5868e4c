//! Tree transformer: copy-on-write structural edits.
//!
//! Every operation borrows the current forest and returns a new one. Only the
//! path from an edit site up to its root is rebuilt; every other subtree is
//! shared with the input by reference.

use std::sync::Arc;

use tracing::{instrument, trace};

use crate::domain::entities::{Forest, Node, NodeId, NodeRef};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::seed::Seed;

/// Append `node` under `parent`, or to the root sequence when `parent` is `None`.
#[instrument(level = "trace", skip(forest, node), fields(new_id = %node.id()))]
pub fn insert(forest: &Forest, parent: Option<NodeId>, node: Node) -> DomainResult<Forest> {
    let node = Arc::new(node);
    match parent {
        None => {
            let mut roots = Vec::with_capacity(forest.roots().len() + 1);
            roots.extend(forest.roots().iter().cloned());
            roots.push(node);
            Ok(Forest::from_refs(roots))
        }
        Some(parent_id) => edit(forest, parent_id, |target| {
            Some(target.with_appended(Arc::clone(&node)))
        }),
    }
}

/// Replace the name of node `id`. Its subtree is shared unchanged.
#[instrument(level = "trace", skip(forest))]
pub fn update(forest: &Forest, id: NodeId, rename_to: &str) -> DomainResult<Forest> {
    edit(forest, id, |target| Some(target.renamed(rename_to)))
}

/// Remove node `id` together with its entire subtree.
#[instrument(level = "trace", skip(forest))]
pub fn delete(forest: &Forest, id: NodeId) -> DomainResult<Forest> {
    edit(forest, id, |_| None)
}

/// The seed forest. Nodes are immutable, so sharing the seed's subtrees with
/// the returned value cannot affect later resets.
pub fn reset(seed: &Seed) -> Forest {
    seed.forest().clone()
}

fn edit<F>(forest: &Forest, id: NodeId, mut apply: F) -> DomainResult<Forest>
where
    F: FnMut(&Node) -> Option<Node>,
{
    rebuild(forest.roots(), id, &mut apply)
        .map(Forest::from_refs)
        .ok_or(DomainError::NotFound(id))
}

/// Rebuild `nodes` with `apply` run on every node whose id is `id`.
///
/// `apply` returning `None` drops the node. A matched node is not descended
/// into. Returns `None` when nothing in `nodes` or below matched, in which case
/// the caller keeps its own handles.
fn rebuild<F>(nodes: &[NodeRef], id: NodeId, apply: &mut F) -> Option<Vec<NodeRef>>
where
    F: FnMut(&Node) -> Option<Node>,
{
    let mut changed = false;
    let mut rebuilt = Vec::with_capacity(nodes.len());
    for node in nodes {
        if node.id() == id {
            changed = true;
            if let Some(replacement) = apply(&**node) {
                rebuilt.push(Arc::new(replacement));
            }
            continue;
        }
        match rebuild(node.children(), id, apply) {
            Some(children) => {
                trace!(ancestor = %node.id(), "rebuilding");
                changed = true;
                rebuilt.push(Arc::new(node.with_child_refs(children)));
            }
            None => rebuilt.push(Arc::clone(node)),
        }
    }
    changed.then_some(rebuilt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::locator::locate;

    fn id(raw: u64) -> NodeId {
        NodeId::new(raw).unwrap()
    }

    fn child_ids(forest: &Forest, parent: u64) -> Vec<u64> {
        locate(forest, id(parent))
            .unwrap()
            .node
            .children()
            .iter()
            .map(|c| c.id().get())
            .collect()
    }

    #[test]
    fn test_insert_at_root_appends() {
        let seed = Seed::default();
        let forest = insert(seed.forest(), None, Node::new(id(6), "X")).unwrap();
        let roots: Vec<_> = forest.roots().iter().map(|r| r.id().get()).collect();
        assert_eq!(roots, vec![1, 6]);
        assert!(Arc::ptr_eq(&forest.roots()[0], &seed.forest().roots()[0]));
    }

    #[test]
    fn test_insert_under_leaf_creates_children() {
        let seed = Seed::default();
        let forest = insert(seed.forest(), Some(id(4)), Node::new(id(6), "X")).unwrap();
        assert_eq!(child_ids(&forest, 4), vec![6]);
        // siblings of the edited leaf are shared
        let old = locate(seed.forest(), id(3)).unwrap().node;
        let new = locate(&forest, id(3)).unwrap().node;
        assert!(Arc::ptr_eq(old, new));
    }

    #[test]
    fn test_insert_missing_parent() {
        let seed = Seed::default();
        let result = insert(seed.forest(), Some(id(42)), Node::new(id(6), "X"));
        assert_eq!(result, Err(DomainError::NotFound(id(42))));
    }

    #[test]
    fn test_update_keeps_subtree() {
        let seed = Seed::default();
        let forest = update(seed.forest(), id(2), "renamed").unwrap();
        let old = locate(seed.forest(), id(2)).unwrap().node;
        let new = locate(&forest, id(2)).unwrap().node;
        assert_eq!(new.name(), "renamed");
        assert_eq!(old.name(), "Node 2");
        for (a, b) in old.children().iter().zip(new.children()) {
            assert!(Arc::ptr_eq(a, b));
        }
    }

    #[test]
    fn test_delete_last_child_leaves_empty_sequence() {
        let seed = Seed::default();
        let forest = delete(seed.forest(), id(2)).unwrap();
        let root = locate(&forest, id(1)).unwrap().node;
        assert!(root.children().is_empty());
        assert!(root.is_leaf());
    }

    #[test]
    fn test_delete_middle_preserves_order() {
        let seed = Seed::default();
        let forest = delete(seed.forest(), id(4)).unwrap();
        assert_eq!(child_ids(&forest, 2), vec![3, 5]);
    }

    #[test]
    fn test_delete_root() {
        let seed = Seed::default();
        let forest = delete(seed.forest(), id(1)).unwrap();
        assert!(forest.is_empty());
    }

    #[test]
    fn test_missing_target_is_not_found() {
        let seed = Seed::default();
        assert_eq!(update(seed.forest(), id(9), "x"), Err(DomainError::NotFound(id(9))));
        assert_eq!(delete(seed.forest(), id(9)), Err(DomainError::NotFound(id(9))));
        assert_eq!(delete(&Forest::new(), id(1)), Err(DomainError::NotFound(id(1))));
    }

    #[test]
    fn test_reset_returns_seed() {
        let seed = Seed::default();
        assert_eq!(&reset(&seed), seed.forest());
    }
}
