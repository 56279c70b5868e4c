//! Seed forest: the fixed value a session starts from and resets to.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Forest, Node, NodeId};

/// Shape of a seed node as written in configuration.
///
/// Ids are not configurable; they are assigned in pre-order starting at 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn branch(name: impl Into<String>, children: Vec<NodeSpec>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }
}

/// `Node 1 > Node 2 > {Node 3, Node 4, Node 5}`
pub fn default_seed() -> Vec<NodeSpec> {
    vec![NodeSpec::branch(
        "Node 1",
        vec![NodeSpec::branch(
            "Node 2",
            vec![
                NodeSpec::leaf("Node 3"),
                NodeSpec::leaf("Node 4"),
                NodeSpec::leaf("Node 5"),
            ],
        )],
    )]
}

/// A materialized seed forest plus the first id free after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    forest: Forest,
    next_id: NodeId,
}

impl Default for Seed {
    fn default() -> Self {
        Self::from_specs(&default_seed())
    }
}

impl Seed {
    pub fn from_specs(specs: &[NodeSpec]) -> Self {
        let mut next_id = NodeId::FIRST;
        let roots: Vec<Node> = specs
            .iter()
            .map(|spec| build_node(spec, &mut next_id))
            .collect();
        Self {
            forest: Forest::from_roots(roots),
            next_id,
        }
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn next_id(&self) -> NodeId {
        self.next_id
    }
}

fn build_node(spec: &NodeSpec, next_id: &mut NodeId) -> Node {
    let id = *next_id;
    // a seed would need u64::MAX nodes to get here
    *next_id = id.successor().expect("node id space exhausted");
    let children: Vec<Node> = spec
        .children
        .iter()
        .map(|child| build_node(child, next_id))
        .collect();
    Node::new(id, spec.name.clone()).with_children(children)
}
