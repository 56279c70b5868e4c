//! Domain layer: the tree-mutation engine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).
//! Every edit is a pure function from a borrowed forest to a new forest.

pub mod allocator;
pub mod entities;
pub mod error;
pub mod locator;
pub mod seed;
pub mod selection;
pub mod transform;

pub use allocator::IdAllocator;
pub use entities::{Forest, Node, NodeId, NodeRef};
pub use error::{DomainError, DomainResult, InvalidNodeId};
pub use locator::{contains, locate, subtree_ids, Located, PreOrder};
pub use seed::{default_seed, NodeSpec, Seed};
pub use selection::Selection;
