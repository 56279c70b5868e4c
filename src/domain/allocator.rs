//! Identifier allocator for new nodes.

use crate::domain::entities::NodeId;

/// Hands out strictly increasing node ids.
///
/// Not synchronized: the owner serializes access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    next: NodeId,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new(NodeId::FIRST)
    }
}

impl IdAllocator {
    pub fn new(seed: NodeId) -> Self {
        Self { next: seed }
    }

    /// Returns a fresh id, greater than every id returned since the last reset.
    ///
    /// # Panics
    /// When the `u64` id space is exhausted. Handing out a duplicate instead
    /// would break id uniqueness.
    pub fn allocate(&mut self) -> NodeId {
        let id = self.next;
        self.next = id.successor().expect("node id space exhausted");
        id
    }

    /// The id the next call to [`IdAllocator::allocate`] will return.
    pub fn peek(&self) -> NodeId {
        self.next
    }

    pub fn reset(&mut self, seed: NodeId) {
        self.next = seed;
    }
}
