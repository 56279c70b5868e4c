//! Selection tracker: at most one selected node.

use tracing::trace;

use crate::domain::entities::{Forest, NodeId};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::locator::contains;

/// `Unselected` or `Selected(id)`, where `id` exists in the current forest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Unselected,
    Selected(NodeId),
}

impl Selection {
    pub fn current(&self) -> Option<NodeId> {
        match self {
            Selection::Unselected => None,
            Selection::Selected(id) => Some(*id),
        }
    }

    pub fn is_selected(&self, id: NodeId) -> bool {
        self.current() == Some(id)
    }

    /// Select `id`, or clear the selection with `None`.
    ///
    /// Selecting an id absent from `forest` fails and leaves the state as it was.
    pub fn select(&mut self, forest: &Forest, id: Option<NodeId>) -> DomainResult<()> {
        match id {
            None => self.clear(),
            Some(id) if contains(forest, id) => *self = Selection::Selected(id),
            Some(id) => return Err(DomainError::NotFound(id)),
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Selection::Unselected;
    }

    /// Revalidate against a changed forest.
    ///
    /// Clears the selection when the selected node is gone (deleted directly or
    /// as part of an ancestor's subtree). Returns `true` if it was cleared.
    pub fn on_forest_changed(&mut self, forest: &Forest) -> bool {
        match self.current() {
            Some(id) if !contains(forest, id) => {
                trace!(%id, "selected node removed, clearing selection");
                self.clear();
                true
            }
            _ => false,
        }
    }
}
