//! Editing session service
//!
//! Owns the forest, the selection and the id allocator, and applies each
//! edit to all three as one step.

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    locate, transform, Forest, IdAllocator, Located, Node, NodeId, Seed, Selection,
};

/// Single-writer editing state.
///
/// Not synchronized: embed it behind a mutex or a single owning task if edits
/// arrive from more than one thread.
#[derive(Debug, Clone)]
pub struct EditorSession {
    seed: Seed,
    forest: Forest,
    selection: Selection,
    ids: IdAllocator,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(Seed::default())
    }
}

impl EditorSession {
    /// Create a session positioned at `seed`.
    pub fn new(seed: Seed) -> Self {
        let forest = transform::reset(&seed);
        let ids = IdAllocator::new(seed.next_id());
        Self {
            seed,
            forest,
            selection: Selection::Unselected,
            ids,
        }
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    /// Id the next added node will receive.
    pub fn next_id(&self) -> NodeId {
        self.ids.peek()
    }

    pub fn find(&self, id: NodeId) -> Option<Located<'_>> {
        locate(&self.forest, id)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn select(&mut self, id: NodeId) -> ApplicationResult<()> {
        self.selection
            .select(&self.forest, Some(id))
            .map_err(|e| {
                debug!("select: {}", e);
                ApplicationError::from(e)
            })
    }

    pub fn deselect(&mut self) {
        self.selection.clear();
    }

    /// Add a node named `name` under the selected node, or at root level when
    /// nothing is selected. Returns the new node's id.
    #[instrument(level = "debug", skip(self))]
    pub fn add(&mut self, name: &str) -> ApplicationResult<NodeId> {
        let name = validate_name(name)?;
        let parent = self.selection.current();
        let id = self.ids.allocate();
        self.forest = transform::insert(&self.forest, parent, Node::new(id, name))?;
        debug!("add: {} under {:?}", id, parent);
        Ok(id)
    }

    /// Rename the selected node. The selection is kept.
    #[instrument(level = "debug", skip(self))]
    pub fn rename(&mut self, name: &str) -> ApplicationResult<NodeId> {
        let name = validate_name(name)?;
        let id = self.selected()?;
        self.forest = transform::update(&self.forest, id, name)?;
        Ok(id)
    }

    /// Remove the selected node with its subtree and clear the selection.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self) -> ApplicationResult<NodeId> {
        let id = self.selected()?;
        self.forest = transform::delete(&self.forest, id)?;
        self.selection.clear();
        Ok(id)
    }

    /// Remove an arbitrary node with its subtree.
    ///
    /// The selection is cleared only if it pointed into the removed subtree.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_node(&mut self, id: NodeId) -> ApplicationResult<()> {
        let forest = transform::delete(&self.forest, id).map_err(|e| {
            debug!("remove_node: {}", e);
            ApplicationError::from(e)
        })?;
        self.forest = forest;
        if self.selection.on_forest_changed(&self.forest) {
            debug!("remove_node: selection cleared");
        }
        Ok(())
    }

    /// Restore the seed forest, clear the selection and rearm the id counter.
    #[instrument(level = "debug", skip(self))]
    pub fn reset(&mut self) {
        self.forest = transform::reset(&self.seed);
        self.selection.clear();
        self.ids.reset(self.seed.next_id());
    }

    fn selected(&self) -> ApplicationResult<NodeId> {
        self.selection
            .current()
            .ok_or(ApplicationError::NothingSelected)
    }
}

/// Names must contain something other than whitespace. Surrounding
/// whitespace is trimmed.
fn validate_name(name: &str) -> ApplicationResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ApplicationError::EmptyName);
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    fn id(raw: u64) -> NodeId {
        NodeId::new(raw).unwrap()
    }

    #[test]
    fn test_add_without_selection_goes_to_root() {
        let mut session = EditorSession::default();
        let new_id = session.add("top").unwrap();
        assert_eq!(new_id, id(6));
        assert_eq!(session.forest().roots().len(), 2);
        assert!(session.find(new_id).unwrap().parent.is_none());
    }

    #[test]
    fn test_empty_name_rejected_without_consuming_id() {
        let mut session = EditorSession::default();
        assert_eq!(session.add("   "), Err(ApplicationError::EmptyName));
        assert_eq!(session.next_id(), id(6));
        assert_eq!(session.forest(), session.seed().forest());
    }

    #[test]
    fn test_rename_requires_selection() {
        let mut session = EditorSession::default();
        assert_eq!(session.rename("x"), Err(ApplicationError::NothingSelected));
        assert_eq!(session.remove(), Err(ApplicationError::NothingSelected));
    }

    #[test]
    fn test_rename_trims_and_keeps_selection() {
        let mut session = EditorSession::default();
        session.select(id(3)).unwrap();
        session.rename("  three ").unwrap();
        assert_eq!(session.find(id(3)).unwrap().node.name(), "three");
        assert_eq!(session.selection(), Selection::Selected(id(3)));
    }

    #[test]
    fn test_select_missing_node() {
        let mut session = EditorSession::default();
        assert_eq!(
            session.select(id(50)),
            Err(ApplicationError::Domain(DomainError::NotFound(id(50))))
        );
        assert_eq!(session.selection(), Selection::Unselected);
    }

    #[test]
    fn test_remove_node_missing_is_noop() {
        let mut session = EditorSession::default();
        session.select(id(2)).unwrap();
        let before = session.forest().clone();
        assert!(session.remove_node(id(99)).is_err());
        assert_eq!(session.forest(), &before);
        assert_eq!(session.selection(), Selection::Selected(id(2)));
    }
}
