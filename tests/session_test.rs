//! Tests for EditorSession: selection tracking, reset and the caller contract

use rstest::{fixture, rstest};

use treedit::application::{ApplicationError, EditorSession};
use treedit::domain::{DomainError, Forest, Node, NodeId, NodeSpec, Seed, Selection};
use treedit::util::testing;

fn id(raw: u64) -> NodeId {
    NodeId::new(raw).unwrap()
}

#[fixture]
fn session() -> EditorSession {
    testing::init_test_setup();
    EditorSession::default()
}

fn child_ids(session: &EditorSession, parent: u64) -> Vec<u64> {
    session
        .find(id(parent))
        .unwrap()
        .node
        .children()
        .iter()
        .map(|c| c.id().get())
        .collect()
}

// ============================================================
// Concrete walk-through
// ============================================================

#[rstest]
fn given_seed_when_select_add_delete_reset_then_matches_expected_states(
    mut session: EditorSession,
) {
    // Select 2 and add X
    session.select(id(2)).unwrap();
    let new_id = session.add("X").unwrap();
    assert_eq!(new_id, id(6));
    assert_eq!(child_ids(&session, 2), vec![3, 4, 5, 6]);
    assert_eq!(session.find(id(6)).unwrap().node.name(), "X");
    assert_eq!(session.selection(), Selection::Selected(id(2)));

    // Delete 2
    session.remove().unwrap();
    let expected = Forest::from_roots([Node::new(id(1), "Node 1")]);
    assert_eq!(session.forest(), &expected);
    assert_eq!(session.selection(), Selection::Unselected);

    // Reset
    session.reset();
    assert_eq!(session.forest(), Seed::default().forest());
    assert_eq!(session.next_id(), id(6));
    assert_eq!(session.selection(), Selection::Unselected);
}

// ============================================================
// Selection state machine
// ============================================================

#[rstest]
fn given_selected_when_deleting_selected_then_unselected(mut session: EditorSession) {
    session.select(id(4)).unwrap();
    session.remove_node(id(4)).unwrap();
    assert_eq!(session.selection(), Selection::Unselected);
}

#[rstest]
fn given_selected_when_deleting_ancestor_then_unselected(mut session: EditorSession) {
    session.select(id(5)).unwrap();
    session.remove_node(id(1)).unwrap();
    assert_eq!(session.selection(), Selection::Unselected);
    assert!(session.forest().is_empty());
}

#[rstest]
#[case(3)]
#[case(5)]
fn given_selected_when_deleting_other_then_selection_kept(
    mut session: EditorSession,
    #[case] other: u64,
) {
    session.select(id(4)).unwrap();
    session.remove_node(id(other)).unwrap();
    assert_eq!(session.selection(), Selection::Selected(id(4)));
}

#[rstest]
fn given_selected_when_renaming_or_adding_then_selection_kept(mut session: EditorSession) {
    session.select(id(3)).unwrap();
    session.rename("three").unwrap();
    let child = session.add("child").unwrap();
    assert_eq!(session.selection(), Selection::Selected(id(3)));
    assert_eq!(session.find(child).unwrap().parent_id(), Some(id(3)));
}

#[rstest]
fn given_selected_when_reset_then_unselected(mut session: EditorSession) {
    session.select(id(2)).unwrap();
    session.reset();
    assert_eq!(session.selection(), Selection::Unselected);
}

#[rstest]
fn given_selected_when_deselecting_then_add_goes_to_root(mut session: EditorSession) {
    session.select(id(2)).unwrap();
    session.deselect();
    let new_id = session.add("top").unwrap();
    assert!(session.find(new_id).unwrap().parent.is_none());
    assert_eq!(session.forest().roots().len(), 2);
}

// ============================================================
// Reset restores seed and id counter
// ============================================================

#[rstest]
fn given_many_edits_when_reset_then_next_add_matches_fresh_run(mut session: EditorSession) {
    let mut fresh = EditorSession::default();
    let fresh_id = fresh.add("n").unwrap();

    for name in ["a", "b", "c"] {
        session.add(name).unwrap();
    }
    session.select(id(2)).unwrap();
    session.rename("changed").unwrap();
    session.remove().unwrap();

    session.reset();
    assert_eq!(session.forest(), session.seed().forest());
    assert_eq!(session.add("n").unwrap(), fresh_id);
    assert_eq!(session.forest(), fresh.forest());
}

// ============================================================
// Caller contract
// ============================================================

#[rstest]
#[case("")]
#[case("   ")]
#[case("\t\n")]
fn given_blank_name_when_adding_then_rejected_and_nothing_changes(
    mut session: EditorSession,
    #[case] name: &str,
) {
    let before = session.forest().clone();
    assert_eq!(session.add(name), Err(ApplicationError::EmptyName));
    assert_eq!(session.forest(), &before);
    assert_eq!(session.next_id(), id(6));
}

#[rstest]
fn given_missing_node_when_selecting_then_not_found(mut session: EditorSession) {
    assert_eq!(
        session.select(id(42)),
        Err(ApplicationError::Domain(DomainError::NotFound(id(42))))
    );
}

#[rstest]
fn given_custom_seed_when_resetting_then_custom_seed_restored() {
    let seed = Seed::from_specs(&[NodeSpec::leaf("alpha"), NodeSpec::leaf("beta")]);
    let mut session = EditorSession::new(seed.clone());
    assert_eq!(session.next_id(), id(3));

    session.remove_node(id(1)).unwrap();
    session.add("gamma").unwrap();
    session.reset();

    assert_eq!(session.forest(), seed.forest());
    assert_eq!(session.next_id(), id(3));
}

#[rstest]
fn given_empty_seed_when_adding_then_first_id_is_one() {
    let mut session = EditorSession::new(Seed::from_specs(&[]));
    assert_eq!(session.add("first").unwrap(), id(1));
}
