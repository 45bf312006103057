#![forbid(unsafe_code)]

use sl_core::ids::NodeId;
use sl_core::model::NodeKind;
use sl_storage::{InsertChildRequest, SqliteStore, StoreError};

fn store() -> SqliteStore {
    SqliteStore::open_in_memory().expect("open store")
}

fn insert(store: &mut SqliteStore, parent: NodeId, kind: NodeKind, index: usize, title: &str) -> NodeId {
    store
        .tree_insert_child_before(InsertChildRequest::new(parent, kind, index, title))
        .expect("insert child")
}

fn titles(store: &SqliteStore, parent: NodeId, kind: NodeKind) -> Vec<String> {
    store
        .tree_children(parent, kind)
        .expect("children")
        .into_iter()
        .map(|row| row.title)
        .collect()
}

fn assert_contiguous(store: &SqliteStore, parent: NodeId, kind: NodeKind) {
    let children = store.tree_children(parent, kind).expect("children");
    for (position, child) in children.iter().enumerate() {
        assert_eq!(child.order_index, position, "gap under {parent} for {kind}");
        assert_eq!(store.tree_index_of(child.id).expect("index of"), position);
    }
    assert_eq!(store.tree_child_count(parent, kind).expect("count"), children.len());
}

#[test]
fn novel_root_is_a_parentless_sentinel() {
    let store = store();
    let root = store.tree_root().expect("root");
    let row = store.tree_node(root).expect("root row");
    assert_eq!(row.kind, NodeKind::Novel);
    assert_eq!(row.parent, None);
    assert_eq!(store.tree_parent_of(root).expect("parent"), None);
    assert_eq!(store.tree_index_of(root).expect("index"), 0);
    assert_eq!(store.tree_child_count(root, NodeKind::Volume).expect("count"), 0);
}

#[test]
fn insert_validates_parent_child_types() {
    let mut store = store();
    let root = store.tree_root().expect("root");
    let volume = insert(&mut store, root, NodeKind::Volume, 0, "Book One");

    let err = store
        .tree_insert_child_before(InsertChildRequest::new(root, NodeKind::Chapter, 0, "stray"))
        .expect_err("chapter under novel");
    assert!(matches!(err, StoreError::TypeMismatch { .. }), "{err:?}");

    let err = store
        .tree_insert_child_before(InsertChildRequest::new(volume, NodeKind::Keypoint, 0, "stray"))
        .expect_err("keypoint under volume");
    assert!(matches!(err, StoreError::TypeMismatch { .. }), "{err:?}");

    let err = store
        .tree_child_count(volume, NodeKind::Volume)
        .expect_err("volume under volume");
    assert!(matches!(err, StoreError::TypeMismatch { .. }), "{err:?}");

    let block = insert(&mut store, volume, NodeKind::Storyblock, 0, "Opening");
    let beat = insert(&mut store, block, NodeKind::Keypoint, 0, "Hook");
    assert_eq!(store.tree_parent_of(beat).expect("parent"), Some(block));
    assert_eq!(store.tree_parent_of(block).expect("parent"), Some(volume));
}

#[test]
fn insert_shifts_later_siblings_and_clamps_to_append() {
    let mut store = store();
    let root = store.tree_root().expect("root");
    let volume = insert(&mut store, root, NodeKind::Volume, 0, "Book One");

    insert(&mut store, volume, NodeKind::Chapter, 0, "A");
    insert(&mut store, volume, NodeKind::Chapter, 1, "C");
    insert(&mut store, volume, NodeKind::Chapter, 1, "B");
    insert(&mut store, volume, NodeKind::Chapter, 0, "Prologue");
    insert(&mut store, volume, NodeKind::Chapter, 99, "Epilogue");

    assert_eq!(
        titles(&store, volume, NodeKind::Chapter),
        vec!["Prologue", "A", "B", "C", "Epilogue"]
    );
    assert_contiguous(&store, volume, NodeKind::Chapter);
}

#[test]
fn sibling_order_is_kept_per_node_type() {
    let mut store = store();
    let root = store.tree_root().expect("root");
    let volume = insert(&mut store, root, NodeKind::Volume, 0, "Book One");

    let chapter = insert(&mut store, volume, NodeKind::Chapter, 0, "Chapter 1");
    let block = insert(&mut store, volume, NodeKind::Storyblock, 0, "Block 1");
    let thread = insert(&mut store, volume, NodeKind::Despline, 0, "Thread");

    assert_eq!(store.tree_index_of(chapter).expect("index"), 0);
    assert_eq!(store.tree_index_of(block).expect("index"), 0);
    assert_eq!(store.tree_index_of(thread).expect("index"), 0);
    assert_eq!(store.tree_child_at(volume, NodeKind::Storyblock, 0).expect("child"), block);
}

#[test]
fn child_at_past_the_end_is_out_of_range() {
    let mut store = store();
    let root = store.tree_root().expect("root");
    insert(&mut store, root, NodeKind::Volume, 0, "One");
    insert(&mut store, root, NodeKind::Volume, 1, "Two");

    match store.tree_child_at(root, NodeKind::Volume, 2) {
        Err(StoreError::IndexOutOfRange { index, count }) => {
            assert_eq!((index, count), (2, 2));
        }
        other => panic!("expected IndexOutOfRange, got {other:?}"),
    }
}

#[test]
fn remove_node_closes_gap_and_cascades() {
    let mut store = store();
    let root = store.tree_root().expect("root");
    let volume = insert(&mut store, root, NodeKind::Volume, 0, "Book One");
    let chapters: Vec<NodeId> = (0..3)
        .map(|i| insert(&mut store, volume, NodeKind::Chapter, i, &format!("Chapter {i}")))
        .collect();
    let block = insert(&mut store, volume, NodeKind::Storyblock, 0, "Block");
    let beats: Vec<NodeId> = (0..2)
        .map(|i| insert(&mut store, block, NodeKind::Keypoint, i, &format!("Beat {i}")))
        .collect();

    assert_eq!(store.tree_remove_node(chapters[1]).expect("remove chapter"), 1);
    assert_eq!(
        titles(&store, volume, NodeKind::Chapter),
        vec!["Chapter 0", "Chapter 2"]
    );
    assert_contiguous(&store, volume, NodeKind::Chapter);

    let removed = store.tree_remove_node(volume).expect("remove volume");
    assert_eq!(removed, 1 + 2 + 1 + 2);
    for node in [chapters[0], chapters[2], block, beats[0], beats[1]] {
        assert!(matches!(
            store.tree_node(node),
            Err(StoreError::NotFound { .. })
        ));
    }
    assert_eq!(store.tree_child_count(root, NodeKind::Volume).expect("count"), 0);
}

#[test]
fn removing_the_root_is_rejected() {
    let mut store = store();
    let root = store.tree_root().expect("root");
    assert!(matches!(
        store.tree_remove_node(root),
        Err(StoreError::InvalidInput(_))
    ));
}

#[test]
fn chapter_walk_crosses_volume_boundaries() {
    let mut store = store();
    let root = store.tree_root().expect("root");
    assert_eq!(store.tree_first_chapter().expect("first"), None);
    assert_eq!(store.tree_last_chapter().expect("last"), None);

    let first_volume = insert(&mut store, root, NodeKind::Volume, 0, "One");
    let empty_volume = insert(&mut store, root, NodeKind::Volume, 1, "Interlude");
    let last_volume = insert(&mut store, root, NodeKind::Volume, 2, "Two");
    let c0 = insert(&mut store, first_volume, NodeKind::Chapter, 0, "c0");
    let c1 = insert(&mut store, first_volume, NodeKind::Chapter, 1, "c1");
    let c2 = insert(&mut store, last_volume, NodeKind::Chapter, 0, "c2");
    insert(&mut store, empty_volume, NodeKind::Storyblock, 0, "not a chapter");

    assert_eq!(store.tree_first_chapter().expect("first"), Some(c0));
    assert_eq!(store.tree_last_chapter().expect("last"), Some(c2));
    assert_eq!(store.tree_next_chapter(c0).expect("next"), Some(c1));
    assert_eq!(store.tree_next_chapter(c1).expect("next"), Some(c2));
    assert_eq!(store.tree_next_chapter(c2).expect("next"), None);
    assert_eq!(store.tree_previous_chapter(c2).expect("previous"), Some(c1));
    assert_eq!(store.tree_previous_chapter(c0).expect("previous"), None);

    // Reordering volumes changes the walk.
    let moved = insert(&mut store, root, NodeKind::Volume, 0, "Zero");
    let c_zero = insert(&mut store, moved, NodeKind::Chapter, 0, "c-zero");
    assert_eq!(store.tree_first_chapter().expect("first"), Some(c_zero));
    assert_eq!(store.tree_previous_chapter(c0).expect("previous"), Some(c_zero));

    assert!(matches!(
        store.tree_next_chapter(first_volume),
        Err(StoreError::TypeMismatch { .. })
    ));
}

#[test]
fn titles_and_descriptions_are_editable() {
    let mut store = store();
    let root = store.tree_root().expect("root");
    let volume = store
        .tree_insert_child_before(
            InsertChildRequest::new(root, NodeKind::Volume, 0, "Draft").with_description("first pass"),
        )
        .expect("insert");
    assert_eq!(store.tree_node(volume).expect("row").description, "first pass");

    store.tree_set_title(volume, "Book One").expect("title");
    store.tree_set_description(volume, "the rise").expect("description");
    let row = store.tree_node(volume).expect("row");
    assert_eq!((row.title.as_str(), row.description.as_str()), ("Book One", "the rise"));

    store.tree_remove_node(volume).expect("remove");
    assert!(matches!(
        store.tree_set_title(volume, "gone"),
        Err(StoreError::NotFound { .. })
    ));
}
