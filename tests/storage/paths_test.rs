//! Path assignment and ancestor resolution tests

use crate::common::*;
use forum_server::path::{encode, MaterializedPath, SEGMENT_WIDTH};
use forum_server::traits::ForumStore;
use forum_server::ServerError;

#[test]
fn test_root_path_encodes_own_id() {
    let store = test_store();
    let thread = create_thread(&store, "roots");

    for minute in 0..5 {
        let root = create_post(&store, thread.id, None, "root", minute);
        assert_eq!(root.path.as_str(), encode(root.id as u64).unwrap());
        assert!(root.parent.is_none());
    }
}

#[test]
fn test_child_path_extends_parent() {
    let store = test_store();
    let thread = create_thread(&store, "children");
    let root = create_post(&store, thread.id, None, "root", 0);
    let child = create_post(&store, thread.id, Some(root.id), "child", 1);
    let grandchild = create_post(&store, thread.id, Some(child.id), "grandchild", 2);

    assert!(child.path.as_str().starts_with(root.path.as_str()));
    assert_eq!(
        child.path.as_str().len(),
        root.path.as_str().len() + SEGMENT_WIDTH
    );
    assert!(grandchild.path.as_str().starts_with(child.path.as_str()));
    assert_eq!(grandchild.path.depth(), 3);
}

#[test]
fn test_scenario_paths() {
    let store = test_store();
    let thread = create_thread(&store, "scenario");
    let a = create_post(&store, thread.id, None, "A", 0);
    let reply_a1 = create_post(&store, thread.id, Some(a.id), "replyA1", 1);
    let reply_a2 = create_post(&store, thread.id, Some(a.id), "replyA2", 2);
    let reply_a11 = create_post(&store, thread.id, Some(reply_a1.id), "replyA1.1", 3);

    let seg1 = reply_a1.path.last_segment();
    let seg2 = reply_a2.path.last_segment();
    assert_eq!(reply_a1.path.as_str(), format!("{}{}", a.path.as_str(), seg1));
    assert_eq!(reply_a2.path.as_str(), format!("{}{}", a.path.as_str(), seg2));
    assert!(seg2 > seg1);
    assert_eq!(reply_a11.path.depth(), 3);
    assert!(reply_a11
        .path
        .as_str()
        .starts_with(&format!("{}{}", a.path.as_str(), seg1)));
}

#[test]
fn test_depth_three_ancestor_resolution() {
    let store = test_store();
    let thread = create_thread(&store, "ancestry");
    let root = create_post(&store, thread.id, None, "root", 0);
    let middle = create_post(&store, thread.id, Some(root.id), "middle", 1);
    let leaf = create_post(&store, thread.id, Some(middle.id), "leaf", 2);

    let parent_id = store.resolve_ancestor_id(leaf.id, &leaf.path, 1).unwrap();
    assert_eq!(parent_id, middle.id);

    // The resolved id's row is the one sitting at the parent path
    let parent = store.get_post(parent_id).unwrap();
    assert_eq!(Some(parent.path), leaf.path.parent());
    assert_eq!(parent.message, "middle");

    let root_id = store.resolve_ancestor_id(leaf.id, &leaf.path, 2).unwrap();
    assert_eq!(root_id, root.id);

    // Past the root: the post's own id means "no parent"
    assert_eq!(
        store.resolve_ancestor_id(leaf.id, &leaf.path, 3).unwrap(),
        leaf.id
    );
    assert_eq!(
        store.resolve_ancestor_id(root.id, &root.path, 1).unwrap(),
        root.id
    );

    assert_eq!(store.get_post(leaf.id).unwrap().parent, Some(middle.id));
    assert_eq!(store.get_post(root.id).unwrap().parent, None);
}

#[test]
fn test_reply_to_missing_parent_leaves_nothing_behind() {
    let store = test_store();
    let thread = create_thread(&store, "missing-parent");

    let err = store
        .create_post(new_post(thread.id, Some(12345), "orphan", "2014-01-02 00:00:00"))
        .unwrap_err();
    assert!(matches!(err, ServerError::PostNotFound(_)));

    let posts = store
        .thread_posts(thread.id, &Default::default())
        .unwrap();
    assert!(posts.is_empty());
    assert_eq!(store.get_thread(thread.id).unwrap().posts, 0);
}

#[test]
fn test_reply_to_soft_deleted_parent_is_allowed() {
    let store = test_store();
    let thread = create_thread(&store, "deleted-parent");
    let root = create_post(&store, thread.id, None, "root", 0);
    store.remove_post(root.id).unwrap();

    let reply = create_post(&store, thread.id, Some(root.id), "reply", 1);
    assert_eq!(reply.path, root.path.child(1).unwrap());
}

#[test]
fn test_roots_in_different_threads_never_collide() {
    let store = test_store();
    let first = create_thread(&store, "first");
    let second = create_thread(&store, "second");

    let a = create_post(&store, first.id, None, "a", 0);
    let b = create_post(&store, second.id, None, "b", 0);
    assert_ne!(a.path, b.path);

    let a_reply = create_post(&store, first.id, Some(a.id), "a1", 1);
    let b_reply = create_post(&store, second.id, Some(b.id), "b1", 1);
    assert_eq!(a_reply.path.sibling_index().unwrap(), 1);
    assert_eq!(b_reply.path.sibling_index().unwrap(), 1);
    assert_ne!(a_reply.path, b_reply.path);
}

#[test]
fn test_path_survives_reload() {
    let store = test_store();
    let thread = create_thread(&store, "reload");
    let root = create_post(&store, thread.id, None, "root", 0);
    let child = create_post(&store, thread.id, Some(root.id), "child", 1);

    let loaded = store.get_post(child.id).unwrap();
    assert_eq!(loaded.path, child.path);
    assert_eq!(
        MaterializedPath::parse(loaded.path.as_str()).unwrap(),
        child.path
    );
}
