//! Thread lifecycle and post counter tests

use crate::common::*;
use forum_server::traits::{ForumStore, PostQuery, SortMode};
use forum_server::ServerError;

#[test]
fn test_new_thread_has_no_posts() {
    let store = test_store();
    let thread = create_thread(&store, "fresh");

    assert_eq!(thread.posts, 0);
    let loaded = store.get_thread(thread.id).unwrap();
    assert_eq!(loaded.slug, "fresh");
    assert_eq!(loaded.posts, 0);
    assert_eq!(loaded.date, date("2014-01-01 00:00:00"));
}

#[test]
fn test_get_unknown_thread() {
    let store = test_store();
    assert!(matches!(
        store.get_thread(77),
        Err(ServerError::ThreadNotFound(_))
    ));
}

#[test]
fn test_counter_ignores_posts_created_deleted() {
    let store = test_store();
    let thread = create_thread(&store, "created-deleted");
    create_post(&store, thread.id, None, "live", 0);
    let mut hidden = new_post(thread.id, None, "hidden", "2014-01-02 00:01:00");
    hidden.flags.is_deleted = true;
    store.create_post(hidden).unwrap();

    assert_eq!(store.get_thread(thread.id).unwrap().posts, 1);
}

#[test]
fn test_repeated_remove_restore_keeps_counter_exact() {
    let store = test_store();
    let thread = create_thread(&store, "flip");
    let post = create_post(&store, thread.id, None, "post", 0);
    create_post(&store, thread.id, None, "other", 1);

    for _ in 0..3 {
        store.remove_post(post.id).unwrap();
        store.remove_post(post.id).unwrap();
    }
    assert_eq!(store.get_thread(thread.id).unwrap().posts, 1);

    for _ in 0..3 {
        store.restore_post(post.id).unwrap();
    }
    assert_eq!(store.get_thread(thread.id).unwrap().posts, 2);
}

#[test]
fn test_remove_thread_deletes_every_post() {
    let store = test_store();
    let thread = create_thread(&store, "remove");
    let root = create_post(&store, thread.id, None, "root", 0);
    create_post(&store, thread.id, Some(root.id), "reply", 1);

    store.remove_thread(thread.id).unwrap();

    let loaded = store.get_thread(thread.id).unwrap();
    assert!(loaded.is_deleted);
    assert_eq!(loaded.posts, 0);

    let query = PostQuery {
        sort: SortMode::Tree,
        ..Default::default()
    };
    let posts = store.thread_posts(thread.id, &query).unwrap();
    assert_eq!(posts.len(), 2);
    assert!(posts.iter().all(|p| p.flags.is_deleted));
}

#[test]
fn test_restore_thread_recounts() {
    let store = test_store();
    let thread = create_thread(&store, "restore");
    let root = create_post(&store, thread.id, None, "root", 0);
    create_post(&store, thread.id, Some(root.id), "reply", 1);
    create_post(&store, thread.id, Some(root.id), "reply", 2);

    store.remove_post(root.id).unwrap();
    store.remove_thread(thread.id).unwrap();
    store.restore_thread(thread.id).unwrap();

    let loaded = store.get_thread(thread.id).unwrap();
    assert!(!loaded.is_deleted);
    assert_eq!(loaded.posts, 3);
    assert!(!store.get_post(root.id).unwrap().flags.is_deleted);
}

#[test]
fn test_remove_unknown_thread() {
    let store = test_store();
    assert!(matches!(
        store.remove_thread(5),
        Err(ServerError::ThreadNotFound(_))
    ));
    assert!(matches!(
        store.restore_thread(5),
        Err(ServerError::ThreadNotFound(_))
    ));
}
