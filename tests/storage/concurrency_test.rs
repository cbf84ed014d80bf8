//! Concurrent reply creation against one database file
//!
//! Each worker opens its own connection, so writers race through SQLite's
//! file lock exactly as independent request handlers would.

use crate::common::*;
use forum_server::traits::ForumStore;
use forum_server::SqliteStore;
use std::collections::HashSet;
use std::thread;

const WORKERS: usize = 8;
const REPLIES_PER_WORKER: usize = 10;

fn open_stores(path: &std::path::Path, count: usize) -> Vec<SqliteStore> {
    (0..count)
        .map(|_| SqliteStore::new(path).expect("Failed to open shared database"))
        .collect()
}

#[test]
fn test_concurrent_replies_get_distinct_paths() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("forum.db");

    let setup = SqliteStore::new(&db_path).unwrap();
    let thread = create_thread(&setup, "race");
    let root = create_post(&setup, thread.id, None, "root", 0);

    let stores = open_stores(&db_path, WORKERS);
    let handles: Vec<_> = stores
        .into_iter()
        .enumerate()
        .map(|(worker, store)| {
            let thread_id = thread.id;
            let root_id = root.id;
            thread::spawn(move || {
                (0..REPLIES_PER_WORKER)
                    .map(|i| {
                        let message = format!("worker {} reply {}", worker, i);
                        store
                            .create_post(new_post(
                                thread_id,
                                Some(root_id),
                                &message,
                                "2014-01-02 00:00:00",
                            ))
                            .expect("Concurrent create failed")
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let created: Vec<_> = handles
        .into_iter()
        .flat_map(|h| h.join().expect("Worker panicked"))
        .collect();

    let total = WORKERS * REPLIES_PER_WORKER;
    assert_eq!(created.len(), total);

    let paths: HashSet<_> = created.iter().map(|p| p.path.clone()).collect();
    assert_eq!(paths.len(), total, "two replies share a path");

    // Sibling indices are exactly 1..=N with no gaps
    let mut indices: Vec<u64> = created
        .iter()
        .map(|p| p.path.sibling_index().unwrap())
        .collect();
    indices.sort_unstable();
    assert_eq!(indices, (1..=total as u64).collect::<Vec<_>>());

    let reloaded = setup.get_thread(thread.id).unwrap();
    assert_eq!(reloaded.posts, total as i64 + 1);
}

#[test]
fn test_concurrent_roots_and_replies() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("forum.db");

    let setup = SqliteStore::new(&db_path).unwrap();
    let thread = create_thread(&setup, "mixed");
    let root = create_post(&setup, thread.id, None, "root", 0);

    let stores = open_stores(&db_path, 4);
    let handles: Vec<_> = stores
        .into_iter()
        .enumerate()
        .map(|(worker, store)| {
            let thread_id = thread.id;
            let root_id = root.id;
            thread::spawn(move || {
                (0..5)
                    .map(|i| {
                        // Even workers start new roots, odd workers reply
                        let parent = (worker % 2 == 1).then_some(root_id);
                        store
                            .create_post(new_post(
                                thread_id,
                                parent,
                                &format!("{}-{}", worker, i),
                                "2014-01-02 00:00:00",
                            ))
                            .expect("Concurrent create failed")
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let created: Vec<_> = handles
        .into_iter()
        .flat_map(|h| h.join().expect("Worker panicked"))
        .collect();

    let paths: HashSet<_> = created.iter().map(|p| p.path.clone()).collect();
    assert_eq!(paths.len(), created.len());

    for post in created.iter().filter(|p| p.parent.is_none()) {
        assert_eq!(post.path.root_id().unwrap(), post.id as u64);
    }
}
