//! Storage layer integration tests
//!
//! Tests for the SQLite forum store:
//! - Path assignment for roots and replies
//! - Tree, parent-tree and flat listings
//! - Ancestor resolution and thread counters
//! - Concurrent reply creation on a shared database file

pub mod concurrency_test;
pub mod paths_test;
pub mod thread_lifecycle_test;
