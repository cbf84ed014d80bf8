//! Storage module
//!
//! SQLite backend for threads, posts and their materialized-path reply trees.

pub mod sqlite;

// Re-export ForumStore trait from traits module
pub use crate::traits::ForumStore;

pub use sqlite::{
    AncestorResolver, SiblingAllocator, SqlThreadCounters, SqliteConfig, SqliteStore,
    TreeQueryEngine,
};
