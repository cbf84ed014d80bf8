// File: src/storage/sqlite/mod.rs

mod allocator;
mod ancestry;
mod config;
mod convert;
mod counters;
mod posts;
mod queries;
pub mod schema;
mod store;
mod threads;

// Public exports
pub use allocator::SiblingAllocator;
pub use ancestry::AncestorResolver;
pub use config::SqliteConfig;
pub use counters::SqlThreadCounters;
pub use queries::TreeQueryEngine;
pub use store::SqliteStore;
