//! forum-server library exports

pub mod api;
pub mod config;
pub mod error;
pub mod path;
pub mod storage;
pub mod traits;

// Re-exports
pub use config::Config;
pub use error::{ServerError, ServerResult};
pub use path::MaterializedPath;
pub use storage::SqliteStore;
pub use traits::{ForumStore, Post, Thread};
