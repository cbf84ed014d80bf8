// File: src/storage/sqlite/config.rs

use crate::config::Config;

/// SQLite storage backend configuration
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Path to database file (or ":memory:" for in-memory)
    pub path: String,

    /// Enable WAL mode so readers do not block the writer
    pub wal_mode: bool,

    /// Busy timeout in milliseconds
    pub busy_timeout_ms: u32,

    /// Enable foreign key enforcement
    pub foreign_keys: bool,

    /// Extra attempts after a unique-path conflict on post creation
    pub allocation_retries: u32,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            path: "forum.db".to_string(),
            wal_mode: true,
            busy_timeout_ms: 5000,
            foreign_keys: true,
            allocation_retries: 3,
        }
    }
}

impl From<&Config> for SqliteConfig {
    fn from(config: &Config) -> Self {
        Self {
            path: config.database_path.clone(),
            busy_timeout_ms: config.busy_timeout_ms,
            allocation_retries: config.allocation_retries,
            ..Default::default()
        }
    }
}
