// File: src/storage/sqlite/store.rs

use super::config::SqliteConfig;
use super::schema;
use crate::error::{ServerError, ServerResult, StorageError};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// SQLite implementation of the ForumStore trait
///
/// One connection per store. Several stores may open the same database file;
/// writers then serialize on SQLite's own lock (see `BEGIN IMMEDIATE` in
/// post creation).
pub struct SqliteStore {
    /// Database connection (protected by mutex for thread safety)
    conn: Arc<Mutex<Connection>>,

    config: SqliteConfig,
}

impl SqliteStore {
    /// Open (or create) a database file with default configuration
    pub fn new<P: AsRef<Path>>(path: P) -> ServerResult<Self> {
        let config = SqliteConfig {
            path: path.as_ref().to_string_lossy().to_string(),
            ..Default::default()
        };
        Self::with_config(config)
    }

    /// Create with custom configuration
    ///
    /// Creates the schema if it does not exist yet.
    pub fn with_config(config: SqliteConfig) -> ServerResult<Self> {
        let conn = Connection::open(&config.path).map_err(|e| {
            ServerError::Storage(StorageError::ConnectionFailed(format!(
                "failed to open db: {}",
                e
            )))
        })?;

        Self::configure_connection(&conn, &config)?;
        schema::create_tables(&conn)?;

        tracing::debug!(path = %config.path, "forum database ready");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            config,
        })
    }

    /// Create an in-memory database (for testing)
    pub fn in_memory() -> ServerResult<Self> {
        let config = SqliteConfig {
            path: ":memory:".to_string(),
            wal_mode: false,
            ..Default::default()
        };
        Self::with_config(config)
    }

    /// Open an existing database (fails if doesn't exist)
    pub fn open<P: AsRef<Path>>(path: P) -> ServerResult<Self> {
        if !path.as_ref().exists() {
            return Err(ServerError::Storage(StorageError::ConnectionFailed(
                "database does not exist".into(),
            )));
        }
        Self::new(path)
    }

    /// Configure SQLite connection pragmas
    fn configure_connection(conn: &Connection, config: &SqliteConfig) -> ServerResult<()> {
        if config.wal_mode {
            let mode: String =
                conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
            if !mode.eq_ignore_ascii_case("wal") {
                tracing::warn!(mode = %mode, "WAL journal mode not available");
            }
        }
        conn.busy_timeout(Duration::from_millis(u64::from(config.busy_timeout_ms)))?;
        if config.foreign_keys {
            conn.pragma_update(None, "foreign_keys", "ON")?;
        }
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Ok(())
    }

    /// Check if the schema is present
    pub fn is_initialized(&self) -> bool {
        self.get_conn()
            .and_then(|conn| schema::schema_version(&conn))
            .map(|v| v.is_some())
            .unwrap_or(false)
    }

    pub fn config(&self) -> &SqliteConfig {
        &self.config
    }

    /// Get locked connection for internal operations
    pub(crate) fn get_conn(&self) -> ServerResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| {
            ServerError::Storage(StorageError::ConnectionFailed("lock poisoned".into()))
        })
    }
}

// ForumStore trait implementation
use crate::path::MaterializedPath;
use crate::traits::{ForumStore, NewPost, NewThread, Post, PostFilter, PostQuery, Thread, Vote};

impl ForumStore for SqliteStore {
    fn is_initialized(&self) -> bool {
        SqliteStore::is_initialized(self)
    }

    fn create_thread(&self, thread: NewThread) -> ServerResult<Thread> {
        self.create_thread_impl(thread)
    }

    fn get_thread(&self, id: i64) -> ServerResult<Thread> {
        self.get_thread_impl(id)
    }

    fn remove_thread(&self, id: i64) -> ServerResult<()> {
        self.remove_thread_impl(id)
    }

    fn restore_thread(&self, id: i64) -> ServerResult<()> {
        self.restore_thread_impl(id)
    }

    fn create_post(&self, post: NewPost) -> ServerResult<Post> {
        self.create_post_impl(post)
    }

    fn get_post(&self, id: i64) -> ServerResult<Post> {
        self.get_post_impl(id)
    }

    fn remove_post(&self, id: i64) -> ServerResult<bool> {
        self.set_post_deleted_impl(id, true)
    }

    fn restore_post(&self, id: i64) -> ServerResult<bool> {
        self.set_post_deleted_impl(id, false)
    }

    fn update_post(&self, id: i64, message: &str) -> ServerResult<Post> {
        self.update_post_impl(id, message)
    }

    fn vote_post(&self, id: i64, vote: Vote) -> ServerResult<Post> {
        self.vote_post_impl(id, vote)
    }

    fn thread_posts(&self, thread_id: i64, query: &PostQuery) -> ServerResult<Vec<Post>> {
        self.thread_posts_impl(thread_id, query)
    }

    fn list_posts(&self, filter: &PostFilter, query: &PostQuery) -> ServerResult<Vec<Post>> {
        self.list_posts_impl(filter, query)
    }

    fn resolve_ancestor_id(
        &self,
        post_id: i64,
        path: &MaterializedPath,
        levels_up: usize,
    ) -> ServerResult<i64> {
        self.resolve_ancestor_id_impl(post_id, path, levels_up)
    }
}
