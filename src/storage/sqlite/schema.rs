// File: src/storage/sqlite/schema.rs

use crate::error::ServerResult;
use rusqlite::{params, Connection, OptionalExtension};

/// Current schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Create all tables (idempotent)
pub fn create_tables(conn: &Connection) -> ServerResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;

    let now = chrono::Utc::now().timestamp();
    conn.execute(
        "INSERT OR IGNORE INTO forum_config (key, value, updated_at) VALUES ('schema_version', ?1, ?2)",
        params![SCHEMA_VERSION.to_string(), now],
    )?;
    Ok(())
}

/// Stored schema version, if the database was initialized
pub fn schema_version(conn: &Connection) -> ServerResult<Option<u32>> {
    let table_exists = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type='table' AND name='forum_config'",
            [],
            |row| row.get::<_, String>(0),
        )
        .optional()?;

    if table_exists.is_none() {
        return Ok(None);
    }

    let version = conn
        .query_row(
            "SELECT value FROM forum_config WHERE key = 'schema_version'",
            [],
            |row| row.get::<_, String>(0),
        )
        .optional()?
        .and_then(|v| v.parse().ok());
    Ok(version)
}

const SCHEMA_SQL: &str = r#"
-- Core configuration
CREATE TABLE IF NOT EXISTS forum_config (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL
);

-- Threads
CREATE TABLE IF NOT EXISTS thread (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    forum TEXT NOT NULL,
    title TEXT NOT NULL,
    user TEXT NOT NULL,
    date TEXT NOT NULL,                     -- YYYY-MM-DD HH:MM:SS
    message TEXT NOT NULL,
    slug TEXT NOT NULL,
    is_closed INTEGER NOT NULL DEFAULT 0,
    is_deleted INTEGER NOT NULL DEFAULT 0,
    likes INTEGER NOT NULL DEFAULT 0,
    dislikes INTEGER NOT NULL DEFAULT 0,
    points INTEGER NOT NULL DEFAULT 0,
    posts INTEGER NOT NULL DEFAULT 0        -- non-deleted posts, see ThreadCounters
);

-- Posts. AUTOINCREMENT keeps ids from ever being reused, which keeps
-- root paths (the encoded id) unique for the life of the database.
CREATE TABLE IF NOT EXISTS post (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    thread INTEGER NOT NULL REFERENCES thread(id),
    forum TEXT NOT NULL,
    user TEXT NOT NULL,
    date TEXT NOT NULL,                     -- YYYY-MM-DD HH:MM:SS
    message TEXT NOT NULL,
    path TEXT,                              -- NULL only while a root is pending its id
    is_approved INTEGER NOT NULL DEFAULT 0,
    is_highlighted INTEGER NOT NULL DEFAULT 0,
    is_edited INTEGER NOT NULL DEFAULT 0,
    is_spam INTEGER NOT NULL DEFAULT 0,
    is_deleted INTEGER NOT NULL DEFAULT 0,
    likes INTEGER NOT NULL DEFAULT 0,
    dislikes INTEGER NOT NULL DEFAULT 0,
    points INTEGER NOT NULL DEFAULT 0
);

-- Sibling paths must never collide; also serves every prefix range scan
CREATE UNIQUE INDEX IF NOT EXISTS idx_post_path ON post(path);

CREATE INDEX IF NOT EXISTS idx_post_thread_date ON post(thread, date);
CREATE INDEX IF NOT EXISTS idx_post_user_date ON post(user, date);
CREATE INDEX IF NOT EXISTS idx_post_forum_date ON post(forum, date);
CREATE INDEX IF NOT EXISTS idx_thread_forum ON thread(forum);
"#;
