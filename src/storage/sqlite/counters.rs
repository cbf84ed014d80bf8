// File: src/storage/sqlite/counters.rs

use crate::error::{ServerError, ServerResult};
use crate::traits::ThreadCounters;
use rusqlite::{params, Connection};

/// `ThreadCounters` backed by single-statement UPDATEs on the thread row
///
/// Borrow the connection (or transaction) of the post change so counter and
/// post commit together.
pub struct SqlThreadCounters<'c> {
    conn: &'c Connection,
}

impl<'c> SqlThreadCounters<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    fn adjust(&self, thread_id: i64, delta: i64) -> ServerResult<()> {
        let updated = self.conn.execute(
            "UPDATE thread SET posts = posts + ?1 WHERE id = ?2",
            params![delta, thread_id],
        )?;
        if updated == 0 {
            return Err(ServerError::ThreadNotFound(thread_id.to_string()));
        }
        Ok(())
    }
}

impl ThreadCounters for SqlThreadCounters<'_> {
    fn on_create(&self, thread_id: i64, is_deleted: bool) -> ServerResult<()> {
        if is_deleted {
            return Ok(());
        }
        self.adjust(thread_id, 1)
    }

    fn on_soft_delete(&self, thread_id: i64) -> ServerResult<()> {
        self.adjust(thread_id, -1)
    }

    fn on_restore(&self, thread_id: i64) -> ServerResult<()> {
        self.adjust(thread_id, 1)
    }

    fn on_thread_removed(&self, thread_id: i64) -> ServerResult<()> {
        let updated = self
            .conn
            .execute("UPDATE thread SET posts = 0 WHERE id = ?1", params![thread_id])?;
        if updated == 0 {
            return Err(ServerError::ThreadNotFound(thread_id.to_string()));
        }
        Ok(())
    }

    fn recount(&self, thread_id: i64) -> ServerResult<i64> {
        let updated = self.conn.execute(
            "UPDATE thread SET posts = \
                 (SELECT COUNT(*) FROM post WHERE post.thread = ?1 AND post.is_deleted = 0) \
             WHERE id = ?1",
            params![thread_id],
        )?;
        if updated == 0 {
            return Err(ServerError::ThreadNotFound(thread_id.to_string()));
        }

        let posts: i64 = self.conn.query_row(
            "SELECT posts FROM thread WHERE id = ?1",
            params![thread_id],
            |row| row.get(0),
        )?;
        tracing::debug!(thread_id, posts, "thread post counter recounted");
        Ok(posts)
    }
}
