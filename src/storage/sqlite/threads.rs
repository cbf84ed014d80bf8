// File: src/storage/sqlite/threads.rs

use super::convert::{self, THREAD_COLUMNS};
use super::counters::SqlThreadCounters;
use super::store::SqliteStore;
use crate::error::{ServerError, ServerResult};
use crate::traits::{NewThread, Thread, ThreadCounters};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

impl SqliteStore {
    pub(crate) fn create_thread_impl(&self, thread: NewThread) -> ServerResult<Thread> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO thread (forum, title, user, date, message, slug, is_closed, is_deleted)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                thread.forum,
                thread.title,
                thread.user,
                convert::format_date(&thread.date),
                thread.message,
                thread.slug,
                thread.is_closed,
                thread.is_deleted,
            ],
        )?;
        let id = conn.last_insert_rowid();

        tracing::debug!(thread_id = id, forum = %thread.forum, "thread created");

        Ok(Thread {
            id,
            forum: thread.forum,
            title: thread.title,
            user: thread.user,
            date: thread.date,
            message: thread.message,
            slug: thread.slug,
            is_closed: thread.is_closed,
            is_deleted: thread.is_deleted,
            likes: 0,
            dislikes: 0,
            points: 0,
            posts: 0,
        })
    }

    pub(crate) fn get_thread_impl(&self, id: i64) -> ServerResult<Thread> {
        let conn = self.get_conn()?;
        get_thread_by_id(&conn, id)
    }

    /// Mark the thread and every one of its posts deleted
    pub(crate) fn remove_thread_impl(&self, id: i64) -> ServerResult<()> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        ensure_thread_exists(&tx, id)?;
        tx.execute("UPDATE thread SET is_deleted = 1 WHERE id = ?1", params![id])?;
        let posts = tx.execute(
            "UPDATE post SET is_deleted = 1 WHERE thread = ?1 AND is_deleted = 0",
            params![id],
        )?;
        SqlThreadCounters::new(&tx).on_thread_removed(id)?;

        tx.commit()?;
        tracing::info!(thread_id = id, posts, "thread removed");
        Ok(())
    }

    /// Undelete the thread and every one of its posts
    pub(crate) fn restore_thread_impl(&self, id: i64) -> ServerResult<()> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        ensure_thread_exists(&tx, id)?;
        tx.execute("UPDATE thread SET is_deleted = 0 WHERE id = ?1", params![id])?;
        tx.execute(
            "UPDATE post SET is_deleted = 0 WHERE thread = ?1 AND is_deleted = 1",
            params![id],
        )?;
        let posts = SqlThreadCounters::new(&tx).recount(id)?;

        tx.commit()?;
        tracing::info!(thread_id = id, posts, "thread restored");
        Ok(())
    }
}

/// Fetch a thread row
pub(crate) fn get_thread_by_id(conn: &Connection, id: i64) -> ServerResult<Thread> {
    conn.query_row(
        &format!("SELECT {} FROM thread WHERE id = ?1", THREAD_COLUMNS),
        params![id],
        convert::row_to_thread,
    )
    .optional()?
    .ok_or_else(|| ServerError::ThreadNotFound(id.to_string()))
}

/// Fail with `ThreadNotFound` unless the thread row exists
pub(crate) fn ensure_thread_exists(conn: &Connection, id: i64) -> ServerResult<()> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM thread WHERE id = ?1)",
        params![id],
        |row| row.get(0),
    )?;
    if !exists {
        return Err(ServerError::ThreadNotFound(id.to_string()));
    }
    Ok(())
}
