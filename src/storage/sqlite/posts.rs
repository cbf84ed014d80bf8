// File: src/storage/sqlite/posts.rs

use super::allocator::SiblingAllocator;
use super::ancestry::AncestorResolver;
use super::convert::{self, POST_COLUMNS};
use super::counters::SqlThreadCounters;
use super::store::SqliteStore;
use super::threads::ensure_thread_exists;
use crate::error::{ServerError, ServerResult, StorageError};
use crate::path::MaterializedPath;
use crate::traits::{NewPost, Post, ThreadCounters, Vote};
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};

impl SqliteStore {
    /// Create a post and assign its path
    ///
    /// Allocation and insert run in one `BEGIN IMMEDIATE` transaction. A
    /// unique-path conflict (another connection won the same sibling index)
    /// re-runs the whole transaction, up to `allocation_retries` more times.
    pub(crate) fn create_post_impl(&self, post: NewPost) -> ServerResult<Post> {
        let retries = self.config().allocation_retries;
        let mut attempt: u32 = 0;

        loop {
            match self.try_create_post(&post) {
                Err(e) if e.is_unique_violation() => {
                    if attempt >= retries {
                        tracing::error!(
                            thread_id = post.thread,
                            parent = ?post.parent,
                            attempts = attempt + 1,
                            "path allocation kept conflicting"
                        );
                        return Err(ServerError::Storage(StorageError::TransactionFailed(
                            format!("path allocation conflicted {} times", attempt + 1),
                        )));
                    }
                    attempt += 1;
                    tracing::warn!(
                        thread_id = post.thread,
                        parent = ?post.parent,
                        attempt,
                        "path conflict on insert, retrying allocation"
                    );
                }
                other => return other,
            }
        }
    }

    fn try_create_post(&self, post: &NewPost) -> ServerResult<Post> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        ensure_thread_exists(&tx, post.thread)?;

        let (id, path) = match post.parent {
            None => {
                let pending = PendingRoot::insert(&tx, post)?;
                let id = pending.id;
                (id, pending.finalize(&tx)?)
            }
            Some(parent_id) => {
                let parent_path = parent_path_for(&tx, post.thread, parent_id)?;
                let path = SiblingAllocator::new(&tx).allocate(&parent_path)?;
                let id = insert_post_row(&tx, post, Some(path.as_str()))?;
                (id, path)
            }
        };

        SqlThreadCounters::new(&tx).on_create(post.thread, post.flags.is_deleted)?;
        tx.commit()?;

        tracing::info!(post_id = id, thread_id = post.thread, path = %path, "post created");

        Ok(Post {
            id,
            thread: post.thread,
            forum: post.forum.clone(),
            user: post.user.clone(),
            date: post.date,
            message: post.message.clone(),
            path,
            parent: post.parent,
            flags: post.flags,
            likes: 0,
            dislikes: 0,
            points: 0,
        })
    }

    pub(crate) fn get_post_impl(&self, id: i64) -> ServerResult<Post> {
        let conn = self.get_conn()?;
        get_post_by_id(&conn, id)
    }

    /// Flip `is_deleted`; the counter moves only when the flag actually changed
    pub(crate) fn set_post_deleted_impl(&self, id: i64, deleted: bool) -> ServerResult<bool> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let thread_id: i64 = tx
            .query_row("SELECT thread FROM post WHERE id = ?1", params![id], |row| {
                row.get(0)
            })
            .optional()?
            .ok_or_else(|| ServerError::PostNotFound(id.to_string()))?;

        let changed = tx.execute(
            "UPDATE post SET is_deleted = ?1 WHERE id = ?2 AND is_deleted != ?1",
            params![deleted, id],
        )? == 1;

        if changed {
            let counters = SqlThreadCounters::new(&tx);
            if deleted {
                counters.on_soft_delete(thread_id)?;
            } else {
                counters.on_restore(thread_id)?;
            }
        }

        tx.commit()?;
        tracing::debug!(post_id = id, deleted, changed, "post deletion flag set");
        Ok(changed)
    }

    /// Replace the message; `is_edited` reflects whether it actually changed
    pub(crate) fn update_post_impl(&self, id: i64, message: &str) -> ServerResult<Post> {
        let conn = self.get_conn()?;
        let updated = conn.execute(
            "UPDATE post SET is_edited = (message != ?1), message = ?1 WHERE id = ?2",
            params![message, id],
        )?;
        if updated == 0 {
            return Err(ServerError::PostNotFound(id.to_string()));
        }
        get_post_by_id(&conn, id)
    }

    pub(crate) fn vote_post_impl(&self, id: i64, vote: Vote) -> ServerResult<Post> {
        let sql = match vote {
            Vote::Like => "UPDATE post SET likes = likes + 1, points = points + 1 WHERE id = ?1",
            Vote::Dislike => {
                "UPDATE post SET dislikes = dislikes + 1, points = points - 1 WHERE id = ?1"
            }
        };

        let conn = self.get_conn()?;
        if conn.execute(sql, params![id])? == 0 {
            return Err(ServerError::PostNotFound(id.to_string()));
        }
        get_post_by_id(&conn, id)
    }
}

/// A root post row whose id is known but whose path is not yet written
///
/// A root's path is its own id, which only exists after the insert. Both
/// phases run inside the caller's transaction, so no other reader ever sees
/// the NULL path.
struct PendingRoot {
    id: i64,
}

impl PendingRoot {
    fn insert(tx: &Transaction, post: &NewPost) -> ServerResult<Self> {
        let id = insert_post_row(tx, post, None)?;
        Ok(Self { id })
    }

    fn finalize(self, tx: &Transaction) -> ServerResult<MaterializedPath> {
        let id = u64::try_from(self.id)
            .map_err(|_| ServerError::Internal(format!("negative post id {}", self.id)))?;
        let path = MaterializedPath::root(id).map_err(|e| {
            tracing::error!(post_id = self.id, "post id exceeds root path capacity");
            ServerError::from(e)
        })?;

        tx.execute(
            "UPDATE post SET path = ?1 WHERE id = ?2",
            params![path.as_str(), self.id],
        )?;
        Ok(path)
    }
}

/// Path of the parent a reply attaches to
fn parent_path_for(
    conn: &Connection,
    thread_id: i64,
    parent_id: i64,
) -> ServerResult<MaterializedPath> {
    let row = conn
        .query_row(
            &format!("SELECT {} FROM post WHERE id = ?1", POST_COLUMNS),
            params![parent_id],
            convert::row_to_post,
        )
        .optional()?
        .ok_or_else(|| ServerError::PostNotFound(parent_id.to_string()))?;

    if row.thread != thread_id {
        return Err(ServerError::InvalidArgument(format!(
            "parent post {} belongs to thread {}, not {}",
            parent_id, row.thread, thread_id
        )));
    }

    row.materialized_path()
}

fn insert_post_row(conn: &Connection, post: &NewPost, path: Option<&str>) -> ServerResult<i64> {
    conn.execute(
        "INSERT INTO post (thread, forum, user, date, message, path,
                           is_approved, is_highlighted, is_edited, is_spam, is_deleted)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            post.thread,
            post.forum,
            post.user,
            convert::format_date(&post.date),
            post.message,
            path,
            post.flags.is_approved,
            post.flags.is_highlighted,
            post.flags.is_edited,
            post.flags.is_spam,
            post.flags.is_deleted,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Fetch a post with its parent resolved
pub(crate) fn get_post_by_id(conn: &Connection, id: i64) -> ServerResult<Post> {
    let row = conn
        .query_row(
            &format!("SELECT {} FROM post WHERE id = ?1", POST_COLUMNS),
            params![id],
            convert::row_to_post,
        )
        .optional()?
        .ok_or_else(|| ServerError::PostNotFound(id.to_string()))?;

    let path = row.materialized_path()?;
    let parent = AncestorResolver::new(conn).parent_of(row.id, &path)?;
    Ok(row.into_post(path, parent))
}
