// File: src/storage/sqlite/convert.rs

use crate::error::{ServerError, ServerResult};
use crate::path::MaterializedPath;
use crate::traits::{Post, PostFlags, Thread, DATE_FORMAT};
use chrono::NaiveDateTime;
use rusqlite::Row;

/// Column list matching `row_to_post`
pub const POST_COLUMNS: &str = "id, thread, forum, user, date, message, path, \
     is_approved, is_highlighted, is_edited, is_spam, is_deleted, likes, dislikes, points";

/// Column list matching `row_to_thread`
pub const THREAD_COLUMNS: &str = "id, forum, title, user, date, message, slug, \
     is_closed, is_deleted, likes, dislikes, points, posts";

/// A post row before its path is validated and its parent resolved
#[derive(Debug, Clone)]
pub struct PostRow {
    pub id: i64,
    pub thread: i64,
    pub forum: String,
    pub user: String,
    pub date: NaiveDateTime,
    pub message: String,
    pub path: Option<String>,
    pub flags: PostFlags,
    pub likes: i64,
    pub dislikes: i64,
    pub points: i64,
}

impl PostRow {
    /// Validate the stored path
    ///
    /// A NULL or undecodable path on a committed row means storage integrity
    /// is broken; the row is never silently skipped.
    pub fn materialized_path(&self) -> ServerResult<MaterializedPath> {
        let raw = self.path.as_deref().ok_or_else(|| {
            tracing::error!(post_id = self.id, "committed post has no path");
            ServerError::MalformedPath(format!("post {} has no path", self.id))
        })?;

        MaterializedPath::parse(raw).map_err(|e| {
            tracing::error!(post_id = self.id, path = ?raw, error = %e, "stored path is malformed");
            ServerError::MalformedPath(format!("post {}: {}", self.id, e))
        })
    }

    pub fn into_post(self, path: MaterializedPath, parent: Option<i64>) -> Post {
        Post {
            id: self.id,
            thread: self.thread,
            forum: self.forum,
            user: self.user,
            date: self.date,
            message: self.message,
            path,
            parent,
            flags: self.flags,
            likes: self.likes,
            dislikes: self.dislikes,
            points: self.points,
        }
    }
}

/// Convert a database row (selected with `POST_COLUMNS`) to PostRow
pub fn row_to_post(row: &Row) -> rusqlite::Result<PostRow> {
    let date: String = row.get(4)?;

    Ok(PostRow {
        id: row.get(0)?,
        thread: row.get(1)?,
        forum: row.get(2)?,
        user: row.get(3)?,
        date: parse_date(4, &date)?,
        message: row.get(5)?,
        path: row.get(6)?,
        flags: PostFlags {
            is_approved: row.get(7)?,
            is_highlighted: row.get(8)?,
            is_edited: row.get(9)?,
            is_spam: row.get(10)?,
            is_deleted: row.get(11)?,
        },
        likes: row.get(12)?,
        dislikes: row.get(13)?,
        points: row.get(14)?,
    })
}

/// Convert a database row (selected with `THREAD_COLUMNS`) to Thread
pub fn row_to_thread(row: &Row) -> rusqlite::Result<Thread> {
    let date: String = row.get(4)?;

    Ok(Thread {
        id: row.get(0)?,
        forum: row.get(1)?,
        title: row.get(2)?,
        user: row.get(3)?,
        date: parse_date(4, &date)?,
        message: row.get(5)?,
        slug: row.get(6)?,
        is_closed: row.get(7)?,
        is_deleted: row.get(8)?,
        likes: row.get(9)?,
        dislikes: row.get(10)?,
        points: row.get(11)?,
        posts: row.get(12)?,
    })
}

/// Storage form of a date
pub fn format_date(date: &NaiveDateTime) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_date(idx: usize, raw: &str) -> rusqlite::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
