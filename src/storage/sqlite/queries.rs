// File: src/storage/sqlite/queries.rs

use super::ancestry::AncestorResolver;
use super::convert::{self, PostRow, POST_COLUMNS};
use super::store::SqliteStore;
use super::threads::ensure_thread_exists;
use crate::error::ServerResult;
use crate::path::SEGMENT_WIDTH;
use crate::traits::{Post, PostFilter, PostQuery, SortMode};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection};

impl SqliteStore {
    pub(crate) fn thread_posts_impl(
        &self,
        thread_id: i64,
        query: &PostQuery,
    ) -> ServerResult<Vec<Post>> {
        let mut conn = self.get_conn()?;
        // One read transaction: every listing sees a single snapshot
        let tx = conn.transaction()?;
        let posts = TreeQueryEngine::new(&tx).thread_posts(thread_id, query)?;
        tx.commit()?;
        Ok(posts)
    }

    pub(crate) fn list_posts_impl(
        &self,
        filter: &PostFilter,
        query: &PostQuery,
    ) -> ServerResult<Vec<Post>> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;
        let posts = TreeQueryEngine::new(&tx).flat(filter, query)?;
        tx.commit()?;
        Ok(posts)
    }
}

/// Produces a thread's posts in flat, tree, or parent-tree order
///
/// Tree order is pure path ordering: roots compare by their first segment
/// in the requested direction, and everything inside a root's subtree stays
/// in ascending (pre-order) path order.
pub struct TreeQueryEngine<'c> {
    conn: &'c Connection,
}

impl<'c> TreeQueryEngine<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// # Errors
    /// * `ServerError::ThreadNotFound` - the thread does not exist; an
    ///   existing thread without posts yields an empty vector instead
    pub fn thread_posts(&self, thread_id: i64, query: &PostQuery) -> ServerResult<Vec<Post>> {
        ensure_thread_exists(self.conn, thread_id)?;

        let rows = match query.sort {
            SortMode::Flat => return self.flat(&PostFilter::Thread(thread_id), query),
            SortMode::Tree => self.tree_rows(thread_id, query)?,
            SortMode::ParentTree => self.parent_tree_rows(thread_id, query)?,
        };

        tracing::debug!(thread_id, sort = ?query.sort, posts = rows.len(), "thread posts listed");
        self.hydrate(rows)
    }

    /// Posts ordered by date
    pub fn flat(&self, filter: &PostFilter, query: &PostQuery) -> ServerResult<Vec<Post>> {
        let (column, key) = match filter {
            PostFilter::Thread(id) => ("thread", Value::Integer(*id)),
            PostFilter::User(user) => ("user", Value::Text(user.clone())),
            PostFilter::Forum(forum) => ("forum", Value::Text(forum.clone())),
        };

        let mut sql = format!("SELECT {} FROM post WHERE {} = ?1", POST_COLUMNS, column);
        let mut args = vec![key];
        push_since(&mut sql, &mut args, query, "date");
        sql.push_str(&format!(
            " ORDER BY date {order}, id {order}",
            order = query.order.as_sql()
        ));
        push_limit(&mut sql, &mut args, query);

        let rows = self.select(&sql, args)?;
        self.hydrate(rows)
    }

    /// All posts grouped by root in the requested direction, each group in
    /// ascending path order
    fn tree_rows(&self, thread_id: i64, query: &PostQuery) -> ServerResult<Vec<PostRow>> {
        let mut sql = format!("SELECT {} FROM post WHERE thread = ?1", POST_COLUMNS);
        let mut args = vec![Value::Integer(thread_id)];
        push_since(&mut sql, &mut args, query, "date");
        sql.push_str(&format!(
            " ORDER BY substr(path, 1, {width}) {order}, path ASC",
            width = SEGMENT_WIDTH,
            order = query.order.as_sql()
        ));
        push_limit(&mut sql, &mut args, query);

        self.select(&sql, args)
    }

    /// Descendants of the thread's roots, paged by root
    ///
    /// `since`, `order` and `limit` select the roots (only roots with at
    /// least one reply count). Each selected root is followed by all of its
    /// strict descendants in ascending path order; the roots themselves are
    /// not emitted.
    fn parent_tree_rows(&self, thread_id: i64, query: &PostQuery) -> ServerResult<Vec<PostRow>> {
        // char(127) is the same sentinel as PREFIX_UPPER_SENTINEL
        let mut sql = format!(
            "SELECT {} FROM post AS r WHERE r.thread = ?1 AND length(r.path) = {} \
             AND EXISTS (SELECT 1 FROM post AS c WHERE c.path > r.path AND c.path < r.path || char(127))",
            POST_COLUMNS, SEGMENT_WIDTH
        );
        let mut args = vec![Value::Integer(thread_id)];
        push_since(&mut sql, &mut args, query, "r.date");
        sql.push_str(&format!(" ORDER BY r.path {}", query.order.as_sql()));
        push_limit(&mut sql, &mut args, query);

        let roots = self.select(&sql, args)?;

        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM post WHERE path > ?1 AND path < ?2 ORDER BY path ASC",
            POST_COLUMNS
        ))?;

        let mut rows = Vec::new();
        for root in roots {
            let (lower, upper) = root.materialized_path()?.descendant_bounds();
            let group = stmt
                .query_map(params![lower, upper], convert::row_to_post)?
                .collect::<Result<Vec<_>, _>>()?;
            rows.extend(group);
        }
        Ok(rows)
    }

    fn select(&self, sql: &str, args: Vec<Value>) -> ServerResult<Vec<PostRow>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map(params_from_iter(args), convert::row_to_post)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Validate paths and resolve parent ids
    fn hydrate(&self, rows: Vec<PostRow>) -> ServerResult<Vec<Post>> {
        let mut resolver = AncestorResolver::new(self.conn);
        rows.into_iter()
            .map(|row| {
                let path = row.materialized_path()?;
                let parent = resolver.parent_of(row.id, &path)?;
                Ok(row.into_post(path, parent))
            })
            .collect()
    }
}

fn push_since(sql: &mut String, args: &mut Vec<Value>, query: &PostQuery, column: &str) {
    if let Some(since) = &query.since {
        args.push(Value::Text(convert::format_date(since)));
        sql.push_str(&format!(" AND {} > ?{}", column, args.len()));
    }
}

fn push_limit(sql: &mut String, args: &mut Vec<Value>, query: &PostQuery) {
    if let Some(limit) = query.limit {
        args.push(Value::Integer(i64::from(limit)));
        sql.push_str(&format!(" LIMIT ?{}", args.len()));
    }
}
