// File: src/storage/sqlite/ancestry.rs

use super::store::SqliteStore;
use crate::error::{ServerError, ServerResult, StorageError};
use crate::path::MaterializedPath;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;

impl SqliteStore {
    pub(crate) fn resolve_ancestor_id_impl(
        &self,
        post_id: i64,
        path: &MaterializedPath,
        levels_up: usize,
    ) -> ServerResult<i64> {
        let conn = self.get_conn()?;
        AncestorResolver::new(&conn).resolve(post_id, path, levels_up)
    }
}

/// Maps a post's path to the id of one of its ancestors
///
/// Path lookups are cached for the lifetime of the resolver, so one resolver
/// per listing turns repeated parents into a single query each.
pub struct AncestorResolver<'c> {
    conn: &'c Connection,
    cache: HashMap<MaterializedPath, i64>,
}

impl<'c> AncestorResolver<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self {
            conn,
            cache: HashMap::new(),
        }
    }

    /// Id of the ancestor `levels_up` levels above `path`
    ///
    /// Returns `post_id` when `levels_up` is zero or reaches above the root,
    /// which is how "no parent" is signalled. An ancestor at depth 1 is
    /// decoded straight from the root segment without touching the store.
    ///
    /// # Errors
    /// * `ServerError::MalformedPath` - the root segment does not decode
    /// * `StorageError::Corruption` - no row carries the ancestor path
    pub fn resolve(
        &mut self,
        post_id: i64,
        path: &MaterializedPath,
        levels_up: usize,
    ) -> ServerResult<i64> {
        let depth = path.depth();
        if levels_up == 0 || levels_up >= depth {
            return Ok(post_id);
        }

        let target_depth = depth - levels_up;
        if target_depth == 1 {
            let root_id = path.root_id().map_err(|e| {
                tracing::error!(post_id, path = %path, error = %e, "root segment does not decode");
                ServerError::from(e)
            })?;
            return i64::try_from(root_id)
                .map_err(|_| ServerError::MalformedPath(format!("root id {} out of range", root_id)));
        }

        match path.ancestor(target_depth) {
            Some(ancestor) => self.lookup(ancestor),
            None => Ok(post_id),
        }
    }

    /// Parent id, `None` for a root
    pub fn parent_of(&mut self, post_id: i64, path: &MaterializedPath) -> ServerResult<Option<i64>> {
        if path.is_root() {
            return Ok(None);
        }
        self.resolve(post_id, path, 1).map(Some)
    }

    fn lookup(&mut self, ancestor: MaterializedPath) -> ServerResult<i64> {
        if let Some(id) = self.cache.get(&ancestor) {
            return Ok(*id);
        }

        let id: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM post WHERE path = ?1",
                params![ancestor.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        let id = id.ok_or_else(|| {
            tracing::error!(path = %ancestor, "ancestor path has no post");
            ServerError::Storage(StorageError::Corruption(format!(
                "no post at ancestor path {}",
                ancestor
            )))
        })?;

        self.cache.insert(ancestor, id);
        Ok(id)
    }
}
