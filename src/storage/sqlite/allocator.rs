// File: src/storage/sqlite/allocator.rs

use crate::error::{ServerError, ServerResult};
use crate::path::{MaterializedPath, MAX_VALUE, SEGMENT_WIDTH};
use rusqlite::{params, Connection};

/// Picks the next free sibling segment under a parent
///
/// The result is only safe to insert when the read and the insert share one
/// write transaction; the unique index on `post.path` catches anything that
/// slips past.
pub struct SiblingAllocator<'c> {
    conn: &'c Connection,
}

impl<'c> SiblingAllocator<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Path for the next child of `parent`
    ///
    /// Indices start at 1 and are never reused: the highest existing child
    /// (deleted or not) determines the next one.
    ///
    /// # Errors
    /// * `ServerError::AllocationExhausted` - the parent already has a child at
    ///   the maximum segment value
    /// * `ServerError::MalformedPath` - the stored last child does not decode
    pub fn allocate(&self, parent: &MaterializedPath) -> ServerResult<MaterializedPath> {
        let next_index = match self.last_child(parent)? {
            None => 1,
            Some(last) => {
                let index = last.sibling_index().map_err(|e| {
                    tracing::error!(path = %last, error = %e, "sibling segment does not decode");
                    ServerError::from(e)
                })?;
                if index >= MAX_VALUE {
                    tracing::warn!(parent = %parent, "sibling segments exhausted");
                    return Err(ServerError::AllocationExhausted(format!(
                        "no free sibling segment under {}",
                        parent
                    )));
                }
                index + 1
            }
        };

        Ok(parent.child(next_index)?)
    }

    /// Greatest direct child path of `parent`, if any
    fn last_child(&self, parent: &MaterializedPath) -> ServerResult<Option<MaterializedPath>> {
        let (lower, upper) = parent.descendant_bounds();
        let child_len = (parent.as_str().len() + SEGMENT_WIDTH) as i64;

        let raw: Option<String> = self.conn.query_row(
            "SELECT MAX(path) FROM post WHERE path > ?1 AND path < ?2 AND length(path) = ?3",
            params![lower, upper, child_len],
            |row| row.get(0),
        )?;

        raw.map(|raw| {
            MaterializedPath::parse(raw.as_str()).map_err(|e| {
                tracing::error!(path = ?raw, error = %e, "stored child path is malformed");
                ServerError::from(e)
            })
        })
        .transpose()
    }
}
