// File: src/path/materialized.rs

use std::fmt;

use super::codec::{self, PathError, SEGMENT_WIDTH};

/// Sorts after every alphabet symbol; closes prefix range scans.
pub const PREFIX_UPPER_SENTINEL: char = '\u{7f}';

/// A validated materialized path: one fixed-width segment per tree level.
///
/// The first segment of a root path is the root post's own id. Every later
/// segment is the 1-based sibling index of the node at that depth. Because
/// segments are order-preserving and fixed-width, ordinary string ordering of
/// two paths is pre-order tree ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MaterializedPath(String);

impl MaterializedPath {
    /// Validate a stored path.
    pub fn parse(raw: impl Into<String>) -> Result<Self, PathError> {
        let raw = raw.into();
        if raw.is_empty() || raw.len() % SEGMENT_WIDTH != 0 {
            return Err(PathError::InvalidLength {
                expected: "a non-zero multiple of 5",
                actual: raw.len(),
            });
        }
        codec::validate_symbols(&raw)?;
        Ok(Self(raw))
    }

    /// Path of a root post, derived from its own id.
    pub fn root(post_id: u64) -> Result<Self, PathError> {
        codec::encode(post_id).map(Self)
    }

    /// Path of the child at `sibling_index` under this node.
    pub fn child(&self, sibling_index: u64) -> Result<Self, PathError> {
        let segment = codec::encode(sibling_index)?;
        let mut path = String::with_capacity(self.0.len() + SEGMENT_WIDTH);
        path.push_str(&self.0);
        path.push_str(&segment);
        Ok(Self(path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Number of levels, a root being depth 1.
    pub fn depth(&self) -> usize {
        self.0.len() / SEGMENT_WIDTH
    }

    pub fn is_root(&self) -> bool {
        self.depth() == 1
    }

    /// Segment at a 1-based depth.
    pub fn segment(&self, depth: usize) -> Option<&str> {
        if depth == 0 || depth > self.depth() {
            return None;
        }
        let start = (depth - 1) * SEGMENT_WIDTH;
        Some(&self.0[start..start + SEGMENT_WIDTH])
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        // Validated paths are pure ASCII, so every chunk is valid UTF-8
        self.0
            .as_bytes()
            .chunks(SEGMENT_WIDTH)
            .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
    }

    /// First segment; groups a post under its top-level root.
    pub fn root_segment(&self) -> &str {
        &self.0[..SEGMENT_WIDTH]
    }

    pub fn last_segment(&self) -> &str {
        &self.0[self.0.len() - SEGMENT_WIDTH..]
    }

    /// Id of the root post this path descends from.
    pub fn root_id(&self) -> Result<u64, PathError> {
        codec::decode(self.root_segment())
    }

    /// Sibling index encoded in the trailing segment.
    ///
    /// For a root path this is the root's own id.
    pub fn sibling_index(&self) -> Result<u64, PathError> {
        codec::decode(self.last_segment())
    }

    /// Prefix of this path at a 1-based depth.
    pub fn ancestor(&self, depth: usize) -> Option<Self> {
        if depth == 0 || depth > self.depth() {
            return None;
        }
        Some(Self(self.0[..depth * SEGMENT_WIDTH].to_string()))
    }

    /// Path of the immediate parent, `None` for a root.
    pub fn parent(&self) -> Option<Self> {
        self.ancestor(self.depth() - 1)
    }

    /// True when `other` lies strictly below this node.
    pub fn is_ancestor_of(&self, other: &MaterializedPath) -> bool {
        other.0.len() > self.0.len() && other.0.starts_with(&self.0)
    }

    /// Exclusive `(lower, upper)` string bounds matching every strict
    /// descendant of this node under binary collation.
    pub fn descendant_bounds(&self) -> (String, String) {
        let mut upper = String::with_capacity(self.0.len() + 1);
        upper.push_str(&self.0);
        upper.push(PREFIX_UPPER_SENTINEL);
        (self.0.clone(), upper)
    }
}

impl fmt::Display for MaterializedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Paths start with padding spaces, so quote them for readability
        write!(f, "{:?}", self.0)
    }
}

impl AsRef<str> for MaterializedPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
