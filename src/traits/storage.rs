//! Forum storage trait definition

use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::error::{ServerError, ServerResult};
use crate::path::MaterializedPath;

/// Wire and storage format of post/thread dates
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Moderation flags carried by a post
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostFlags {
    pub is_approved: bool,
    pub is_highlighted: bool,
    pub is_edited: bool,
    pub is_spam: bool,
    pub is_deleted: bool,
}

/// A post (stored in the database)
#[derive(Debug, Clone)]
pub struct Post {
    /// Store-assigned identity, never reused
    pub id: i64,

    pub thread: i64,
    pub forum: String,
    pub user: String,
    pub date: NaiveDateTime,
    pub message: String,

    /// Position in the reply tree, fixed at creation
    pub path: MaterializedPath,

    /// Id of the post this one replies to (None for a root)
    pub parent: Option<i64>,

    pub flags: PostFlags,
    pub likes: i64,
    pub dislikes: i64,
    pub points: i64,
}

/// Parameters for creating a post
#[derive(Debug, Clone)]
pub struct NewPost {
    pub thread: i64,
    pub forum: String,
    pub user: String,
    pub date: NaiveDateTime,
    pub message: String,
    pub flags: PostFlags,

    /// Post being replied to; `None` starts a new root
    pub parent: Option<i64>,
}

/// A discussion thread
#[derive(Debug, Clone)]
pub struct Thread {
    pub id: i64,
    pub forum: String,
    pub title: String,
    pub user: String,
    pub date: NaiveDateTime,
    pub message: String,
    pub slug: String,
    pub is_closed: bool,
    pub is_deleted: bool,
    pub likes: i64,
    pub dislikes: i64,
    pub points: i64,

    /// Number of non-deleted posts, maintained by `ThreadCounters`
    pub posts: i64,
}

/// Parameters for creating a thread
#[derive(Debug, Clone)]
pub struct NewThread {
    pub forum: String,
    pub title: String,
    pub user: String,
    pub date: NaiveDateTime,
    pub message: String,
    pub slug: String,
    pub is_closed: bool,
    pub is_deleted: bool,
}

/// Presentation order for a thread's posts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// By creation date
    #[default]
    Flat,
    /// Grouped by root, then depth-first by path
    Tree,
    /// Root groups (paged by root), each followed by its descendants
    ParentTree,
}

impl FromStr for SortMode {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flat" => Ok(SortMode::Flat),
            "tree" => Ok(SortMode::Tree),
            "parent_tree" => Ok(SortMode::ParentTree),
            other => Err(ServerError::InvalidArgument(format!(
                "unknown sort mode: {}",
                other
            ))),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(ServerError::InvalidArgument(format!(
                "unknown sort order: {}",
                s
            ))),
        }
    }
}

/// Options shared by all post listings
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    pub sort: SortMode,
    pub order: SortOrder,

    /// Only posts (or, for parent-tree, roots) dated strictly after this
    pub since: Option<NaiveDateTime>,

    pub limit: Option<u32>,
}

/// Which posts a flat listing covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostFilter {
    Thread(i64),
    User(String),
    Forum(String),
}

/// A vote on a post
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vote {
    Like,
    Dislike,
}

impl TryFrom<i64> for Vote {
    type Error = ServerError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Vote::Like),
            -1 => Ok(Vote::Dislike),
            other => Err(ServerError::InvalidArgument(format!(
                "vote must be 1 or -1, got {}",
                other
            ))),
        }
    }
}

/// Storage backend for threads and their reply trees
///
/// Implementations own path assignment: `create_post` is the only operation
/// that writes a post's path.
pub trait ForumStore: Send + Sync + 'static {
    /// Check if the store is reachable and its schema present
    fn is_initialized(&self) -> bool;

    /// Create a thread with a zero post counter
    fn create_thread(&self, thread: NewThread) -> ServerResult<Thread>;

    /// Get a thread by id
    ///
    /// # Errors
    /// * `ServerError::ThreadNotFound` - no such thread
    fn get_thread(&self, id: i64) -> ServerResult<Thread>;

    /// Soft-delete a thread and all of its posts
    fn remove_thread(&self, id: i64) -> ServerResult<()>;

    /// Restore a thread and all of its posts, recounting the post counter
    fn restore_thread(&self, id: i64) -> ServerResult<()>;

    /// Create a post, assigning its materialized path
    ///
    /// # Errors
    /// * `ServerError::ThreadNotFound` - thread does not exist
    /// * `ServerError::PostNotFound` - referenced parent does not exist
    /// * `ServerError::AllocationExhausted` - no segment left under the parent
    fn create_post(&self, post: NewPost) -> ServerResult<Post>;

    /// Get a post by id, with its parent id resolved
    fn get_post(&self, id: i64) -> ServerResult<Post>;

    /// Soft-delete a post. Returns false if it was already deleted.
    fn remove_post(&self, id: i64) -> ServerResult<bool>;

    /// Restore a soft-deleted post. Returns false if it was not deleted.
    fn restore_post(&self, id: i64) -> ServerResult<bool>;

    /// Replace a post's message
    fn update_post(&self, id: i64, message: &str) -> ServerResult<Post>;

    /// Record a vote on a post
    fn vote_post(&self, id: i64, vote: Vote) -> ServerResult<Post>;

    /// All posts of a thread in the requested presentation order
    ///
    /// An existing thread with no posts yields an empty vector.
    ///
    /// # Errors
    /// * `ServerError::ThreadNotFound` - thread does not exist
    fn thread_posts(&self, thread_id: i64, query: &PostQuery) -> ServerResult<Vec<Post>>;

    /// Flat, date-ordered listing by thread, user or forum
    fn list_posts(&self, filter: &PostFilter, query: &PostQuery) -> ServerResult<Vec<Post>>;

    /// Id of the ancestor `levels_up` levels above a post
    ///
    /// Returns `post_id` itself when the requested level is above the root.
    fn resolve_ancestor_id(
        &self,
        post_id: i64,
        path: &MaterializedPath,
        levels_up: usize,
    ) -> ServerResult<i64>;
}
