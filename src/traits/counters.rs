//! Denormalized thread post counter

use crate::error::ServerResult;

/// Keeps `Thread.posts` equal to the number of non-deleted posts.
///
/// Every adjustment is a single atomic statement at the store, applied in the
/// same transaction as the post change that caused it. Nothing outside this
/// trait writes the counter.
pub trait ThreadCounters {
    /// A post was created; no-op when it was created already deleted
    fn on_create(&self, thread_id: i64, is_deleted: bool) -> ServerResult<()>;

    /// A post flipped from live to soft-deleted
    fn on_soft_delete(&self, thread_id: i64) -> ServerResult<()>;

    /// A post flipped from soft-deleted back to live
    fn on_restore(&self, thread_id: i64) -> ServerResult<()>;

    /// Whole thread removed; every post is now deleted
    fn on_thread_removed(&self, thread_id: i64) -> ServerResult<()>;

    /// Repair path: recompute the counter from the post rows
    ///
    /// Only for bulk restore. Steady-state operations use the deltas above.
    fn recount(&self, thread_id: i64) -> ServerResult<i64>;
}
