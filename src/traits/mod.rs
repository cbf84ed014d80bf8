//! Trait definitions for storage and counters

pub mod counters;
pub mod storage;

pub use counters::ThreadCounters;
pub use storage::{
    ForumStore, NewPost, NewThread, Post, PostFilter, PostFlags, PostQuery, SortMode, SortOrder,
    Thread, Vote, DATE_FORMAT,
};
