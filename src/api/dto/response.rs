//! Response DTOs

use serde::Serialize;

use crate::traits::{Post, Thread, DATE_FORMAT};

/// A post as returned by the API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDto {
    pub id: i64,
    pub thread: i64,
    pub forum: String,
    pub user: String,
    pub date: String,
    pub message: String,

    /// Null for a root post
    pub parent: Option<i64>,

    pub is_approved: bool,
    pub is_highlighted: bool,
    pub is_edited: bool,
    pub is_spam: bool,
    pub is_deleted: bool,
    pub likes: i64,
    pub dislikes: i64,
    pub points: i64,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            thread: post.thread,
            forum: post.forum,
            user: post.user,
            date: post.date.format(DATE_FORMAT).to_string(),
            message: post.message,
            parent: post.parent,
            is_approved: post.flags.is_approved,
            is_highlighted: post.flags.is_highlighted,
            is_edited: post.flags.is_edited,
            is_spam: post.flags.is_spam,
            is_deleted: post.flags.is_deleted,
            likes: post.likes,
            dislikes: post.dislikes,
            points: post.points,
        }
    }
}

/// A thread as returned by the API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadDto {
    pub id: i64,
    pub forum: String,
    pub title: String,
    pub user: String,
    pub date: String,
    pub message: String,
    pub slug: String,
    pub is_closed: bool,
    pub is_deleted: bool,
    pub likes: i64,
    pub dislikes: i64,
    pub points: i64,
    pub posts: i64,
}

impl From<Thread> for ThreadDto {
    fn from(thread: Thread) -> Self {
        Self {
            id: thread.id,
            forum: thread.forum,
            title: thread.title,
            user: thread.user,
            date: thread.date.format(DATE_FORMAT).to_string(),
            message: thread.message,
            slug: thread.slug,
            is_closed: thread.is_closed,
            is_deleted: thread.is_deleted,
            likes: thread.likes,
            dislikes: thread.dislikes,
            points: thread.points,
            posts: thread.posts,
        }
    }
}

/// Result of POST /v1/posts/:id/{remove,restore}
#[derive(Debug, Serialize)]
pub struct PostStateResponse {
    pub post: i64,

    /// False when the post was already in the requested state
    pub changed: bool,
}

/// Result of POST /v1/threads/:id/{remove,restore}
#[derive(Debug, Serialize)]
pub struct ThreadStateResponse {
    pub thread: i64,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "unhealthy"
    pub status: String,

    /// Error message if unhealthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
