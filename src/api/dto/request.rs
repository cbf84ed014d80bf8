//! Request DTOs

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::error::{ServerError, ServerResult};
use crate::traits::{
    NewPost, NewThread, PostFilter, PostFlags, PostQuery, SortMode, SortOrder, DATE_FORMAT,
};

/// Request body for POST /v1/threads
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateThreadRequest {
    pub forum: String,
    pub title: String,
    pub user: String,

    /// "YYYY-MM-DD HH:MM:SS"
    pub date: String,
    pub message: String,
    pub slug: String,

    #[serde(default)]
    pub is_closed: bool,

    #[serde(default)]
    pub is_deleted: bool,
}

impl CreateThreadRequest {
    pub fn into_new_thread(self) -> ServerResult<NewThread> {
        Ok(NewThread {
            date: parse_date(&self.date)?,
            forum: self.forum,
            title: self.title,
            user: self.user,
            message: self.message,
            slug: self.slug,
            is_closed: self.is_closed,
            is_deleted: self.is_deleted,
        })
    }
}

/// Request body for POST /v1/posts
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub thread: i64,
    pub forum: String,
    pub user: String,

    /// "YYYY-MM-DD HH:MM:SS"
    pub date: String,
    pub message: String,

    /// Post being replied to; absent or null for a new root
    #[serde(default)]
    pub parent: Option<i64>,

    #[serde(default)]
    pub is_approved: bool,
    #[serde(default)]
    pub is_highlighted: bool,
    #[serde(default)]
    pub is_edited: bool,
    #[serde(default)]
    pub is_spam: bool,
    #[serde(default)]
    pub is_deleted: bool,
}

impl CreatePostRequest {
    pub fn into_new_post(self) -> ServerResult<NewPost> {
        Ok(NewPost {
            date: parse_date(&self.date)?,
            thread: self.thread,
            forum: self.forum,
            user: self.user,
            message: self.message,
            flags: PostFlags {
                is_approved: self.is_approved,
                is_highlighted: self.is_highlighted,
                is_edited: self.is_edited,
                is_spam: self.is_spam,
                is_deleted: self.is_deleted,
            },
            parent: self.parent,
        })
    }
}

/// Request body for POST /v1/posts/:id/update
#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub message: String,
}

/// Request body for POST /v1/posts/:id/vote
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    /// 1 (like) or -1 (dislike)
    pub vote: i64,
}

/// Query string shared by post listings
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub sort: Option<String>,
    pub order: Option<String>,
    pub since: Option<String>,
    pub limit: Option<u32>,

    // GET /v1/posts only: exactly one of these selects the listing
    pub thread: Option<i64>,
    pub user: Option<String>,
    pub forum: Option<String>,
}

impl ListParams {
    pub fn to_query(&self) -> ServerResult<PostQuery> {
        Ok(PostQuery {
            sort: self
                .sort
                .as_deref()
                .map(str::parse::<SortMode>)
                .transpose()?
                .unwrap_or_default(),
            order: self
                .order
                .as_deref()
                .map(str::parse::<SortOrder>)
                .transpose()?
                .unwrap_or_default(),
            since: self.since.as_deref().map(parse_date).transpose()?,
            limit: self.limit,
        })
    }

    pub fn to_filter(&self) -> ServerResult<PostFilter> {
        match (&self.thread, &self.user, &self.forum) {
            (Some(thread), None, None) => Ok(PostFilter::Thread(*thread)),
            (None, Some(user), None) => Ok(PostFilter::User(user.clone())),
            (None, None, Some(forum)) => Ok(PostFilter::Forum(forum.clone())),
            _ => Err(ServerError::InvalidArgument(
                "exactly one of thread, user or forum is required".into(),
            )),
        }
    }
}

fn parse_date(raw: &str) -> ServerResult<NaiveDateTime> {
    Ok(NaiveDateTime::parse_from_str(raw, DATE_FORMAT)?)
}
