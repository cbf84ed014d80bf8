//! Post endpoint handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::api::dto::{
    CreatePostRequest, ListParams, PostDto, PostStateResponse, UpdatePostRequest, VoteRequest,
};
use crate::api::state::AppState;
use crate::error::ServerError;
use crate::traits::{PostFilter, SortMode, Vote};

/// POST /v1/posts - Create a post (a root, or a reply when `parent` is set)
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostDto>), ServerError> {
    let new_post = req.into_new_post()?;
    let post = state
        .with_store(move |store| store.create_post(new_post))
        .await?;
    Ok((StatusCode::CREATED, Json(post.into())))
}

/// GET /v1/posts?thread=|user=|forum= - Post listing
///
/// A thread listing accepts every sort mode. User and forum listings are
/// flat only.
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<PostDto>>, ServerError> {
    let filter = params.to_filter()?;
    let query = params.to_query()?;

    let posts = match filter {
        PostFilter::Thread(thread_id) => {
            state
                .with_store(move |store| store.thread_posts(thread_id, &query))
                .await?
        }
        other => {
            if query.sort != SortMode::Flat {
                return Err(ServerError::InvalidArgument(
                    "only flat sort is supported for user and forum listings".into(),
                ));
            }
            state
                .with_store(move |store| store.list_posts(&other, &query))
                .await?
        }
    };

    Ok(Json(posts.into_iter().map(PostDto::from).collect()))
}

/// GET /v1/posts/:id - Post details with parent id
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<PostDto>, ServerError> {
    let post = state.with_store(move |store| store.get_post(id)).await?;
    Ok(Json(post.into()))
}

/// POST /v1/posts/:id/remove - Soft-delete a post
pub async fn remove_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<PostStateResponse>, ServerError> {
    let changed = state.with_store(move |store| store.remove_post(id)).await?;
    Ok(Json(PostStateResponse { post: id, changed }))
}

/// POST /v1/posts/:id/restore - Undelete a post
pub async fn restore_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<PostStateResponse>, ServerError> {
    let changed = state.with_store(move |store| store.restore_post(id)).await?;
    Ok(Json(PostStateResponse { post: id, changed }))
}

/// POST /v1/posts/:id/update - Replace a post's message
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdatePostRequest>,
) -> Result<Json<PostDto>, ServerError> {
    let post = state
        .with_store(move |store| store.update_post(id, &req.message))
        .await?;
    Ok(Json(post.into()))
}

/// POST /v1/posts/:id/vote - Like (1) or dislike (-1) a post
pub async fn vote_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<VoteRequest>,
) -> Result<Json<PostDto>, ServerError> {
    let vote = Vote::try_from(req.vote)?;
    let post = state
        .with_store(move |store| store.vote_post(id, vote))
        .await?;
    Ok(Json(post.into()))
}
