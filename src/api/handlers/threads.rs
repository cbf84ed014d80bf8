//! Thread endpoint handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::api::dto::{CreateThreadRequest, ListParams, PostDto, ThreadDto, ThreadStateResponse};
use crate::api::state::AppState;
use crate::error::ServerError;

/// POST /v1/threads - Create a thread
pub async fn create_thread(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateThreadRequest>,
) -> Result<(StatusCode, Json<ThreadDto>), ServerError> {
    let new_thread = req.into_new_thread()?;
    let thread = state
        .with_store(move |store| store.create_thread(new_thread))
        .await?;
    Ok((StatusCode::CREATED, Json(thread.into())))
}

/// GET /v1/threads/:id - Thread details with its live post counter
pub async fn get_thread(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ThreadDto>, ServerError> {
    let thread = state.with_store(move |store| store.get_thread(id)).await?;
    Ok(Json(thread.into()))
}

/// GET /v1/threads/:id/posts - Posts of a thread in flat, tree or
/// parent-tree order
///
/// An existing thread with no posts returns `[]`; an unknown thread is 404.
pub async fn thread_posts(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<PostDto>>, ServerError> {
    let query = params.to_query()?;
    let posts = state
        .with_store(move |store| store.thread_posts(id, &query))
        .await?;
    Ok(Json(posts.into_iter().map(PostDto::from).collect()))
}

/// POST /v1/threads/:id/remove - Soft-delete a thread and all its posts
pub async fn remove_thread(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ThreadStateResponse>, ServerError> {
    state.with_store(move |store| store.remove_thread(id)).await?;
    Ok(Json(ThreadStateResponse { thread: id }))
}

/// POST /v1/threads/:id/restore - Restore a thread and all its posts
pub async fn restore_thread(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ThreadStateResponse>, ServerError> {
    state.with_store(move |store| store.restore_thread(id)).await?;
    Ok(Json(ThreadStateResponse { thread: id }))
}
