//! Router setup and configuration

use std::sync::Arc;

use axum::{routing::get, routing::post, Router};

use crate::api::handlers;
use crate::api::state::AppState;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    // API v1 routes
    let api_v1 = Router::new()
        // Threads
        .route("/threads", post(handlers::create_thread))
        .route("/threads/:id", get(handlers::get_thread))
        .route("/threads/:id/posts", get(handlers::thread_posts))
        .route("/threads/:id/remove", post(handlers::remove_thread))
        .route("/threads/:id/restore", post(handlers::restore_thread))
        // Posts
        .route(
            "/posts",
            post(handlers::create_post).get(handlers::list_posts),
        )
        .route("/posts/:id", get(handlers::get_post))
        .route("/posts/:id/remove", post(handlers::remove_post))
        .route("/posts/:id/restore", post(handlers::restore_post))
        .route("/posts/:id/update", post(handlers::update_post))
        .route("/posts/:id/vote", post(handlers::vote_post));

    // Mount API v1 under /v1
    Router::new()
        .nest("/v1", api_v1)
        .route("/health", get(handlers::health_check))
        .with_state(state)
}
