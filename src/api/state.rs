//! Application state shared across HTTP handlers

use std::sync::Arc;

use crate::error::{ServerError, ServerResult};
use crate::traits::ForumStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Thread and post storage
    pub store: Arc<dyn ForumStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ForumStore>) -> Self {
        Self { store }
    }

    /// Run a store operation off the async runtime
    ///
    /// The store is synchronous (SQLite), so each call goes through
    /// `spawn_blocking`.
    pub async fn with_store<T, F>(&self, op: F) -> ServerResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn ForumStore) -> ServerResult<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(store.as_ref()))
            .await
            .map_err(|e| ServerError::Internal(format!("spawn_blocking failed: {}", e)))?
    }
}
