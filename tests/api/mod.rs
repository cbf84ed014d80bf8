//! API integration tests
//!
//! Tests for HTTP endpoints:
//! - GET /health
//! - /v1/threads (create, get, posts listing, remove/restore)
//! - /v1/posts (create, get, list, remove/restore, update, vote)

pub mod health_test;
pub mod posts_test;
