//! Data Transfer Objects (DTOs)

mod request;
mod response;

pub use request::{CreatePostRequest, CreateThreadRequest, ListParams, UpdatePostRequest, VoteRequest};
pub use response::{HealthResponse, PostDto, PostStateResponse, ThreadDto, ThreadStateResponse};
