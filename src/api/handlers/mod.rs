//! HTTP request handlers

mod health;
mod posts;
mod threads;

pub use health::health_check;
pub use posts::{create_post, get_post, list_posts, remove_post, restore_post, update_post, vote_post};
pub use threads::{create_thread, get_thread, remove_thread, restore_thread, thread_posts};
