//! HTTP handlers

pub mod chat;
pub mod common;
pub mod health;

pub use chat::post_chat;
pub use common::ErrorResponse;
pub use health::{health, ready};
