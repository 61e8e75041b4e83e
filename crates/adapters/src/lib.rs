//! Shoptalk Adapters
//!
//! HTTP adapters for the shoptalk chat engine's AI collaborators: the
//! language-model endpoint (classification, embedding, reply generation) and
//! the rerank scoring API.

pub mod client_cache;
pub mod nlu_http;
pub mod rerank;

pub use client_cache::{ClientCache, ClientConfig};
pub use nlu_http::HttpLanguageModel;
pub use rerank::HttpReranker;
