//! Result-cache trait and statistics
//!
//! The cache is the only shared mutable resource in the pipeline. Entries are
//! idempotent given identical inputs, so last-write-wins races between
//! concurrent identical requests are acceptable.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub mod errors;

pub use errors::{CacheError, CacheResult};

/// Cache statistics for readiness probes and observability
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CacheStats {
	pub total_entries: usize,
	pub live_entries: usize,
}

/// Key-value result cache consulted before the pipeline runs and populated
/// after
#[async_trait]
pub trait ResponseCache: Send + Sync + Debug {
	/// Look up a cached JSON payload; `None` on miss or expired entry
	async fn get_json(&self, key: &str) -> CacheResult<Option<serde_json::Value>>;

	/// Store a JSON payload under the key with the given TTL
	async fn set_json(
		&self,
		key: &str,
		value: &serde_json::Value,
		ttl_seconds: u64,
	) -> CacheResult<()>;

	/// Health check for readiness probes
	async fn health_check(&self) -> CacheResult<bool>;

	/// Entry statistics
	async fn stats(&self) -> CacheResult<CacheStats>;
}
