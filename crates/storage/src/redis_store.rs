//! Redis cache implementation for production use

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use shoptalk_types::cache::{CacheError, CacheResult, CacheStats, ResponseCache};
use std::sync::Arc;

/// Redis-based reply cache
///
/// This is the shape of a Redis-backed implementation of the cache trait.
/// In a real deployment the map below is replaced by a `redis-rs` connection
/// pool; the keyspace layout is one string value per reply key with EXPIRE.
#[derive(Debug, Clone)]
pub struct RedisStore {
	connection_url: String,
	// Simulated Redis keyspace for demo purposes
	entries: Arc<DashMap<String, (serde_json::Value, DateTime<Utc>)>>,
}

impl RedisStore {
	/// Create a new Redis store with connection URL
	pub fn new(connection_url: String) -> Self {
		Self {
			connection_url,
			entries: Arc::new(DashMap::new()),
		}
	}

	/// Create Redis store with default connection
	pub fn with_defaults() -> Self {
		Self::new("redis://localhost:6379".to_string())
	}

	/// Get connection URL for debugging
	pub fn connection_url(&self) -> &str {
		&self.connection_url
	}
}

#[async_trait]
impl ResponseCache for RedisStore {
	async fn get_json(&self, key: &str) -> CacheResult<Option<serde_json::Value>> {
		// In real implementation: GET {key}; expiry is handled by Redis
		let now = Utc::now();
		let expired = match self.entries.get(key) {
			Some(entry) if entry.1 > now => return Ok(Some(entry.0.clone())),
			Some(_) => true,
			None => false,
		};
		if expired {
			self.entries.remove(key);
		}
		Ok(None)
	}

	async fn set_json(
		&self,
		key: &str,
		value: &serde_json::Value,
		ttl_seconds: u64,
	) -> CacheResult<()> {
		// In real implementation: SET {key} {payload} EX {ttl_seconds}
		let expires_at = Utc::now() + Duration::seconds(ttl_seconds as i64);
		self.entries
			.insert(key.to_string(), (value.clone(), expires_at));
		Ok(())
	}

	async fn health_check(&self) -> CacheResult<bool> {
		// In real implementation: PING
		Ok(true)
	}

	async fn stats(&self) -> CacheResult<CacheStats> {
		// In real implementation: DBSIZE plus a live-key counter
		let now = Utc::now();
		let total = self.entries.len();
		let live = self
			.entries
			.iter()
			.filter(|entry| entry.value().1 > now)
			.count();
		Ok(CacheStats {
			total_entries: total,
			live_entries: live,
		})
	}
}

/// Configuration for Redis storage
#[derive(Debug, Clone)]
pub struct RedisConfig {
	pub connection_url: String,
	pub pool_size: u32,
	pub timeout_ms: u64,
}

impl Default for RedisConfig {
	fn default() -> Self {
		Self {
			connection_url: "redis://localhost:6379".to_string(),
			pool_size: 10,
			timeout_ms: 5000,
		}
	}
}

impl RedisConfig {
	pub fn new(connection_url: String) -> Self {
		Self {
			connection_url,
			..Default::default()
		}
	}

	pub async fn connect(&self) -> Result<RedisStore, CacheError> {
		// In real implementation: create the connection pool here
		Ok(RedisStore::new(self.connection_url.clone()))
	}
}
