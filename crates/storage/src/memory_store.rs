//! In-memory cache implementation using DashMap with TTL support

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use shoptalk_types::cache::{CacheResult, CacheStats, ResponseCache};
use std::sync::Arc;
use tokio::time::interval;
use tracing::debug;

/// One cached reply payload with its expiry
#[derive(Debug, Clone)]
struct CacheEntry {
	value: serde_json::Value,
	expires_at: DateTime<Utc>,
}

impl CacheEntry {
	fn is_expired(&self, now: DateTime<Utc>) -> bool {
		self.expires_at <= now
	}
}

/// In-memory reply cache with TTL support
///
/// The default store for development and tests. Expired entries are dropped
/// lazily on read and swept periodically by the cleanup task.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
	entries: Arc<DashMap<String, CacheEntry>>,
}

impl MemoryStore {
	/// Create a new memory store instance
	pub fn new() -> Self {
		Self {
			entries: Arc::new(DashMap::new()),
		}
	}

	/// Start the periodic sweep of expired entries
	pub fn start_ttl_cleanup(&self) -> tokio::task::JoinHandle<()> {
		let entries = Arc::clone(&self.entries);
		tokio::spawn(async move {
			let mut cleanup_interval = interval(tokio::time::Duration::from_secs(60));

			loop {
				cleanup_interval.tick().await;

				let now = Utc::now();
				let before = entries.len();
				entries.retain(|_key, entry| !entry.is_expired(now));
				let removed = before.saturating_sub(entries.len());
				if removed > 0 {
					debug!("Cleaned up {} expired cache entries", removed);
				}
			}
		})
	}
}

#[async_trait]
impl ResponseCache for MemoryStore {
	async fn get_json(&self, key: &str) -> CacheResult<Option<serde_json::Value>> {
		let now = Utc::now();
		// The read guard must be released before removing an expired entry
		let expired = match self.entries.get(key) {
			Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
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
		let entry = CacheEntry {
			value: value.clone(),
			expires_at: Utc::now() + Duration::seconds(ttl_seconds as i64),
		};
		self.entries.insert(key.to_string(), entry);
		Ok(())
	}

	async fn health_check(&self) -> CacheResult<bool> {
		Ok(true)
	}

	async fn stats(&self) -> CacheResult<CacheStats> {
		let now = Utc::now();
		let total = self.entries.len();
		let live = self
			.entries
			.iter()
			.filter(|entry| !entry.value().is_expired(now))
			.count();
		Ok(CacheStats {
			total_entries: total,
			live_entries: live,
		})
	}
}
