//! HTTP client cache for optimized connection management
//!
//! Provides per-endpoint client instances with connection pooling and
//! keep-alive optimization.

use dashmap::DashMap;
use reqwest::{Client, ClientBuilder};
use shoptalk_types::{SearchError, SearchResult};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Configuration for creating optimized HTTP clients
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientConfig {
	/// Base endpoint the client talks to
	pub base_url: String,
	/// Logical client identifier for cache differentiation
	pub client_id: String,
	/// Maximum number of idle connections per host
	pub max_idle_per_host: usize,
	/// Connection keep-alive timeout
	pub keep_alive_timeout_ms: u64,
	/// Request timeout
	pub request_timeout_ms: u64,
}

impl ClientConfig {
	pub fn new(base_url: &str, client_id: &str, request_timeout_ms: u64) -> Self {
		Self {
			base_url: base_url.to_string(),
			client_id: client_id.to_string(),
			max_idle_per_host: 10,
			keep_alive_timeout_ms: 90_000,
			request_timeout_ms,
		}
	}
}

/// Cached client with creation timestamp for TTL management
#[derive(Debug, Clone)]
struct CachedClient {
	client: Arc<Client>,
	created_at: Instant,
}

impl CachedClient {
	fn new(client: Client) -> Self {
		Self {
			client: Arc::new(client),
			created_at: Instant::now(),
		}
	}

	fn is_expired(&self, ttl: Duration) -> bool {
		self.created_at.elapsed() > ttl
	}
}

/// Thread-safe cache for HTTP clients keyed by endpoint configuration
#[derive(Clone, Debug)]
pub struct ClientCache {
	clients: Arc<DashMap<ClientConfig, CachedClient>>,
	ttl: Duration,
}

impl ClientCache {
	/// Create a new client cache with default 30-minute TTL
	pub fn new() -> Self {
		Self {
			clients: Arc::new(DashMap::new()),
			ttl: Duration::from_secs(30 * 60),
		}
	}

	/// Create a client cache with a custom TTL
	pub fn with_ttl(ttl: Duration) -> Self {
		Self {
			clients: Arc::new(DashMap::new()),
			ttl,
		}
	}

	/// Get or build a pooled client for the given configuration
	pub fn client_for(&self, config: &ClientConfig) -> SearchResult<Arc<Client>> {
		if let Some(cached) = self.clients.get(config) {
			if !cached.is_expired(self.ttl) {
				debug!("Reusing cached HTTP client for {}", config.client_id);
				return Ok(Arc::clone(&cached.client));
			}
		}
		self.clients.remove(config);

		let client = Self::build_client(config)?;
		let cached = CachedClient::new(client);
		let handle = Arc::clone(&cached.client);
		self.clients.insert(config.clone(), cached);
		debug!("Built new HTTP client for {}", config.client_id);
		Ok(handle)
	}

	fn build_client(config: &ClientConfig) -> SearchResult<Client> {
		ClientBuilder::new()
			.pool_max_idle_per_host(config.max_idle_per_host)
			.pool_idle_timeout(Duration::from_millis(config.keep_alive_timeout_ms))
			.timeout(Duration::from_millis(config.request_timeout_ms))
			.user_agent(concat!("shoptalk/", env!("CARGO_PKG_VERSION")))
			.build()
			.map_err(|e| {
				warn!("Failed to build HTTP client: {}", e);
				SearchError::Unavailable {
					reason: e.to_string(),
				}
			})
	}

	/// Number of cached clients, for tests
	pub fn len(&self) -> usize {
		self.clients.len()
	}

	pub fn is_empty(&self) -> bool {
		self.clients.is_empty()
	}
}

impl Default for ClientCache {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_client_is_reused_within_ttl() {
		let cache = ClientCache::new();
		let config = ClientConfig::new("https://api.example.com", "nlu", 5_000);

		let first = cache.client_for(&config).unwrap();
		let second = cache.client_for(&config).unwrap();
		assert!(Arc::ptr_eq(&first, &second));
		assert_eq!(cache.len(), 1);
	}

	#[test]
	fn test_distinct_configs_get_distinct_clients() {
		let cache = ClientCache::new();
		let nlu = ClientConfig::new("https://api.example.com", "nlu", 5_000);
		let rerank = ClientConfig::new("https://api.example.com", "rerank", 3_000);

		let _ = cache.client_for(&nlu).unwrap();
		let _ = cache.client_for(&rerank).unwrap();
		assert_eq!(cache.len(), 2);
	}
}
