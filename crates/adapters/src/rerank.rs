//! Thin HTTP wrapper around a third-party rerank scoring API

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use shoptalk_types::{KnowledgeSource, Reranker, SearchError, SearchResult, SecretString};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::client_cache::{ClientCache, ClientConfig};

/// Rerank API response shape
#[derive(Debug, Deserialize)]
struct RerankResponse {
	results: Vec<RerankRow>,
}

#[derive(Debug, Deserialize)]
struct RerankRow {
	index: usize,
	relevance_score: f64,
}

/// HTTP reranker over a scoring API
///
/// Disabled instances short-circuit with `RerankDisabled`; the pipeline
/// degrades to the original source ordering on any rerank failure.
#[derive(Debug)]
pub struct HttpReranker {
	enabled: bool,
	endpoint: String,
	model: String,
	api_key: Option<SecretString>,
	timeout_ms: u64,
	client_cache: ClientCache,
}

impl HttpReranker {
	pub fn new(
		enabled: bool,
		endpoint: String,
		model: String,
		api_key: Option<SecretString>,
		timeout_ms: u64,
	) -> Self {
		Self {
			enabled,
			endpoint,
			model,
			api_key,
			timeout_ms,
			client_cache: ClientCache::new(),
		}
	}

	/// A reranker that never runs; used when no scoring API is configured
	pub fn disabled() -> Self {
		Self::new(false, String::new(), String::new(), None, 0)
	}

	fn client(&self) -> SearchResult<Arc<Client>> {
		let config = ClientConfig::new(&self.endpoint, "rerank", self.timeout_ms);
		self.client_cache.client_for(&config)
	}
}

#[async_trait]
impl Reranker for HttpReranker {
	fn is_enabled(&self) -> bool {
		self.enabled
	}

	async fn rescore(
		&self,
		query: &str,
		sources: Vec<KnowledgeSource>,
	) -> SearchResult<Vec<KnowledgeSource>> {
		if !self.enabled {
			return Err(SearchError::RerankDisabled);
		}
		if sources.len() < 2 {
			return Ok(sources);
		}

		let documents: Vec<&str> = sources.iter().map(|s| s.snippet.as_str()).collect();
		let body = json!({
			"model": self.model,
			"query": query,
			"documents": documents,
			"top_n": documents.len(),
		});

		let client = self.client()?;
		let mut request = client.post(&self.endpoint).json(&body);
		if let Some(key) = &self.api_key {
			request = request.bearer_auth(key.expose_secret());
		}

		let response = request.send().await.map_err(|e| {
			warn!("Rerank request failed: {}", e);
			SearchError::Unavailable {
				reason: e.to_string(),
			}
		})?;

		let status = response.status();
		if !status.is_success() {
			let message = response.text().await.unwrap_or_default();
			return Err(SearchError::Http {
				status: status.as_u16(),
				message,
			});
		}

		let parsed: RerankResponse = response.json().await.map_err(|e| {
			SearchError::Unavailable {
				reason: e.to_string(),
			}
		})?;

		// Reorder by the scoring API's ranking, dropping rows pointing
		// outside the input
		let mut reordered = Vec::with_capacity(sources.len());
		let mut taken = vec![false; sources.len()];
		for row in &parsed.results {
			if let Some(source) = sources.get(row.index) {
				if !taken[row.index] {
					taken[row.index] = true;
					let mut source = source.clone();
					source.relevance = row.relevance_score.clamp(0.0, 1.0);
					reordered.push(source);
				}
			}
		}
		// Anything the API did not mention keeps its original order at the end
		for (idx, source) in sources.into_iter().enumerate() {
			if !taken[idx] {
				reordered.push(source);
			}
		}

		debug!("Reranked {} sources for query", reordered.len());
		Ok(reordered)
	}
}
