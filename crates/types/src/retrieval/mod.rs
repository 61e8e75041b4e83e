//! Collaborator traits for catalog search, knowledge search and reranking
//!
//! These traits are the seams to the persistent store and the scoring API.
//! Production wires vector-index-backed implementations; tests and demos use
//! in-process mocks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;

use crate::knowledge::{KnowledgeRetrieval, KnowledgeSource};
use crate::products::ProductHit;

pub mod errors;

pub use errors::{SearchError, SearchResult};

/// Timing breakdown returned by search calls, for observability
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchTimings {
	pub search_ms: u64,
	pub total_ms: u64,
}

/// Result of one vector search over the product index
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VectorSearchResult {
	pub hits: Vec<ProductHit>,
	/// Smallest distance among the hits; `None` when nothing matched
	pub best_distance: Option<f64>,
	pub timings: SearchTimings,
}

/// Catalog search capability
///
/// Covers vector similarity search, direct SKU lookup and the two bulk loads
/// used by the field dependency resolver.
#[async_trait]
pub trait CatalogSearch: Send + Sync + Debug {
	/// Vector similarity search over the product index
	async fn vector_search(
		&self,
		embedding: &[f32],
		limit: usize,
		candidate_limit: Option<usize>,
	) -> SearchResult<VectorSearchResult>;

	/// Direct lookup of a product by SKU
	async fn product_by_sku(&self, sku: &str) -> SearchResult<Option<ProductHit>>;

	/// Bulk load of base product rows by id (one round trip)
	async fn fetch_products(&self, ids: &[String]) -> SearchResult<Vec<ProductHit>>;

	/// Bulk load of the extended attribute set by id (the enrichment round
	/// trip; called at most once per request)
	async fn fetch_attributes(
		&self,
		ids: &[String],
	) -> SearchResult<HashMap<String, BTreeMap<String, serde_json::Value>>>;

	/// Health check for readiness probes
	async fn health_check(&self) -> bool {
		true
	}
}

/// Knowledge-base search capability
#[async_trait]
pub trait KnowledgeSearch: Send + Sync + Debug {
	/// Single-shot similarity search over the knowledge index
	async fn search(
		&self,
		query: &str,
		embedding: &[f32],
		limit: usize,
		category: Option<&str>,
	) -> SearchResult<Vec<KnowledgeSource>>;

	/// Multi-hop retrieval for policy questions
	///
	/// Default implementation degrades to a single-shot search with no
	/// decomposition. Override when the backing store supports question
	/// decomposition.
	async fn retrieve(
		&self,
		query: &str,
		embedding: &[f32],
		limit: usize,
	) -> SearchResult<KnowledgeRetrieval> {
		let sources = self.search(query, embedding, limit, None).await?;
		Ok(KnowledgeRetrieval::simple(sources))
	}

	/// Health check for readiness probes
	async fn health_check(&self) -> bool {
		true
	}
}

/// Thin wrapper over a third-party scoring API
///
/// Rerank failures degrade to the original ordering; a disabled reranker is
/// skipped entirely.
#[async_trait]
pub trait Reranker: Send + Sync + Debug {
	/// Whether the reranker is usable; disabled instances are skipped
	fn is_enabled(&self) -> bool {
		true
	}

	/// Rescore sources against the query, best first
	async fn rescore(
		&self,
		query: &str,
		sources: Vec<KnowledgeSource>,
	) -> SearchResult<Vec<KnowledgeSource>>;
}
