//! Failure- and timing-controlled mock collaborators
//!
//! These wrap the crate's deterministic mocks with knobs for exercising the
//! pipeline's degradation paths: failing classifiers, unavailable catalogs
//! and slow searches.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use shoptalk::async_trait::async_trait;
use shoptalk::types::{
	CatalogSearch, ClassifierError, GeneratedReply, LanguageModel, NluOutput, NluResult,
	ProductHit, ReplyRequest, SearchError, SearchResult, VectorSearchResult,
};

/// Language model whose calls always fail; the pipeline must degrade to the
/// default intent and template replies
#[derive(Debug, Default)]
pub struct FailingLanguageModel {
	calls: Arc<AtomicUsize>,
}

impl FailingLanguageModel {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn call_count(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl LanguageModel for FailingLanguageModel {
	async fn classify(&self, _text: &str, _locale_hint: Option<&str>) -> NluResult<NluOutput> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		Err(ClassifierError::Network("connection refused".to_string()))
	}

	async fn generate_embedding(&self, _text: &str) -> NluResult<Vec<f32>> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		Err(ClassifierError::Network("connection refused".to_string()))
	}

	async fn generate_reply(&self, _request: &ReplyRequest) -> NluResult<GeneratedReply> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		Err(ClassifierError::Network("connection refused".to_string()))
	}

	async fn health_check(&self) -> bool {
		false
	}
}

/// Catalog whose every call errors; the pipeline treats this as "no data"
#[derive(Debug, Default)]
pub struct FailingCatalog;

#[async_trait]
impl CatalogSearch for FailingCatalog {
	async fn vector_search(
		&self,
		_embedding: &[f32],
		_limit: usize,
		_candidate_limit: Option<usize>,
	) -> SearchResult<VectorSearchResult> {
		Err(SearchError::Unavailable {
			reason: "index offline".to_string(),
		})
	}

	async fn product_by_sku(&self, _sku: &str) -> SearchResult<Option<ProductHit>> {
		Err(SearchError::Unavailable {
			reason: "index offline".to_string(),
		})
	}

	async fn fetch_products(&self, _ids: &[String]) -> SearchResult<Vec<ProductHit>> {
		Err(SearchError::Unavailable {
			reason: "index offline".to_string(),
		})
	}

	async fn fetch_attributes(
		&self,
		_ids: &[String],
	) -> SearchResult<HashMap<String, BTreeMap<String, serde_json::Value>>> {
		Err(SearchError::Unavailable {
			reason: "index offline".to_string(),
		})
	}

	async fn health_check(&self) -> bool {
		false
	}
}

/// Catalog that answers after a configurable delay, for timeout tests
#[derive(Debug)]
pub struct SlowCatalog {
	inner: shoptalk::mocks::MockCatalog,
	delay_ms: u64,
}

impl SlowCatalog {
	pub fn new(delay_ms: u64) -> Self {
		Self {
			inner: shoptalk::mocks::MockCatalog::with_demo_products(),
			delay_ms,
		}
	}
}

#[async_trait]
impl CatalogSearch for SlowCatalog {
	async fn vector_search(
		&self,
		embedding: &[f32],
		limit: usize,
		candidate_limit: Option<usize>,
	) -> SearchResult<VectorSearchResult> {
		tokio::time::sleep(tokio::time::Duration::from_millis(self.delay_ms)).await;
		self.inner
			.vector_search(embedding, limit, candidate_limit)
			.await
	}

	async fn product_by_sku(&self, sku: &str) -> SearchResult<Option<ProductHit>> {
		tokio::time::sleep(tokio::time::Duration::from_millis(self.delay_ms)).await;
		self.inner.product_by_sku(sku).await
	}

	async fn fetch_products(&self, ids: &[String]) -> SearchResult<Vec<ProductHit>> {
		self.inner.fetch_products(ids).await
	}

	async fn fetch_attributes(
		&self,
		ids: &[String],
	) -> SearchResult<HashMap<String, BTreeMap<String, serde_json::Value>>> {
		self.inner.fetch_attributes(ids).await
	}
}
