//! Service-level pipeline tests
//!
//! Exercise the chat service directly (no HTTP) for the consistency policy,
//! degradation paths and cache behavior.

mod mocks;

use std::sync::Arc;

use crate::mocks::{FailingCatalog, FailingLanguageModel};
use shoptalk::async_trait::async_trait;
use shoptalk::mocks::{MockCatalog, MockKnowledge, MockLanguageModel};
use shoptalk::types::{
	GeneratedReply, LanguageModel, NluOutput, NluResult, ReplyRequest,
};
use shoptalk::{ChatRequest, ChatService, ChatServiceConfig, IntentLabel, Localizer, MemoryStore};

/// Language model that classifies like the standard mock but generates a
/// reply contradicting any products that were found
#[derive(Debug, Default)]
struct NoMatchLanguageModel {
	inner: MockLanguageModel,
}

#[async_trait]
impl LanguageModel for NoMatchLanguageModel {
	async fn classify(&self, text: &str, locale_hint: Option<&str>) -> NluResult<NluOutput> {
		self.inner.classify(text, locale_hint).await
	}

	async fn generate_embedding(&self, text: &str) -> NluResult<Vec<f32>> {
		self.inner.generate_embedding(text).await
	}

	async fn generate_reply(&self, _request: &ReplyRequest) -> NluResult<GeneratedReply> {
		Ok(GeneratedReply {
			text: "I couldn't find specific 16 gauge options in our current offerings."
				.to_string(),
			call_to_action: String::new(),
		})
	}
}

fn service_with(language_model: Arc<dyn LanguageModel>) -> ChatService {
	ChatService::new(
		language_model,
		Arc::new(MockCatalog::with_demo_products()),
		Arc::new(MockKnowledge::with_demo_articles()),
		ChatServiceConfig::default(),
	)
	.expect("registry must validate")
}

#[tokio::test]
async fn test_contradicting_reply_is_replaced_by_default() {
	let service = service_with(Arc::new(NoMatchLanguageModel::default()));

	let reply = service
		.handle(ChatRequest::new("show me 16 gauge staples"))
		.await
		.unwrap();

	// Products were found, so the "couldn't find" text must not survive
	assert!(!reply.product_carousel.is_empty());
	let localizer = Localizer;
	assert_eq!(reply.reply_text, localizer.default_reply("en-US"));
	assert_eq!(
		reply.call_to_action,
		localizer.default_call_to_action("en-US")
	);
}

#[tokio::test]
async fn test_classifier_failure_still_surfaces_sku_products() {
	// Classifier and embeddings are down; the lexical SKU token alone must
	// still route the request to the catalog
	let service = service_with(Arc::new(FailingLanguageModel::new()));

	let reply = service
		.handle(ChatRequest::new("do you stock ST-4401?"))
		.await
		.unwrap();

	assert_eq!(reply.intent, IntentLabel::KnowledgeQuery);
	assert!(!reply.product_carousel.is_empty());
	assert_eq!(reply.product_carousel[0].sku, "ST-4401");
}

#[tokio::test]
async fn test_catalog_failure_degrades_to_clarify() {
	let service = ChatService::new(
		Arc::new(MockLanguageModel::new()),
		Arc::new(FailingCatalog),
		Arc::new(MockKnowledge::with_demo_articles()),
		ChatServiceConfig::default(),
	)
	.unwrap();

	let reply = service
		.handle(ChatRequest::new("show me staples"))
		.await
		.unwrap();

	// Product intent with a dead catalog: no hard error, a clarify turn
	assert!(reply.product_carousel.is_empty());
	let types: Vec<String> = reply
		.components
		.iter()
		.map(|c| c.component_type.to_string())
		.collect();
	assert_eq!(types, vec!["query_summary", "clarify"]);
}

#[tokio::test]
async fn test_smalltalk_skips_retrieval() {
	let service = service_with(Arc::new(MockLanguageModel::new()));

	let reply = service.handle(ChatRequest::new("hi there")).await.unwrap();

	assert_eq!(reply.intent, IntentLabel::Smalltalk);
	assert!(reply.product_carousel.is_empty());
	assert!(reply.sources.is_empty());
	assert!(!reply.reply_text.is_empty());
}

#[tokio::test]
async fn test_cache_roundtrip_preserves_reply_shape() {
	let cache = Arc::new(MemoryStore::new());
	let service = service_with(Arc::new(MockLanguageModel::new())).with_cache(cache);

	let request = ChatRequest::new("show me staples").with_tenant_id("tenant-9");
	let first = service.handle(request.clone()).await.unwrap();
	assert!(!first.served_from_cache);

	let second = service.handle(request).await.unwrap();
	assert!(second.served_from_cache);
	assert_eq!(first.reply_text, second.reply_text);
	assert_eq!(first.components.len(), second.components.len());
	assert_eq!(
		first.product_carousel.len(),
		second.product_carousel.len()
	);
}

#[tokio::test]
async fn test_cache_key_distinguishes_tenants() {
	let cache = Arc::new(MemoryStore::new());
	let service = service_with(Arc::new(MockLanguageModel::new())).with_cache(cache);

	let first = service
		.handle(ChatRequest::new("show me staples").with_tenant_id("tenant-a"))
		.await
		.unwrap();
	assert!(!first.served_from_cache);

	// Same message, different tenant: must not hit tenant-a's entry
	let other = service
		.handle(ChatRequest::new("show me staples").with_tenant_id("tenant-b"))
		.await
		.unwrap();
	assert!(!other.served_from_cache);
}

#[tokio::test]
async fn test_policy_question_uses_decomposition() {
	let service = service_with(Arc::new(MockLanguageModel::new()));

	let reply = service
		.handle(ChatRequest::new(
			"what is your shipping and return policy?",
		))
		.await
		.unwrap();

	assert_eq!(reply.intent, IntentLabel::KnowledgeQuery);
	assert!(!reply.sources.is_empty());
	let types: Vec<String> = reply
		.components
		.iter()
		.map(|c| c.component_type.to_string())
		.collect();
	assert_eq!(types, vec!["query_summary", "knowledge_answer"]);
}
