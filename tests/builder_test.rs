//! Builder wiring tests

mod mocks;

use crate::mocks::TestServer;
use shoptalk::{ChatBuilder, MemoryStore, Settings};

#[tokio::test]
async fn test_builder_with_defaults_starts() {
	let (router, state) = TestServer::default_builder()
		.start()
		.await
		.expect("builder must start");

	// Cache is enabled by default settings
	assert!(state.cache.is_some());
	let _app: axum::Router = router.with_state(state);
}

#[tokio::test]
async fn test_builder_respects_disabled_cache() {
	let mut settings = Settings::default();
	settings.cache.enabled = false;

	let (_, state) = TestServer::default_builder()
		.with_settings(settings)
		.start()
		.await
		.expect("builder must start");

	assert!(state.cache.is_none());
}

#[tokio::test]
async fn test_builder_rejects_invalid_settings() {
	let mut settings = Settings::default();
	settings.retrieval.browse_distance_threshold = 2.0;

	let result = TestServer::default_builder()
		.with_settings(settings)
		.start()
		.await;
	assert!(result.is_err());
}

#[tokio::test]
async fn test_builder_accepts_custom_cache_store() {
	let builder = ChatBuilder::with_cache_store(MemoryStore::new())
		.with_settings(Settings::default())
		.with_language_model(std::sync::Arc::new(
			shoptalk::mocks::MockLanguageModel::new(),
		))
		.with_catalog(std::sync::Arc::new(
			shoptalk::mocks::MockCatalog::with_demo_products(),
		))
		.with_knowledge(std::sync::Arc::new(
			shoptalk::mocks::MockKnowledge::with_demo_articles(),
		));

	assert!(builder.start().await.is_ok());
}
