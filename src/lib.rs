//! Shoptalk Library
//!
//! A conversational commerce chat engine: classifies shopper messages,
//! gates retrieval against a product catalog and a knowledge base, plans a
//! deterministic set of UI components and composes a consistent reply.

use std::sync::Arc;
use tracing::{info, warn};

// Core domain types - the most commonly used types
pub use shoptalk_types::{
	chrono,
	// External dependencies for convenience
	serde_json,
	AmbiguityReason,
	CanonicalProduct,
	CarouselItem,
	CatalogSearch,
	ChatComponent,
	ChatError,
	ChatReply,
	ChatRequest,
	ChatResult,
	ComponentContext,
	ComponentType,
	IntentDecision,
	IntentLabel,
	KnowledgeSearch,
	KnowledgeSource,
	LanguageModel,
	NluOutput,
	ProductField,
	ProductHit,
	RegistryError,
	Reranker,
	ResponseCache,
	RetrievalDecision,
	SecretString,
};

// Pipeline layer
pub use shoptalk_pipeline::{
	build_components, decide_retrieval, ensure_consistent_reply, normalize_cached_response, plan,
	resolve_intent, select_primary_products, stable_cache_key, ChatService, ChatServiceConfig,
	ComponentRegistry, FieldResolver, LexicalAnalyzer, Localizer,
};

// Storage layer
pub use shoptalk_storage::{MemoryStore, RedisStore};

// Adapters
pub use shoptalk_adapters::{ClientCache, HttpLanguageModel, HttpReranker};

// Config
pub use shoptalk_config::{
	load_config, log_service_info, log_service_shutdown, log_startup_complete, Settings,
};

// API layer
pub use shoptalk_api::{create_router, AppState};

// Module aliases for convenience
pub mod types {
	pub use shoptalk_types::*;
}

pub mod pipeline {
	pub use shoptalk_pipeline::*;
}

pub mod storage {
	pub use shoptalk_storage::*;
}

pub mod config {
	pub use shoptalk_config::*;
}

pub mod adapters {
	pub use shoptalk_adapters::*;
}

pub mod api {
	pub use shoptalk_api::*;
	pub mod routes {
		pub use shoptalk_api::{create_router, AppState};
	}
}

pub mod mocks;

// Re-export external dependencies for examples
pub use async_trait;
pub use reqwest;

/// Builder pattern for configuring the chat engine
pub struct ChatBuilder<C = MemoryStore>
where
	C: ResponseCache + Clone + 'static,
{
	settings: Option<Settings>,
	cache: C,
	language_model: Option<Arc<dyn LanguageModel>>,
	catalog: Option<Arc<dyn CatalogSearch>>,
	knowledge: Option<Arc<dyn KnowledgeSearch>>,
	reranker: Option<Arc<dyn Reranker>>,
}

impl<C> ChatBuilder<C>
where
	C: ResponseCache + Clone + 'static,
{
	/// Create a new chat builder with the provided cache store
	pub fn with_cache_store(cache: C) -> Self {
		Self {
			settings: None,
			cache,
			language_model: None,
			catalog: None,
			knowledge: None,
			reranker: None,
		}
	}
}

// Default constructor using MemoryStore for convenience
impl Default for ChatBuilder<MemoryStore> {
	fn default() -> Self {
		Self::new()
	}
}

impl ChatBuilder<MemoryStore> {
	/// Create a new chat builder with default memory cache
	pub fn new() -> Self {
		Self::with_cache_store(MemoryStore::new())
	}
}

impl<C> ChatBuilder<C>
where
	C: ResponseCache + Clone + 'static,
{
	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	pub fn with_language_model(mut self, language_model: Arc<dyn LanguageModel>) -> Self {
		self.language_model = Some(language_model);
		self
	}

	pub fn with_catalog(mut self, catalog: Arc<dyn CatalogSearch>) -> Self {
		self.catalog = Some(catalog);
		self
	}

	pub fn with_knowledge(mut self, knowledge: Arc<dyn KnowledgeSearch>) -> Self {
		self.knowledge = Some(knowledge);
		self
	}

	pub fn with_reranker(mut self, reranker: Arc<dyn Reranker>) -> Self {
		self.reranker = Some(reranker);
		self
	}

	/// Wire the service and return the router plus application state
	pub async fn start(self) -> ChatResult<(axum::Router<AppState>, AppState)> {
		let settings = self.settings.unwrap_or_default();
		settings
			.validate()
			.map_err(|e| ChatError::Configuration {
				reason: e.to_string(),
			})?;

		let language_model: Arc<dyn LanguageModel> = match self.language_model {
			Some(model) => model,
			None => Arc::new(http_language_model_from(&settings)),
		};

		let catalog: Arc<dyn CatalogSearch> = match self.catalog {
			Some(catalog) => catalog,
			None => {
				warn!("No catalog collaborator configured; using the built-in demo catalog");
				Arc::new(mocks::MockCatalog::with_demo_products())
			},
		};
		let knowledge: Arc<dyn KnowledgeSearch> = match self.knowledge {
			Some(knowledge) => knowledge,
			None => {
				warn!("No knowledge collaborator configured; using the built-in demo articles");
				Arc::new(mocks::MockKnowledge::with_demo_articles())
			},
		};

		let reranker = self.reranker.or_else(|| {
			settings.rerank.enabled.then(|| {
				Arc::new(http_reranker_from(&settings)) as Arc<dyn Reranker>
			})
		});

		let service_config = chat_service_config_from(&settings);
		let mut service = ChatService::new(language_model, catalog, knowledge, service_config)?;

		let cache: Option<Arc<dyn ResponseCache>> = if settings.cache.enabled {
			Some(Arc::new(self.cache.clone()))
		} else {
			None
		};
		if let Some(cache) = &cache {
			service = service.with_cache(Arc::clone(cache));
		}
		if let Some(reranker) = reranker {
			service = service.with_reranker(reranker);
		}

		let state = AppState {
			chat_service: Arc::new(service),
			cache,
		};
		Ok((create_router(), state))
	}

	/// Start the complete HTTP server
	pub async fn start_server(mut self) -> Result<(), Box<dyn std::error::Error>> {
		if self.settings.is_none() {
			self.settings = Some(load_config()?);
		}
		let settings = self.settings.clone().unwrap_or_default();

		log_service_info();

		let (router, state) = self.start().await?;
		let app = router.with_state(state);

		let addr = format!("{}:{}", settings.server.host, settings.server.port);
		let listener = tokio::net::TcpListener::bind(&addr).await?;
		log_startup_complete(&settings);
		info!("Server listening on {}", addr);

		axum::serve(listener, app).await?;
		log_service_shutdown();
		Ok(())
	}
}

fn http_language_model_from(settings: &Settings) -> HttpLanguageModel {
	let api_key = settings
		.nlu
		.api_key
		.as_ref()
		.and_then(|key| match key.resolve_for_secret() {
			Ok(secret) => Some(secret),
			Err(e) => {
				warn!("Language model API key unavailable: {}", e);
				None
			},
		});
	HttpLanguageModel::new(
		settings.nlu.endpoint.clone(),
		settings.nlu.chat_model.clone(),
		settings.nlu.embedding_model.clone(),
		api_key,
		settings.nlu.timeout_ms,
	)
}

fn http_reranker_from(settings: &Settings) -> HttpReranker {
	let api_key = settings
		.rerank
		.api_key
		.as_ref()
		.and_then(|key| match key.resolve_for_secret() {
			Ok(secret) => Some(secret),
			Err(e) => {
				warn!("Rerank API key unavailable, disabling reranker: {}", e);
				None
			},
		});
	let enabled = settings.rerank.enabled && api_key.is_some();
	HttpReranker::new(
		enabled,
		settings.rerank.endpoint.clone(),
		settings.rerank.model.clone(),
		api_key,
		settings.rerank.timeout_ms,
	)
}

fn chat_service_config_from(settings: &Settings) -> ChatServiceConfig {
	ChatServiceConfig {
		selection: shoptalk_pipeline::SelectionConfig {
			default_threshold: settings.retrieval.default_distance_threshold,
			browse_threshold: settings.retrieval.browse_distance_threshold,
			specific_threshold: settings.retrieval.specific_distance_threshold,
			product_limit: settings.retrieval.primary_product_limit,
		},
		knowledge_source_limit: settings.retrieval.knowledge_source_limit,
		candidate_limit: settings.retrieval.candidate_limit,
		classifier_timeout_ms: settings.timeouts.classifier_ms,
		search_timeout_ms: settings.timeouts.search_ms,
		cache_enabled: settings.cache.enabled,
		cache_ttl_seconds: settings.cache.ttl_seconds,
		cache_namespace: settings.cache.namespace.clone(),
	}
}
