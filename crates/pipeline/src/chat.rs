//! Chat service: one linear pass per request through the pipeline
//!
//! Each turn runs cache probe, classification, intent routing, the retrieval
//! gate, retrieval itself (product and knowledge searches issued
//! concurrently when the gate wants both), context assembly, planning, field
//! resolution, component building and the consistency policy, then populates
//! the cache.
//!
//! Collaborator failures degrade (default intent, empty retrieval, cache
//! miss) rather than failing the request; only a registry mismatch is fatal.

use async_trait::async_trait;
use serde_json::json;
use shoptalk_types::constants::limits::{
	DEFAULT_CACHE_NAMESPACE, DEFAULT_CACHE_TTL_SECONDS, DEFAULT_CANDIDATE_LIMIT,
	DEFAULT_CLASSIFIER_TIMEOUT_MS, DEFAULT_SEARCH_TIMEOUT_MS, KNOWLEDGE_SOURCE_LIMIT,
};
use shoptalk_types::{
	AmbiguityReason, CanonicalProduct, CarouselItem, CatalogSearch, ChatReply, ChatRequest,
	ChatResult, ComponentContext, ComponentType, GeneratedReply, IntentDecision, IntentLabel,
	KnowledgeSearch, LanguageModel, LexicalSignals, NluOutput, ProductHit, ReplyRequest,
	Reranker, ResponseCache, RetrievalDecision, SearchResult, VectorSearchResult,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::time::{timeout, Duration};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::assembler::{select_primary_products, PrimaryProducts, SelectionConfig};
use crate::cache_key::stable_cache_key;
use crate::components::{build_components, ComponentRegistry};
use crate::consistency::{ensure_consistent_reply, normalize_cached_response};
use crate::fields::{FieldResolver, ProductLoader, ResolutionMetadata};
use crate::gate::decide_retrieval;
use crate::knowledge::{assemble_knowledge, KnowledgeContext};
use crate::lexical::LexicalAnalyzer;
use crate::localize::Localizer;
use crate::planner::plan;
use crate::router::resolve_intent;

/// Tunables for one chat service instance
#[derive(Debug, Clone)]
pub struct ChatServiceConfig {
	pub selection: SelectionConfig,
	pub knowledge_source_limit: usize,
	pub candidate_limit: usize,
	pub classifier_timeout_ms: u64,
	pub search_timeout_ms: u64,
	pub cache_enabled: bool,
	pub cache_ttl_seconds: u64,
	pub cache_namespace: String,
}

impl Default for ChatServiceConfig {
	fn default() -> Self {
		Self {
			selection: SelectionConfig::default(),
			knowledge_source_limit: KNOWLEDGE_SOURCE_LIMIT,
			candidate_limit: DEFAULT_CANDIDATE_LIMIT,
			classifier_timeout_ms: DEFAULT_CLASSIFIER_TIMEOUT_MS,
			search_timeout_ms: DEFAULT_SEARCH_TIMEOUT_MS,
			cache_enabled: true,
			cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
			cache_namespace: DEFAULT_CACHE_NAMESPACE.to_string(),
		}
	}
}

/// Bridges the catalog collaborator into the field resolver's two bulk loads
struct CatalogLoader<'a>(&'a dyn CatalogSearch);

#[async_trait]
impl ProductLoader for CatalogLoader<'_> {
	async fn load_products(&self, ids: &[String]) -> SearchResult<Vec<ProductHit>> {
		self.0.fetch_products(ids).await
	}

	async fn load_attributes(
		&self,
		ids: &[String],
	) -> SearchResult<HashMap<String, BTreeMap<String, serde_json::Value>>> {
		self.0.fetch_attributes(ids).await
	}
}

/// Service orchestrating the chat component pipeline
pub struct ChatService {
	language_model: Arc<dyn LanguageModel>,
	catalog: Arc<dyn CatalogSearch>,
	knowledge: Arc<dyn KnowledgeSearch>,
	reranker: Option<Arc<dyn Reranker>>,
	cache: Option<Arc<dyn ResponseCache>>,
	registry: ComponentRegistry,
	lexical: LexicalAnalyzer,
	localizer: Localizer,
	config: ChatServiceConfig,
}

impl ChatService {
	/// Create a new chat service with the default component registry
	///
	/// Registry coverage is validated here so a missing builder mapping
	/// fails at startup, not inside a request.
	pub fn new(
		language_model: Arc<dyn LanguageModel>,
		catalog: Arc<dyn CatalogSearch>,
		knowledge: Arc<dyn KnowledgeSearch>,
		config: ChatServiceConfig,
	) -> ChatResult<Self> {
		let registry = ComponentRegistry::with_defaults();
		registry.validate()?;

		Ok(Self {
			language_model,
			catalog,
			knowledge,
			reranker: None,
			cache: None,
			registry,
			lexical: LexicalAnalyzer::new(),
			localizer: Localizer,
			config,
		})
	}

	pub fn with_reranker(mut self, reranker: Arc<dyn Reranker>) -> Self {
		self.reranker = Some(reranker);
		self
	}

	pub fn with_cache(mut self, cache: Arc<dyn ResponseCache>) -> Self {
		self.cache = Some(cache);
		self
	}

	/// Health of the service's collaborators, keyed by name
	pub async fn health_check_all(&self) -> HashMap<String, bool> {
		let mut results = HashMap::new();
		results.insert(
			"language_model".to_string(),
			self.language_model.health_check().await,
		);
		results.insert("catalog".to_string(), self.catalog.health_check().await);
		results.insert("knowledge".to_string(), self.knowledge.health_check().await);
		if let Some(cache) = &self.cache {
			results.insert(
				"cache".to_string(),
				cache.health_check().await.unwrap_or(false),
			);
		}
		results
	}

	/// Handle one chat turn
	pub async fn handle(&self, request: ChatRequest) -> ChatResult<ChatReply> {
		request.validate()?;

		let conversation_id = request
			.conversation_id
			.clone()
			.unwrap_or_else(|| Uuid::new_v4().to_string());
		let locale_hint = request.locale.as_deref();

		info!(
			"Handling chat turn {} ({} chars)",
			conversation_id,
			request.message.chars().count()
		);

		let cache_key = self.cache_key(&request);
		if let Some(reply) = self.probe_cache(&cache_key, &conversation_id, locale_hint).await {
			return Ok(reply);
		}

		// Classification degrades to the default intent; lexical analysis
		// runs regardless of classifier success
		let nlu = self.classify(&request.message, locale_hint).await;
		let signals = self.lexical.analyze(&request.message);
		let decision = resolve_intent(&nlu, &request.message, &self.lexical, &signals);
		let retrieval = decide_retrieval(&decision, &signals);

		let (is_ambiguous, mut ambiguity_reason) = detect_ambiguity(&decision, &retrieval);

		// Retrieval (concurrent product + knowledge when the gate wants both)
		let (product_result, knowledge_context) = self
			.retrieve(&decision, &retrieval, &signals, is_ambiguous)
			.await;

		let primary = select_primary_products(
			&product_result.hits,
			product_result.best_distance,
			decision.show_products,
			decision.intent,
			&self.config.selection,
		);

		// Plan the UI
		let sku_count = signals.sku_tokens.len();
		let product_count = primary.products.len();
		let is_detail_mode = signals.detail_request && sku_count == 1 && product_count >= 1;
		let planned = plan(
			&request.message,
			decision.intent,
			sku_count,
			product_count,
			is_detail_mode,
			is_ambiguous,
			ambiguity_reason,
		);
		debug!("Planned components: {:?}", planned);

		if ambiguity_reason.is_none() && planned.contains(&ComponentType::Clarify) {
			ambiguity_reason = Some(if signals.compare_request && sku_count < 2 {
				AmbiguityReason::InsufficientCompareItems
			} else {
				AmbiguityReason::NoMatchingProducts
			});
		}

		// Resolve exactly the fields the planned components need
		let (products, resolution) = self.resolve_fields(&primary, &planned).await;
		debug!(
			"Field resolution: {} products, {} round trips, enrichment {}",
			products.len(),
			resolution.db_round_trips,
			resolution.enrichment_used
		);

		// Compose the free-text reply
		let has_error_component = planned.contains(&ComponentType::Error);
		let mut sources = primary.sources.clone();
		sources.extend(knowledge_context.sources.clone());

		let generated = if has_error_component {
			GeneratedReply {
				text: self.localizer.error_reply(&decision.locale),
				call_to_action: String::new(),
			}
		} else {
			self.generate_reply(&request.message, &decision, &products, &knowledge_context, &primary)
				.await
		};

		let knowledge_answer = decision
			.intent
			.is_knowledge_label()
			.then(|| generated.text.clone());

		// Build components from the shared context, strictly in planned order
		let context = ComponentContext {
			user_text: request.message.clone(),
			locale: decision.locale.clone(),
			intent: Some(decision.intent),
			planned_types: planned.clone(),
			result_count: products.len(),
			products,
			recommendations: Vec::new(),
			knowledge_answer,
			knowledge_sources: sources.clone(),
			attribute_filters: signals.attribute_filters.clone(),
			sku_tokens: signals.sku_tokens.clone(),
			ambiguity_reason,
			error_message: None,
			action_message: None,
		};
		let components = build_components(&self.registry, &planned, &context)?;

		let mut reply = ChatReply::new(conversation_id, decision.intent);
		reply.reply_text = generated.text;
		reply.call_to_action = generated.call_to_action;
		reply.product_carousel = context.products.iter().map(CarouselItem::from).collect();
		reply.follow_up_questions = suggest_follow_ups(&decision, is_ambiguous, &context);
		reply.sources = sources;
		reply.components = components;

		let has_products = reply.has_products();
		ensure_consistent_reply(&mut reply, has_products, &self.localizer, &decision.locale);

		if !has_error_component {
			self.populate_cache(&cache_key, &reply).await;
		}

		info!(
			"Chat turn complete: intent={} components={} products={}",
			decision.intent,
			reply.components.len(),
			reply.product_carousel.len()
		);
		Ok(reply)
	}

	fn cache_key(&self, request: &ChatRequest) -> String {
		let payload = json!({
			"message": crate::lexical::normalize_text(&request.message),
			"tenant_id": request.tenant_id,
			"locale": request.locale,
		});
		stable_cache_key(&self.config.cache_namespace, &payload)
	}

	async fn probe_cache(
		&self,
		cache_key: &str,
		conversation_id: &str,
		locale_hint: Option<&str>,
	) -> Option<ChatReply> {
		if !self.config.cache_enabled {
			return None;
		}
		let cache = self.cache.as_ref()?;

		match cache.get_json(cache_key).await {
			Ok(Some(value)) => match serde_json::from_value::<ChatReply>(value) {
				Ok(mut reply) => {
					reply.conversation_id = conversation_id.to_string();
					reply.served_from_cache = true;
					let has_products = reply.has_products();
					let locale = locale_hint.unwrap_or("en-US").to_string();
					normalize_cached_response(&mut reply, has_products, &self.localizer, &locale);
					info!("Serving chat turn from cache");
					Some(reply)
				},
				Err(e) => {
					warn!("Discarding undecodable cache entry: {}", e);
					None
				},
			},
			Ok(None) => None,
			Err(e) => {
				// Cache failure is a cache miss
				warn!("Cache probe failed: {}", e);
				None
			},
		}
	}

	async fn populate_cache(&self, cache_key: &str, reply: &ChatReply) {
		if !self.config.cache_enabled {
			return;
		}
		let Some(cache) = self.cache.as_ref() else {
			return;
		};

		// Cached copies never claim to be cached themselves
		let mut cacheable = reply.clone();
		cacheable.served_from_cache = false;

		match serde_json::to_value(&cacheable) {
			Ok(value) => {
				if let Err(e) = cache
					.set_json(cache_key, &value, self.config.cache_ttl_seconds)
					.await
				{
					warn!("Cache populate failed: {}", e);
				}
			},
			Err(e) => warn!("Could not serialize reply for cache: {}", e),
		}
	}

	async fn classify(&self, message: &str, locale_hint: Option<&str>) -> NluOutput {
		let classifier_timeout = Duration::from_millis(self.config.classifier_timeout_ms);
		match timeout(
			classifier_timeout,
			self.language_model.classify(message, locale_hint),
		)
		.await
		{
			Ok(Ok(output)) => output,
			Ok(Err(e)) => {
				warn!("Classifier failed, degrading to default intent: {}", e);
				NluOutput::fallback(locale_hint)
			},
			Err(_) => {
				warn!(
					"Classifier timed out after {}ms, degrading to default intent",
					self.config.classifier_timeout_ms
				);
				NluOutput::fallback(locale_hint)
			},
		}
	}

	async fn retrieve(
		&self,
		decision: &IntentDecision,
		retrieval: &RetrievalDecision,
		signals: &LexicalSignals,
		is_ambiguous: bool,
	) -> (VectorSearchResult, KnowledgeContext) {
		if is_ambiguous || (!retrieval.use_products && !retrieval.use_knowledge) {
			return (VectorSearchResult::default(), KnowledgeContext::default());
		}

		let embedding = match self
			.language_model
			.generate_embedding(&decision.search_query)
			.await
		{
			Ok(vector) => vector,
			Err(e) => {
				warn!("Embedding failed, continuing with lexical-only retrieval: {}", e);
				Vec::new()
			},
		};

		let product_fut = async {
			if retrieval.use_products {
				self.search_products(decision, signals, &embedding).await
			} else {
				VectorSearchResult::default()
			}
		};
		let knowledge_fut = async {
			if retrieval.use_knowledge {
				assemble_knowledge(
					self.knowledge.as_ref(),
					self.reranker.as_deref(),
					&decision.search_query,
					&embedding,
					self.config.knowledge_source_limit,
					retrieval.is_policy_intent,
					None,
				)
				.await
			} else {
				KnowledgeContext::default()
			}
		};

		let search_timeout = Duration::from_millis(self.config.search_timeout_ms);
		match timeout(search_timeout, async { tokio::join!(product_fut, knowledge_fut) }).await {
			Ok(results) => results,
			Err(_) => {
				warn!(
					"Retrieval timed out after {}ms, continuing without results",
					self.config.search_timeout_ms
				);
				(VectorSearchResult::default(), KnowledgeContext::default())
			},
		}
	}

	/// Product retrieval: exact SKU lookups first, vector search for the rest
	async fn search_products(
		&self,
		decision: &IntentDecision,
		signals: &LexicalSignals,
		embedding: &[f32],
	) -> VectorSearchResult {
		let mut hits: Vec<ProductHit> = Vec::new();
		let mut exact_match = false;

		// Lexical tokens plus the router-accepted classifier code
		let mut sku_tokens = signals.sku_tokens.clone();
		if let Some(sku) = &decision.sku_token {
			if !sku_tokens.contains(sku) {
				sku_tokens.push(sku.clone());
			}
		}

		for sku in &sku_tokens {
			match self.catalog.product_by_sku(sku).await {
				Ok(Some(hit)) => {
					exact_match = true;
					hits.push(hit);
				},
				Ok(None) => debug!("No exact match for sku token {}", sku),
				Err(e) => warn!("SKU lookup failed for {}: {}", sku, e),
			}
		}

		if !embedding.is_empty() {
			match self
				.catalog
				.vector_search(
					embedding,
					self.config.selection.product_limit,
					Some(self.config.candidate_limit),
				)
				.await
			{
				Ok(result) => {
					for hit in result.hits {
						if !hits.iter().any(|existing| existing.id == hit.id) {
							hits.push(hit);
						}
					}
					let best_distance = if exact_match {
						Some(0.0)
					} else {
						result.best_distance
					};
					return VectorSearchResult {
						hits,
						best_distance,
						timings: result.timings,
					};
				},
				Err(e) => warn!("Vector search failed: {}", e),
			}
		}

		let best_distance = if exact_match {
			Some(0.0)
		} else {
			hits.first().and_then(|hit| hit.distance)
		};
		VectorSearchResult {
			hits,
			best_distance,
			timings: Default::default(),
		}
	}

	async fn resolve_fields(
		&self,
		primary: &PrimaryProducts,
		planned: &[ComponentType],
	) -> (Vec<CanonicalProduct>, ResolutionMetadata) {
		let product_ids: Vec<String> = primary.products.iter().map(|p| p.id.clone()).collect();
		if product_ids.is_empty() {
			return (
				Vec::new(),
				ResolutionMetadata {
					enrichment_used: false,
					db_round_trips: 0,
					field_union_size: FieldResolver::field_union(planned).len(),
				},
			);
		}

		let loader = CatalogLoader(self.catalog.as_ref());
		let (resolved, metadata) = FieldResolver::resolve(&loader, &product_ids, planned).await;
		if resolved.is_empty() {
			// Base load failure degrades to the already-assembled candidates
			(primary.products.clone(), metadata)
		} else {
			(resolved, metadata)
		}
	}

	async fn generate_reply(
		&self,
		user_text: &str,
		decision: &IntentDecision,
		products: &[CanonicalProduct],
		knowledge: &KnowledgeContext,
		primary: &PrimaryProducts,
	) -> GeneratedReply {
		let reply_request = ReplyRequest {
			user_text: user_text.to_string(),
			intent: decision.intent.to_string(),
			locale: decision.locale.clone(),
			product_summaries: products.iter().map(|p| p.summary_line()).collect(),
			knowledge_snippets: knowledge
				.sources
				.iter()
				.map(|s| s.snippet.clone())
				.collect(),
		};

		match self.language_model.generate_reply(&reply_request).await {
			Ok(generated) => generated,
			Err(e) => {
				warn!("Reply generation failed, using template fallback: {}", e);
				let text = if products.is_empty() && knowledge.sources.is_empty() {
					self.localizer.no_results_reply(&decision.locale)
				} else if primary.fallback_used {
					self.localizer.fallback_reply(&decision.locale)
				} else if !products.is_empty() {
					self.localizer.default_reply(&decision.locale)
				} else {
					knowledge
						.sources
						.first()
						.map(|s| s.snippet.clone())
						.unwrap_or_else(|| self.localizer.no_results_reply(&decision.locale))
				};
				GeneratedReply {
					text,
					call_to_action: String::new(),
				}
			},
		}
	}
}

/// Ambiguity detection ahead of planning
///
/// The classifier refusing to commit (`other`) on a message that still looks
/// answerable routes to clarify instead of a dead end.
fn detect_ambiguity(
	decision: &IntentDecision,
	retrieval: &RetrievalDecision,
) -> (bool, Option<AmbiguityReason>) {
	if decision.intent == IntentLabel::Other
		&& (retrieval.is_question_like || retrieval.looks_like_product)
	{
		(true, Some(AmbiguityReason::UnclearIntent))
	} else {
		(false, None)
	}
}

fn suggest_follow_ups(
	decision: &IntentDecision,
	is_ambiguous: bool,
	context: &ComponentContext,
) -> Vec<String> {
	if is_ambiguous || context.ambiguity_reason.is_some() {
		return vec!["Could you share the product code or name you have in mind?".to_string()];
	}
	if decision.intent.is_knowledge_label() {
		return vec!["Is there anything else you'd like to know?".to_string()];
	}
	if !context.products.is_empty() {
		return vec![
			"Want more details on any of these?".to_string(),
			"Should I compare a couple of options?".to_string(),
		];
	}
	vec!["Can I help you find a product?".to_string()]
}
