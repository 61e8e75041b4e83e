//! Mock collaborators for examples and testing
//!
//! In-process stand-ins for the language model, the product catalog and the
//! knowledge base. Deterministic and dependency-free so demos and tests can
//! run without external services.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::json;

use shoptalk_types::{
	CatalogSearch, ClassifierError, GeneratedReply, KnowledgeRetrieval, KnowledgeSearch,
	KnowledgeSource, LanguageModel, NluOutput, NluResult, ProductHit, ReplyRequest, SearchResult,
	SearchTimings, SourceKind, VectorSearchResult,
};

const POLICY_WORDS: &[&str] = &["shipping", "delivery", "return", "refund", "warranty"];
const CATEGORY_WORDS: &[&str] = &["staples", "nails", "screws", "wire", "mesh", "tape"];
const GREETINGS: &[&str] = &["hi", "hello", "hey", "thanks", "thank"];

fn has_code_token(text: &str) -> bool {
	text.split(|c: char| c.is_whitespace() || c == ',' || c == '.')
		.any(|token| {
			let has_letter = token.chars().any(|c| c.is_ascii_alphabetic());
			let has_digit = token.chars().any(|c| c.is_ascii_digit());
			token.len() >= 3 && has_letter && has_digit
		})
}

/// Keyword-driven mock language model
///
/// Classification mirrors what the hosted classifier would do for obvious
/// messages; embeddings are cheap token hashes, stable across calls.
#[derive(Debug, Clone, Default)]
pub struct MockLanguageModel;

impl MockLanguageModel {
	pub fn new() -> Self {
		Self
	}
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
	async fn classify(&self, text: &str, locale_hint: Option<&str>) -> NluResult<NluOutput> {
		let normalized = text.trim().to_lowercase();
		let words: Vec<&str> = normalized
			.split(|c: char| !c.is_alphanumeric())
			.filter(|w| !w.is_empty())
			.collect();

		let is_greeting = words
			.first()
			.map(|w| GREETINGS.contains(w))
			.unwrap_or(false);
		let has_policy = words.iter().any(|w| POLICY_WORDS.contains(w));
		let has_category = words.iter().any(|w| CATEGORY_WORDS.contains(w));
		let has_code = has_code_token(&normalized);

		let (intent, show_products) = if normalized.is_empty() {
			("other", false)
		} else if is_greeting && words.len() <= 4 {
			("smalltalk", false)
		} else if has_policy {
			("knowledge_query", false)
		} else if has_code || normalized.contains("compare") {
			("search_specific", true)
		} else if has_category {
			("browse_products", true)
		} else if normalized.contains('?') {
			("knowledge_query", false)
		} else {
			("other", false)
		};

		let value = json!({
			"language": "en",
			"locale": locale_hint.unwrap_or("en-US"),
			"intent": intent,
			"show_products": show_products,
			"currency": "USD",
			"refined_query": text.trim(),
			"product_code": null,
		});
		NluOutput::from_json(value)
	}

	async fn generate_embedding(&self, text: &str) -> NluResult<Vec<f32>> {
		if text.trim().is_empty() {
			return Err(ClassifierError::EmptyResponse);
		}
		// Stable toy embedding: bucket token bytes into 8 dimensions
		let mut vector = vec![0.0f32; 8];
		for (i, byte) in text.bytes().enumerate() {
			vector[i % 8] += (byte as f32) / 255.0;
		}
		let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt().max(1e-6);
		Ok(vector.into_iter().map(|v| v / norm).collect())
	}

	async fn generate_reply(&self, request: &ReplyRequest) -> NluResult<GeneratedReply> {
		let text = if !request.product_summaries.is_empty() {
			format!(
				"I found {} matching products for you.",
				request.product_summaries.len()
			)
		} else if !request.knowledge_snippets.is_empty() {
			request.knowledge_snippets[0].clone()
		} else {
			"Happy to help! What are you looking for?".to_string()
		};
		Ok(GeneratedReply {
			text,
			call_to_action: String::new(),
		})
	}
}

/// In-memory demo catalog
#[derive(Debug, Clone, Default)]
pub struct MockCatalog {
	products: Vec<ProductHit>,
}

impl MockCatalog {
	/// Empty catalog; every search misses
	pub fn empty() -> Self {
		Self {
			products: Vec::new(),
		}
	}

	/// Catalog seeded with a small packaging-supplies assortment
	pub fn with_demo_products() -> Self {
		Self {
			products: vec![
				demo_product("p-1", "ST-4401", "Carton Staples 16 Gauge", 1299, "staples", "steel", Some("16")),
				demo_product("p-2", "ST-4402", "Carton Staples 18 Gauge", 1199, "staples", "steel", Some("18")),
				demo_product("p-3", "ST-5510", "Stainless Carton Staples", 1899, "staples", "stainless", Some("16")),
				demo_product("p-4", "NL-2210", "Copper Coated Nails", 899, "nails", "copper", None),
				demo_product("p-5", "WM-1050", "Galvanized Wire Mesh Roll", 4599, "mesh", "galvanized", None),
				demo_product("p-6", "TP-7721", "Heavy Duty Packing Tape", 599, "tape", "plastic", None),
			],
		}
	}

	pub fn with_products(products: Vec<ProductHit>) -> Self {
		Self { products }
	}
}

fn demo_product(
	id: &str,
	sku: &str,
	title: &str,
	price_cents: i64,
	category: &str,
	material: &str,
	gauge: Option<&str>,
) -> ProductHit {
	let mut attributes = BTreeMap::new();
	attributes.insert("material".to_string(), json!(material));
	if let Some(gauge) = gauge {
		attributes.insert("gauge".to_string(), json!(gauge));
	}
	ProductHit {
		id: id.to_string(),
		sku: sku.to_string(),
		title: title.to_string(),
		price: Decimal::new(price_cents, 2),
		currency: "USD".to_string(),
		in_stock: true,
		stock_qty: Some(100),
		category: Some(category.to_string()),
		image_url: Some(format!("https://cdn.example.com/{}.jpg", sku.to_lowercase())),
		product_url: Some(format!("https://shop.example.com/products/{}", sku.to_lowercase())),
		distance: None,
		attributes,
	}
}

#[async_trait]
impl CatalogSearch for MockCatalog {
	async fn vector_search(
		&self,
		_embedding: &[f32],
		limit: usize,
		_candidate_limit: Option<usize>,
	) -> SearchResult<VectorSearchResult> {
		let hits: Vec<ProductHit> = self
			.products
			.iter()
			.take(limit)
			.enumerate()
			.map(|(i, product)| {
				let mut hit = product.clone();
				hit.distance = Some(0.2 + i as f64 * 0.05);
				hit
			})
			.collect();
		let best_distance = hits.first().and_then(|hit| hit.distance);
		Ok(VectorSearchResult {
			hits,
			best_distance,
			timings: SearchTimings {
				search_ms: 1,
				total_ms: 1,
			},
		})
	}

	async fn product_by_sku(&self, sku: &str) -> SearchResult<Option<ProductHit>> {
		let hit = self
			.products
			.iter()
			.find(|product| product.sku.eq_ignore_ascii_case(sku))
			.map(|product| {
				let mut hit = product.clone();
				hit.distance = Some(0.0);
				hit
			});
		Ok(hit)
	}

	async fn fetch_products(&self, ids: &[String]) -> SearchResult<Vec<ProductHit>> {
		Ok(self
			.products
			.iter()
			.filter(|product| ids.contains(&product.id))
			.cloned()
			.collect())
	}

	async fn fetch_attributes(
		&self,
		ids: &[String],
	) -> SearchResult<HashMap<String, BTreeMap<String, serde_json::Value>>> {
		Ok(self
			.products
			.iter()
			.filter(|product| ids.contains(&product.id))
			.map(|product| {
				let mut attributes = product.attributes.clone();
				attributes.insert("weight_grams".to_string(), json!(250));
				attributes.insert("pack_size".to_string(), json!(1000));
				(product.id.clone(), attributes)
			})
			.collect())
	}
}

/// In-memory demo knowledge base
#[derive(Debug, Clone, Default)]
pub struct MockKnowledge {
	articles: Vec<KnowledgeSource>,
}

impl MockKnowledge {
	pub fn empty() -> Self {
		Self {
			articles: Vec::new(),
		}
	}

	/// Knowledge base seeded with standard store-policy articles
	pub fn with_demo_articles() -> Self {
		Self {
			articles: vec![
				article("Shipping Policy", "We ship worldwide within 3-5 business days."),
				article(
					"Returns & Refunds",
					"Unused items can be returned within 30 days for a full refund.",
				),
				article(
					"Warranty",
					"All tools carry a 12-month manufacturer warranty.",
				),
			],
		}
	}
}

fn article(title: &str, snippet: &str) -> KnowledgeSource {
	KnowledgeSource::new(
		title.to_string(),
		snippet.to_string(),
		0.9,
		SourceKind::Knowledge,
	)
	.with_url(format!(
		"https://shop.example.com/help/{}",
		title.to_lowercase().replace(' ', "-")
	))
}

#[async_trait]
impl KnowledgeSearch for MockKnowledge {
	async fn search(
		&self,
		query: &str,
		_embedding: &[f32],
		limit: usize,
		_category: Option<&str>,
	) -> SearchResult<Vec<KnowledgeSource>> {
		let normalized = query.to_lowercase();
		let mut matches: Vec<KnowledgeSource> = self
			.articles
			.iter()
			.filter(|source| {
				source
					.title
					.to_lowercase()
					.split_whitespace()
					.any(|word| normalized.contains(word))
			})
			.cloned()
			.collect();
		if matches.is_empty() {
			matches = self.articles.clone();
		}
		matches.truncate(limit);
		Ok(matches)
	}

	async fn retrieve(
		&self,
		query: &str,
		embedding: &[f32],
		limit: usize,
	) -> SearchResult<KnowledgeRetrieval> {
		let normalized = query.to_lowercase();
		let topic_count = POLICY_WORDS
			.iter()
			.filter(|word| normalized.contains(*word))
			.count();

		let sources = self.search(query, embedding, limit, None).await?;
		if topic_count >= 2 {
			Ok(KnowledgeRetrieval {
				sources,
				decomposition_used: true,
				decomposition_reason: Some(format!("{} policy topics detected", topic_count)),
			})
		} else {
			Ok(KnowledgeRetrieval::simple(sources))
		}
	}
}
