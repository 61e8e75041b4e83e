//! HTTP adapter for the language-model collaborator
//!
//! Talks to a chat-completions style endpoint for classification and reply
//! generation, and to an embeddings endpoint for vectors. Classification
//! responses are forced into strict JSON and validated at this boundary.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use shoptalk_types::{
	ClassifierError, GeneratedReply, LanguageModel, NluOutput, NluResult, ReplyRequest,
	SecretString,
};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::client_cache::{ClientCache, ClientConfig};

/// System prompt for the classification call
///
/// The schema named here must stay in sync with [`NluOutput`]; anything else
/// the model emits is rejected by validation.
const CLASSIFY_SYSTEM_PROMPT: &str = "You classify one shopper chat message for a commerce \
	assistant. Respond with strict JSON only, using exactly these fields: language (string), \
	locale (string), intent (one of browse_products, search_specific, knowledge_query, \
	off_topic, smalltalk, other), show_products (boolean), currency (string), refined_query \
	(string, the message rewritten as a standalone search query), product_code (string or \
	null, a product/SKU code if the message contains one).";

/// System prompt for the reply-generation call
const REPLY_SYSTEM_PROMPT: &str = "You are a helpful commerce assistant. Write a short reply \
	to the shopper grounded ONLY in the provided products and knowledge snippets. Never claim \
	nothing was found when products are listed.";

/// Chat-completions response shape (the slice of it we read)
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
	choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
	message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
	content: String,
}

/// Embeddings response shape
#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
	data: Vec<EmbeddingRow>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingRow {
	embedding: Vec<f32>,
}

/// Language-model adapter over an HTTP chat-completions API
#[derive(Debug)]
pub struct HttpLanguageModel {
	endpoint: String,
	chat_model: String,
	embedding_model: String,
	api_key: Option<SecretString>,
	timeout_ms: u64,
	client_cache: ClientCache,
}

impl HttpLanguageModel {
	/// Create a new adapter with a fresh client cache
	pub fn new(
		endpoint: String,
		chat_model: String,
		embedding_model: String,
		api_key: Option<SecretString>,
		timeout_ms: u64,
	) -> Self {
		Self::with_cache(
			endpoint,
			chat_model,
			embedding_model,
			api_key,
			timeout_ms,
			ClientCache::new(),
		)
	}

	/// Create an adapter sharing an existing client cache
	pub fn with_cache(
		endpoint: String,
		chat_model: String,
		embedding_model: String,
		api_key: Option<SecretString>,
		timeout_ms: u64,
		client_cache: ClientCache,
	) -> Self {
		Self {
			endpoint,
			chat_model,
			embedding_model,
			api_key,
			timeout_ms,
			client_cache,
		}
	}

	fn client(&self) -> NluResult<Arc<Client>> {
		let config = ClientConfig::new(&self.endpoint, "language-model", self.timeout_ms);
		self.client_cache
			.client_for(&config)
			.map_err(|e| ClassifierError::Network(e.to_string()))
	}

	fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
		match &self.api_key {
			Some(key) => builder.bearer_auth(key.expose_secret()),
			None => builder,
		}
	}

	async fn chat_completion(&self, body: serde_json::Value) -> NluResult<String> {
		let client = self.client()?;
		let url = format!("{}/chat/completions", self.endpoint.trim_end_matches('/'));

		let response = self
			.authorize(client.post(&url).json(&body))
			.send()
			.await
			.map_err(|e| {
				if e.is_timeout() {
					ClassifierError::Timeout {
						timeout_ms: self.timeout_ms,
					}
				} else {
					ClassifierError::Network(e.to_string())
				}
			})?;

		let status = response.status();
		if !status.is_success() {
			let message = response.text().await.unwrap_or_default();
			return Err(ClassifierError::Http {
				status: status.as_u16(),
				message,
			});
		}

		let completion: ChatCompletionResponse = response
			.json()
			.await
			.map_err(|e| ClassifierError::Network(e.to_string()))?;

		completion
			.choices
			.into_iter()
			.next()
			.map(|choice| choice.message.content)
			.filter(|content| !content.trim().is_empty())
			.ok_or(ClassifierError::EmptyResponse)
	}
}

#[async_trait]
impl LanguageModel for HttpLanguageModel {
	async fn classify(&self, text: &str, locale_hint: Option<&str>) -> NluResult<NluOutput> {
		let user_content = match locale_hint {
			Some(locale) => format!("[caller locale: {}] {}", locale, text),
			None => text.to_string(),
		};

		let body = json!({
			"model": self.chat_model,
			"messages": [
				{"role": "system", "content": CLASSIFY_SYSTEM_PROMPT},
				{"role": "user", "content": user_content},
			],
			"response_format": {"type": "json_object"},
			"temperature": 0,
		});

		let content = self.chat_completion(body).await?;
		let value: serde_json::Value = serde_json::from_str(&content)?;
		let output = NluOutput::from_json(value)?;
		debug!(
			"Classified message as '{}' (show_products: {})",
			output.intent, output.show_products
		);
		Ok(output)
	}

	async fn generate_embedding(&self, text: &str) -> NluResult<Vec<f32>> {
		let client = self.client()?;
		let url = format!("{}/embeddings", self.endpoint.trim_end_matches('/'));

		let body = json!({
			"model": self.embedding_model,
			"input": text,
		});

		let response = self
			.authorize(client.post(&url).json(&body))
			.send()
			.await
			.map_err(|e| ClassifierError::Network(e.to_string()))?;

		let status = response.status();
		if !status.is_success() {
			let message = response.text().await.unwrap_or_default();
			return Err(ClassifierError::Http {
				status: status.as_u16(),
				message,
			});
		}

		let parsed: EmbeddingResponse = response
			.json()
			.await
			.map_err(|e| ClassifierError::Network(e.to_string()))?;

		parsed
			.data
			.into_iter()
			.next()
			.map(|row| row.embedding)
			.ok_or(ClassifierError::EmptyResponse)
	}

	async fn generate_reply(&self, request: &ReplyRequest) -> NluResult<GeneratedReply> {
		let mut context = String::new();
		if !request.product_summaries.is_empty() {
			context.push_str("Products found:\n");
			for summary in &request.product_summaries {
				context.push_str("- ");
				context.push_str(summary);
				context.push('\n');
			}
		}
		if !request.knowledge_snippets.is_empty() {
			context.push_str("Knowledge snippets:\n");
			for snippet in &request.knowledge_snippets {
				context.push_str("- ");
				context.push_str(snippet);
				context.push('\n');
			}
		}

		let body = json!({
			"model": self.chat_model,
			"messages": [
				{"role": "system", "content": REPLY_SYSTEM_PROMPT},
				{"role": "system", "content": format!("Intent: {}. Locale: {}.\n{}", request.intent, request.locale, context)},
				{"role": "user", "content": request.user_text},
			],
			"temperature": 0.3,
		});

		let text = self.chat_completion(body).await.map_err(|e| {
			warn!("Reply generation failed: {}", e);
			e
		})?;

		Ok(GeneratedReply {
			text,
			call_to_action: String::new(),
		})
	}

	async fn health_check(&self) -> bool {
		self.client().is_ok()
	}
}
