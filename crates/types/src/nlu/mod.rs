//! Classifier boundary types and the language-model collaborator trait

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub mod errors;

pub use errors::{ClassifierError, NluResult};

/// Strict-schema classifier output
///
/// The classifier returns a dynamically-shaped JSON blob; it is validated
/// against this schema immediately at the boundary so that no unchecked
/// mapping flows into the decision tables. Unknown fields are rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NluOutput {
	/// Detected language (BCP 47 primary subtag)
	#[serde(default = "default_language")]
	pub language: String,

	/// Full locale tag
	#[serde(default = "default_locale")]
	pub locale: String,

	/// Raw intent label; normalized by the intent router
	#[serde(default)]
	pub intent: String,

	/// Classifier believes the user wants to see products
	#[serde(default)]
	pub show_products: bool,

	/// Display currency
	#[serde(default = "default_currency")]
	pub currency: String,

	/// Rewritten standalone query
	#[serde(default)]
	pub refined_query: String,

	/// Classifier-proposed product code; only trusted after a code-shape check
	#[serde(default)]
	pub product_code: Option<String>,
}

fn default_language() -> String {
	"en".to_string()
}

fn default_locale() -> String {
	"en-US".to_string()
}

fn default_currency() -> String {
	"USD".to_string()
}

impl NluOutput {
	/// Degraded classifier output used when the classifier call fails
	///
	/// Defaults to a knowledge query so the request is never blocked on
	/// classifier success; lexical SKU detection still runs independently.
	pub fn fallback(locale_hint: Option<&str>) -> Self {
		let locale = locale_hint.unwrap_or("en-US").to_string();
		let language = locale
			.split(['-', '_'])
			.next()
			.unwrap_or("en")
			.to_lowercase();
		Self {
			language,
			locale,
			intent: String::new(),
			show_products: false,
			currency: default_currency(),
			refined_query: String::new(),
			product_code: None,
		}
	}

	/// Validate a raw classifier JSON payload against the strict schema
	pub fn from_json(value: serde_json::Value) -> NluResult<Self> {
		serde_json::from_value(value).map_err(|e| ClassifierError::InvalidPayload {
			reason: e.to_string(),
		})
	}
}

/// Input to the opaque reply-generation call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyRequest {
	pub user_text: String,
	pub intent: String,
	pub locale: String,
	/// One-line summaries of products that will be rendered alongside the text
	pub product_summaries: Vec<String>,
	/// Snippets from retrieved knowledge sources
	pub knowledge_snippets: Vec<String>,
}

/// Output of the reply-generation call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedReply {
	pub text: String,
	/// Companion call-to-action hint; may be empty, the consistency policy
	/// fills it with a localized default
	#[serde(default)]
	pub call_to_action: String,
}

/// Opaque language-model collaborator: classification, embedding and
/// generation
///
/// Implemented by the HTTP adapter in production and by in-process mocks in
/// tests and demos.
#[async_trait]
pub trait LanguageModel: Send + Sync + Debug {
	/// Classify a chat message into the strict [`NluOutput`] schema
	async fn classify(&self, text: &str, locale_hint: Option<&str>) -> NluResult<NluOutput>;

	/// Embed text for vector search
	async fn generate_embedding(&self, text: &str) -> NluResult<Vec<f32>>;

	/// Generate the free-text reply for one turn
	async fn generate_reply(&self, request: &ReplyRequest) -> NluResult<GeneratedReply>;

	/// Health check for readiness probes
	async fn health_check(&self) -> bool {
		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_strict_schema_accepts_valid_payload() {
		let output = NluOutput::from_json(json!({
			"language": "en",
			"locale": "en-US",
			"intent": "browse_products",
			"show_products": true,
			"currency": "USD",
			"refined_query": "16 gauge staples"
		}))
		.unwrap();

		assert_eq!(output.intent, "browse_products");
		assert!(output.show_products);
	}

	#[test]
	fn test_strict_schema_rejects_unknown_fields() {
		let result = NluOutput::from_json(json!({
			"intent": "browse_products",
			"hallucinated_field": 42
		}));
		assert!(matches!(
			result,
			Err(ClassifierError::InvalidPayload { .. })
		));
	}

	#[test]
	fn test_missing_fields_take_defaults() {
		let output = NluOutput::from_json(json!({})).unwrap();
		assert_eq!(output.language, "en");
		assert_eq!(output.currency, "USD");
		assert!(!output.show_products);
		assert!(output.intent.is_empty());
	}

	#[test]
	fn test_fallback_carries_locale_hint() {
		let output = NluOutput::fallback(Some("de-DE"));
		assert_eq!(output.locale, "de-DE");
		assert_eq!(output.language, "de");
	}
}
