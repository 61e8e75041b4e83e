//! Intent domain model: classifier labels, routed decisions and lexical signals

use serde::{Deserialize, Serialize};

/// Normalized intent label produced by the classifier boundary
///
/// Unknown classifier strings map to `Other`; an absent intent defaults to
/// `KnowledgeQuery` so that FAQ-style handling is the degraded path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum IntentLabel {
	/// Open-ended product browsing ("show me some staples")
	BrowseProducts,
	/// Search for a concrete item ("do you have SKU ST-4401?")
	SearchSpecific,
	/// Question answered from the knowledge base
	KnowledgeQuery,
	/// Message unrelated to the store
	OffTopic,
	/// Greetings and chit-chat
	Smalltalk,
	/// Classifier could not commit to a label
	Other,
}

impl IntentLabel {
	/// Parse a raw classifier label, accepting known aliases
	///
	/// The classifier is an external model and its label vocabulary drifts;
	/// anything unrecognized lands on `Other` rather than failing.
	pub fn parse(raw: &str) -> Self {
		match raw.trim().to_lowercase().as_str() {
			"browse_products" | "browse" | "product_browse" => Self::BrowseProducts,
			"search_specific" | "product_search" | "specific_search" => Self::SearchSpecific,
			"knowledge_query" | "knowledge" | "faq" => Self::KnowledgeQuery,
			"off_topic" | "offtopic" => Self::OffTopic,
			"smalltalk" | "small_talk" | "greeting" => Self::Smalltalk,
			"" => Self::default(),
			_ => Self::Other,
		}
	}

	/// Whether this label targets the product index on its own
	pub fn is_product_label(&self) -> bool {
		matches!(self, Self::BrowseProducts | Self::SearchSpecific)
	}

	/// Whether this label routes to the knowledge base
	pub fn is_knowledge_label(&self) -> bool {
		matches!(self, Self::KnowledgeQuery | Self::OffTopic)
	}
}

impl Default for IntentLabel {
	fn default() -> Self {
		Self::KnowledgeQuery
	}
}

impl std::fmt::Display for IntentLabel {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let label = match self {
			Self::BrowseProducts => "browse_products",
			Self::SearchSpecific => "search_specific",
			Self::KnowledgeQuery => "knowledge_query",
			Self::OffTopic => "off_topic",
			Self::Smalltalk => "smalltalk",
			Self::Other => "other",
		};
		write!(f, "{}", label)
	}
}

/// Per-request intent decision, derived once from classifier output and
/// lexical evidence
///
/// Invariant: a non-empty `sku_token` forces `is_product_intent`, regardless
/// of the classifier label. Lexical evidence overrides the classifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntentDecision {
	/// Normalized intent label
	pub intent: IntentLabel,

	/// Rewritten standalone query, falling back to the raw user text
	pub search_query: String,

	/// Classifier's "show products" flag
	pub show_products: bool,

	/// Lexically detected SKU token, if any
	pub sku_token: Option<String>,

	/// Whether this request should be treated as a product request
	pub is_product_intent: bool,

	/// Detected message language (BCP 47 primary subtag)
	pub language: String,

	/// Full locale tag for localized defaults
	pub locale: String,

	/// Display currency for prices
	pub currency: String,
}

/// Retrieval gate output: which indexes to query plus auxiliary flags
///
/// `use_products` and `use_knowledge` are independently derived and not
/// mutually exclusive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetrievalDecision {
	pub use_products: bool,
	pub use_knowledge: bool,
	pub is_question_like: bool,
	pub is_complex: bool,
	/// Number of distinct store-policy topics detected in the message
	pub policy_topic_count: usize,
	/// Knowledge intent touching at least one policy topic; triggers
	/// multi-hop decomposition downstream
	pub is_policy_intent: bool,
	pub looks_like_product: bool,
}

/// Lexical evidence extracted from the raw message, independent of the
/// classifier
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LexicalSignals {
	/// SKU-shaped tokens found in the text, cleaned and uppercased
	pub sku_tokens: Vec<String>,

	/// Attribute filters such as gauge or material mentions
	pub attribute_filters: Vec<(String, String)>,

	/// User asked for details/specs of an item
	pub detail_request: bool,

	/// Product category inferred from category vocabulary
	pub inferred_category: Option<String>,

	/// "compare" cue present
	pub compare_request: bool,

	/// Table/grid rendering cues
	pub table_cue: bool,

	/// Bullet/short-list rendering cues
	pub bullet_cue: bool,

	/// "how many"/count cues
	pub count_cue: bool,

	/// Suggestion/recommendation cues
	pub recommendation_cue: bool,

	/// Message reads as a question
	pub is_question_like: bool,

	/// Message is long or multi-clause
	pub is_complex: bool,

	/// Distinct policy topics mentioned
	pub policy_topics: Vec<String>,
}

impl LexicalSignals {
	/// Any explicit product reference embedded in the message
	///
	/// Off-topic and knowledge messages still surface products when one of
	/// these is present; this is what prevents classifier false negatives
	/// from hiding concrete product references.
	pub fn has_explicit_product_signal(&self) -> bool {
		!self.sku_tokens.is_empty()
			|| !self.attribute_filters.is_empty()
			|| self.detail_request
			|| self.inferred_category.is_some()
	}
}

/// Machine-readable reason attached to a clarify component
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityReason {
	/// Classifier returned `other` but the text looks answerable
	UnclearIntent,
	/// "compare" requested with fewer than two identifiable items
	InsufficientCompareItems,
	/// Product request matched nothing in the catalog
	NoMatchingProducts,
}

impl AmbiguityReason {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::UnclearIntent => "unclear_intent",
			Self::InsufficientCompareItems => "insufficient_compare_items",
			Self::NoMatchingProducts => "no_matching_products",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_known_labels() {
		assert_eq!(
			IntentLabel::parse("browse_products"),
			IntentLabel::BrowseProducts
		);
		assert_eq!(IntentLabel::parse("FAQ"), IntentLabel::KnowledgeQuery);
		assert_eq!(IntentLabel::parse("greeting"), IntentLabel::Smalltalk);
		assert_eq!(IntentLabel::parse("off_topic"), IntentLabel::OffTopic);
	}

	#[test]
	fn test_parse_unknown_label_is_other() {
		assert_eq!(IntentLabel::parse("purchase_intent"), IntentLabel::Other);
	}

	#[test]
	fn test_parse_empty_label_defaults_to_knowledge() {
		assert_eq!(IntentLabel::parse(""), IntentLabel::KnowledgeQuery);
		assert_eq!(IntentLabel::parse("  "), IntentLabel::KnowledgeQuery);
	}

	#[test]
	fn test_explicit_product_signal() {
		let mut signals = LexicalSignals::default();
		assert!(!signals.has_explicit_product_signal());

		signals.sku_tokens.push("ST-4401".to_string());
		assert!(signals.has_explicit_product_signal());

		let signals = LexicalSignals {
			inferred_category: Some("staples".to_string()),
			..Default::default()
		};
		assert!(signals.has_explicit_product_signal());
	}
}
