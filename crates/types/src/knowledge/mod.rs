//! Knowledge domain model: citation sources and multi-hop retrieval output

use serde::{Deserialize, Serialize};

/// Where a citation source came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum SourceKind {
	/// Knowledge-base article
	Knowledge,
	/// Product citation above the distance threshold
	Product,
	/// Low-confidence product citation surfaced only because the classifier
	/// asked for products
	ProductFallback,
}

/// A single citation attached to a reply
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct KnowledgeSource {
	pub title: String,
	pub snippet: String,
	pub url: Option<String>,
	/// Relevance in [0, 1]; product citations derive it from vector distance
	pub relevance: f64,
	pub kind: SourceKind,
}

impl KnowledgeSource {
	pub fn new(title: String, snippet: String, relevance: f64, kind: SourceKind) -> Self {
		Self {
			title,
			snippet,
			url: None,
			relevance,
			kind,
		}
	}

	pub fn with_url(mut self, url: String) -> Self {
		self.url = Some(url);
		self
	}
}

/// Output of the multi-hop knowledge retrieval path
///
/// Policy questions may be decomposed into sub-questions by the knowledge
/// collaborator; the decomposition flags travel back for observability.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KnowledgeRetrieval {
	pub sources: Vec<KnowledgeSource>,
	pub decomposition_used: bool,
	pub decomposition_reason: Option<String>,
}

impl KnowledgeRetrieval {
	/// Single-shot retrieval result with no decomposition
	pub fn simple(sources: Vec<KnowledgeSource>) -> Self {
		Self {
			sources,
			decomposition_used: false,
			decomposition_reason: None,
		}
	}
}
