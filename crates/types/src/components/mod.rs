//! UI component domain model: the closed component vocabulary, the built
//! component payload and the per-request builder context

use crate::intents::{AmbiguityReason, IntentLabel};
use crate::knowledge::KnowledgeSource;
use crate::products::{CanonicalProduct, ProductField};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Closed enum of UI component types
///
/// Each variant maps to exactly one registered builder and declares the set
/// of canonical product fields its builder reads.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ComponentType {
	QuerySummary,
	ResultCount,
	ProductCards,
	ProductTable,
	ProductBullets,
	ProductDetail,
	Compare,
	Recommendations,
	Clarify,
	KnowledgeAnswer,
	ActionResult,
	Error,
}

impl ComponentType {
	/// Every component type, in declaration order
	///
	/// Used for exhaustive registry validation at startup and in tests.
	pub const ALL: [ComponentType; 12] = [
		Self::QuerySummary,
		Self::ResultCount,
		Self::ProductCards,
		Self::ProductTable,
		Self::ProductBullets,
		Self::ProductDetail,
		Self::Compare,
		Self::Recommendations,
		Self::Clarify,
		Self::KnowledgeAnswer,
		Self::ActionResult,
		Self::Error,
	];

	/// Canonical product fields this component's builder reads
	pub fn required_fields(&self) -> &'static [ProductField] {
		use ProductField::*;
		match self {
			Self::ProductCards => &[Id, Sku, Title, Price, InStock, ImageUrl, ProductUrl],
			Self::ProductTable => &[Id, Sku, Title, Price, InStock, StockQty],
			Self::ProductBullets => &[Sku, Title, Price],
			Self::ProductDetail => &[
				Id, Sku, Title, Price, InStock, StockQty, Material, Gauge, ImageUrl, ProductUrl,
				Attributes,
			],
			Self::Compare => &[Sku, Title, Price, Material, Gauge, Attributes],
			Self::Recommendations => &[Sku, Title, Price, ProductUrl],
			Self::QuerySummary
			| Self::ResultCount
			| Self::Clarify
			| Self::KnowledgeAnswer
			| Self::ActionResult
			| Self::Error => &[],
		}
	}

	/// Whether this component projects canonical products
	pub fn renders_products(&self) -> bool {
		!self.required_fields().is_empty()
	}
}

impl std::fmt::Display for ComponentType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			Self::QuerySummary => "query_summary",
			Self::ResultCount => "result_count",
			Self::ProductCards => "product_cards",
			Self::ProductTable => "product_table",
			Self::ProductBullets => "product_bullets",
			Self::ProductDetail => "product_detail",
			Self::Compare => "compare",
			Self::Recommendations => "recommendations",
			Self::Clarify => "clarify",
			Self::KnowledgeAnswer => "knowledge_answer",
			Self::ActionResult => "action_result",
			Self::Error => "error",
		};
		write!(f, "{}", name)
	}
}

/// A built, self-contained UI payload for one turn of conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChatComponent {
	#[serde(rename = "type")]
	pub component_type: ComponentType,
	#[cfg_attr(feature = "openapi", schema(value_type = Object))]
	pub data: serde_json::Value,
}

impl ChatComponent {
	pub fn new(component_type: ComponentType, data: serde_json::Value) -> Self {
		Self {
			component_type,
			data,
		}
	}
}

/// Per-request accumulator passed by reference into every component builder
///
/// Created after retrieval completes, discarded at response time. Builders
/// read slices of it and never mutate it.
#[derive(Debug, Clone, Default)]
pub struct ComponentContext {
	pub user_text: String,
	pub locale: String,
	pub intent: Option<IntentLabel>,
	pub planned_types: Vec<ComponentType>,
	pub products: Vec<CanonicalProduct>,
	pub recommendations: Vec<CanonicalProduct>,
	pub knowledge_answer: Option<String>,
	pub knowledge_sources: Vec<KnowledgeSource>,
	pub attribute_filters: Vec<(String, String)>,
	pub sku_tokens: Vec<String>,
	pub ambiguity_reason: Option<AmbiguityReason>,
	pub error_message: Option<String>,
	pub result_count: usize,
	pub action_message: Option<String>,
}

/// Errors raised by the component registry
///
/// A planned type with no registered builder is a planner/registry mismatch,
/// a programming error that must surface loudly rather than being skipped.
#[derive(Error, Debug)]
pub enum RegistryError {
	#[error("No builder registered for component type '{component_type}'")]
	MissingBuilder { component_type: ComponentType },

	#[error("Registry validation failed, uncovered component types: {missing:?}")]
	IncompleteRegistry { missing: Vec<ComponentType> },
}
