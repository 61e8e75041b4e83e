//! Output planner: a deterministic decision table from request shape to the
//! ordered list of UI components to render
//!
//! This is a pure function with no I/O. Component choice must be
//! reproducible and testable, so it is a decision table rather than a model
//! call.

use shoptalk_types::{AmbiguityReason, ComponentType, IntentLabel};
use tracing::debug;

use crate::lexical::normalize_text;

/// Plan the ordered, deduplicated list of component types for one turn
///
/// Rules are evaluated in order; deduplication preserves the first
/// occurrence of each type.
pub fn plan(
	user_text: &str,
	intent: IntentLabel,
	sku_count: usize,
	product_count: usize,
	is_detail_mode: bool,
	is_ambiguous: bool,
	ambiguity_reason: Option<AmbiguityReason>,
) -> Vec<ComponentType> {
	use ComponentType::*;

	let normalized = normalize_text(user_text);

	// 1. Nothing to work with
	if normalized.is_empty() {
		return vec![Error];
	}

	// 2. Upstream flagged the request as ambiguous
	if is_ambiguous {
		debug!(
			"Planning clarify for ambiguous request ({:?})",
			ambiguity_reason
		);
		return vec![QuerySummary, Clarify];
	}

	// 3. Knowledge intents render the answer, nothing else
	if intent.is_knowledge_label() {
		return vec![QuerySummary, KnowledgeAnswer];
	}

	// 4. Comparison requests need at least two identifiable items
	if normalized.contains("compare") {
		if sku_count < 2 {
			return vec![QuerySummary, Clarify];
		}
		return vec![QuerySummary, Compare, ResultCount];
	}

	// 5. Product rendering path
	let mut planned = vec![QuerySummary];

	if intent.is_product_label() && product_count == 0 {
		// Never render an empty product UI
		push_unique(&mut planned, Clarify);
		return planned;
	}

	let detail = is_detail_mode || (sku_count == 1 && product_count == 1);
	let product_component = if detail {
		ProductDetail
	} else if has_table_cue(&normalized) {
		ProductTable
	} else if has_bullet_cue(&normalized) {
		ProductBullets
	} else {
		ProductCards
	};

	if !detail {
		push_unique(&mut planned, ResultCount);
	}
	push_unique(&mut planned, product_component);

	if has_count_cue(&normalized) {
		push_unique(&mut planned, ResultCount);
	}
	if has_recommendation_cue(&normalized) {
		push_unique(&mut planned, Recommendations);
	}

	planned
}

fn push_unique(planned: &mut Vec<ComponentType>, component: ComponentType) {
	if !planned.contains(&component) {
		planned.push(component);
	}
}

fn has_table_cue(normalized: &str) -> bool {
	["table", "grid", "spreadsheet"]
		.iter()
		.any(|cue| contains_word(normalized, cue))
}

fn has_bullet_cue(normalized: &str) -> bool {
	contains_word(normalized, "bullet")
		|| contains_word(normalized, "bullets")
		|| normalized.contains("short list")
}

fn has_count_cue(normalized: &str) -> bool {
	normalized.contains("how many")
		|| contains_word(normalized, "count")
		|| normalized.contains("number of")
}

fn has_recommendation_cue(normalized: &str) -> bool {
	["suggest", "recommend", "minimal"]
		.iter()
		.any(|cue| normalized.contains(cue))
}

fn contains_word(normalized: &str, word: &str) -> bool {
	normalized
		.split(|c: char| !c.is_alphanumeric())
		.any(|token| token == word)
}

#[cfg(test)]
mod tests {
	use super::*;
	use ComponentType::*;

	#[test]
	fn test_empty_text_routes_to_error() {
		assert_eq!(
			plan("   ", IntentLabel::BrowseProducts, 0, 5, false, false, None),
			vec![Error]
		);
	}

	#[test]
	fn test_ambiguous_routes_to_clarify() {
		assert_eq!(
			plan(
				"something",
				IntentLabel::Other,
				0,
				0,
				false,
				true,
				Some(AmbiguityReason::UnclearIntent)
			),
			vec![QuerySummary, Clarify]
		);
	}

	#[test]
	fn test_knowledge_intents_render_answer() {
		for intent in [IntentLabel::KnowledgeQuery, IntentLabel::OffTopic] {
			assert_eq!(
				plan("how do returns work?", intent, 0, 0, false, false, None),
				vec![QuerySummary, KnowledgeAnswer]
			);
		}
	}

	#[test]
	fn test_compare_with_one_sku_clarifies() {
		assert_eq!(
			plan(
				"compare ST-4401",
				IntentLabel::SearchSpecific,
				1,
				1,
				false,
				false,
				None
			),
			vec![QuerySummary, Clarify]
		);
	}

	#[test]
	fn test_compare_with_two_skus_compares() {
		assert_eq!(
			plan(
				"compare ST-4401 and ST-4402",
				IntentLabel::SearchSpecific,
				2,
				2,
				false,
				false,
				None
			),
			vec![QuerySummary, Compare, ResultCount]
		);
	}

	#[test]
	fn test_browse_defaults_to_cards_with_count_first() {
		assert_eq!(
			plan(
				"show me staples",
				IntentLabel::BrowseProducts,
				0,
				8,
				false,
				false,
				None
			),
			vec![QuerySummary, ResultCount, ProductCards]
		);
	}

	#[test]
	fn test_single_sku_single_result_is_detail_mode() {
		assert_eq!(
			plan(
				"price for ST-4401",
				IntentLabel::SearchSpecific,
				1,
				1,
				false,
				false,
				None
			),
			vec![QuerySummary, ProductDetail]
		);
	}

	#[test]
	fn test_zero_products_for_product_intent_clarifies() {
		assert_eq!(
			plan(
				"show me unobtainium staples",
				IntentLabel::BrowseProducts,
				0,
				0,
				false,
				false,
				None
			),
			vec![QuerySummary, Clarify]
		);
	}

	#[test]
	fn test_table_cue_selects_table() {
		assert_eq!(
			plan(
				"show staples in a table",
				IntentLabel::BrowseProducts,
				0,
				5,
				false,
				false,
				None
			),
			vec![QuerySummary, ResultCount, ProductTable]
		);
	}

	#[test]
	fn test_bullet_cue_selects_bullets() {
		assert_eq!(
			plan(
				"short list of nails please",
				IntentLabel::BrowseProducts,
				0,
				5,
				false,
				false,
				None
			),
			vec![QuerySummary, ResultCount, ProductBullets]
		);
	}

	#[test]
	fn test_count_cue_forces_result_count_once() {
		// ResultCount is already planned; the cue must not duplicate it
		assert_eq!(
			plan(
				"how many staples do you carry",
				IntentLabel::BrowseProducts,
				0,
				5,
				false,
				false,
				None
			),
			vec![QuerySummary, ResultCount, ProductCards]
		);
	}

	#[test]
	fn test_recommendation_cue_appends_recommendations() {
		assert_eq!(
			plan(
				"recommend some staples",
				IntentLabel::BrowseProducts,
				0,
				5,
				false,
				false,
				None
			),
			vec![QuerySummary, ResultCount, ProductCards, Recommendations]
		);
	}

	#[test]
	fn test_plan_is_idempotent() {
		let args = (
			"compare ST-4401 and ST-4402",
			IntentLabel::SearchSpecific,
			2usize,
			2usize,
		);
		let first = plan(args.0, args.1, args.2, args.3, false, false, None);
		let second = plan(args.0, args.1, args.2, args.3, false, false, None);
		assert_eq!(first, second);
	}
}
