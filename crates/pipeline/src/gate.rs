//! Retrieval gate: which backing indexes to query for a given message

use shoptalk_types::{IntentDecision, IntentLabel, LexicalSignals, RetrievalDecision};
use tracing::debug;

/// Decide which indexes to query, plus the auxiliary flags used downstream
///
/// Decision table, first match wins on intent:
///
/// | intent                          | knowledge | products                 |
/// |---------------------------------|-----------|--------------------------|
/// | off_topic                       | yes       | iff explicit signal      |
/// | knowledge_query                 | yes       | iff explicit signal      |
/// | browse_products/search_specific | no        | yes                      |
/// | smalltalk/other                 | no        | no                       |
///
/// Off-topic and FAQ messages still surface products when the user embeds a
/// concrete product reference; the classifier alone never suppresses one.
pub fn decide_retrieval(
	decision: &IntentDecision,
	signals: &LexicalSignals,
) -> RetrievalDecision {
	let explicit_product_signal = signals.has_explicit_product_signal();

	let (use_knowledge, use_products) = match decision.intent {
		IntentLabel::OffTopic | IntentLabel::KnowledgeQuery => (true, explicit_product_signal),
		IntentLabel::BrowseProducts | IntentLabel::SearchSpecific => (false, true),
		IntentLabel::Smalltalk | IntentLabel::Other => (false, false),
	};

	let policy_topic_count = signals.policy_topics.len();
	let is_policy_intent =
		decision.intent == IntentLabel::KnowledgeQuery && policy_topic_count > 0;

	let looks_like_product = explicit_product_signal || decision.is_product_intent;

	debug!(
		"Retrieval gate: products={} knowledge={} policy_topics={}",
		use_products, use_knowledge, policy_topic_count
	);

	RetrievalDecision {
		use_products,
		use_knowledge,
		is_question_like: signals.is_question_like,
		is_complex: signals.is_complex,
		policy_topic_count,
		is_policy_intent,
		looks_like_product,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn decision(intent: IntentLabel) -> IntentDecision {
		IntentDecision {
			intent,
			search_query: "staples".to_string(),
			show_products: false,
			sku_token: None,
			is_product_intent: intent.is_product_label(),
			language: "en".to_string(),
			locale: "en-US".to_string(),
			currency: "USD".to_string(),
		}
	}

	#[test]
	fn test_retrieval_matrix() {
		let plain = LexicalSignals::default();
		let with_sku = LexicalSignals {
			sku_tokens: vec!["ST-4401".to_string()],
			..Default::default()
		};

		// (intent, signals, expected use_knowledge, expected use_products)
		let cases = [
			(IntentLabel::OffTopic, &plain, true, false),
			(IntentLabel::OffTopic, &with_sku, true, true),
			(IntentLabel::KnowledgeQuery, &plain, true, false),
			(IntentLabel::KnowledgeQuery, &with_sku, true, true),
			(IntentLabel::BrowseProducts, &plain, false, true),
			(IntentLabel::SearchSpecific, &plain, false, true),
			(IntentLabel::Smalltalk, &plain, false, false),
			(IntentLabel::Other, &plain, false, false),
		];

		for (intent, signals, knowledge, products) in cases {
			let result = decide_retrieval(&decision(intent), signals);
			assert_eq!(result.use_knowledge, knowledge, "knowledge for {}", intent);
			assert_eq!(result.use_products, products, "products for {}", intent);
		}
	}

	#[test]
	fn test_attribute_filter_is_an_explicit_signal() {
		let signals = LexicalSignals {
			attribute_filters: vec![("gauge".to_string(), "16".to_string())],
			..Default::default()
		};
		let result = decide_retrieval(&decision(IntentLabel::KnowledgeQuery), &signals);
		assert!(result.use_products);
		assert!(result.use_knowledge);
	}

	#[test]
	fn test_policy_intent_requires_knowledge_intent_and_topics() {
		let signals = LexicalSignals {
			policy_topics: vec!["shipping".to_string()],
			..Default::default()
		};
		let result = decide_retrieval(&decision(IntentLabel::KnowledgeQuery), &signals);
		assert!(result.is_policy_intent);
		assert_eq!(result.policy_topic_count, 1);

		// Policy words inside a browse request do not make a policy intent
		let result = decide_retrieval(&decision(IntentLabel::BrowseProducts), &signals);
		assert!(!result.is_policy_intent);
	}
}
