//! Intent router: classifier output + lexical evidence → one normalized
//! decision per request

use shoptalk_types::{IntentDecision, IntentLabel, LexicalSignals, NluOutput};
use tracing::debug;

use crate::lexical::LexicalAnalyzer;

/// Resolve the per-request intent decision
///
/// Total function: any classifier output, however degraded, yields a usable
/// decision. Lexical SKU evidence takes precedence over the classifier's
/// proposed product code, and a present SKU token forces product intent no
/// matter what the classifier said.
pub fn resolve_intent(
	nlu: &NluOutput,
	user_text: &str,
	lexical: &LexicalAnalyzer,
	signals: &LexicalSignals,
) -> IntentDecision {
	let intent = IntentLabel::parse(&nlu.intent);

	let refined = nlu.refined_query.trim();
	let search_query = if refined.is_empty() {
		user_text.trim().to_string()
	} else {
		refined.to_string()
	};

	// Lexical extraction wins; the classifier's code is only trusted when it
	// survives cleaning and still looks like a code
	let sku_token = signals.sku_tokens.first().cloned().or_else(|| {
		nlu.product_code.as_deref().and_then(|raw| {
			let cleaned = lexical.clean_code(raw);
			lexical.looks_like_code(&cleaned).then_some(cleaned)
		})
	});

	let is_product_intent =
		intent.is_product_label() || nlu.show_products || sku_token.is_some();

	debug!(
		"Resolved intent '{}' (product intent: {}, sku: {:?})",
		intent, is_product_intent, sku_token
	);

	IntentDecision {
		intent,
		search_query,
		show_products: nlu.show_products,
		sku_token,
		is_product_intent,
		language: nlu.language.clone(),
		locale: nlu.locale.clone(),
		currency: nlu.currency.clone(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn nlu(intent: &str) -> NluOutput {
		NluOutput {
			language: "en".to_string(),
			locale: "en-US".to_string(),
			intent: intent.to_string(),
			show_products: false,
			currency: "USD".to_string(),
			refined_query: String::new(),
			product_code: None,
		}
	}

	fn resolve(nlu: &NluOutput, text: &str) -> IntentDecision {
		let lexical = LexicalAnalyzer::new();
		let signals = lexical.analyze(text);
		resolve_intent(nlu, text, &lexical, &signals)
	}

	#[test]
	fn test_refined_query_falls_back_to_user_text() {
		let decision = resolve(&nlu("browse_products"), "show me staples");
		assert_eq!(decision.search_query, "show me staples");

		let mut output = nlu("browse_products");
		output.refined_query = "carton staples".to_string();
		let decision = resolve(&output, "show me staples");
		assert_eq!(decision.search_query, "carton staples");
	}

	#[test]
	fn test_sku_token_forces_product_intent() {
		// Classifier calls it off-topic; lexical SKU evidence overrides
		let decision = resolve(&nlu("off_topic"), "is ST-4401 any good?");
		assert_eq!(decision.intent, IntentLabel::OffTopic);
		assert_eq!(decision.sku_token.as_deref(), Some("ST-4401"));
		assert!(decision.is_product_intent);
	}

	#[test]
	fn test_classifier_code_needs_code_shape() {
		let mut output = nlu("knowledge_query");
		output.product_code = Some("staples".to_string());
		let decision = resolve(&output, "what about staples?");
		// A bare word proposed by the classifier is not a code
		assert_eq!(decision.sku_token, None);
		assert!(!decision.is_product_intent);

		output.product_code = Some(" st-4401 ".to_string());
		let decision = resolve(&output, "what about that one?");
		assert_eq!(decision.sku_token.as_deref(), Some("ST-4401"));
		assert!(decision.is_product_intent);
	}

	#[test]
	fn test_lexical_sku_beats_classifier_code() {
		let mut output = nlu("search_specific");
		output.product_code = Some("ZZ-9999".to_string());
		let decision = resolve(&output, "price for ST-4401 please");
		assert_eq!(decision.sku_token.as_deref(), Some("ST-4401"));
	}

	#[test]
	fn test_show_products_flag_makes_product_intent() {
		let mut output = nlu("knowledge_query");
		output.show_products = true;
		let decision = resolve(&output, "how do your staplers hold up?");
		assert!(decision.is_product_intent);
		assert_eq!(decision.intent, IntentLabel::KnowledgeQuery);
	}

	#[test]
	fn test_unknown_intent_defaults_to_knowledge_query() {
		let decision = resolve(&nlu(""), "hello there");
		assert_eq!(decision.intent, IntentLabel::KnowledgeQuery);
	}
}
