//! Lexical analysis of the raw chat message
//!
//! Runs independently of the classifier so that concrete product references
//! (SKU tokens, attribute filters, category words) are never lost to a
//! classifier false negative.

use regex::Regex;
use shoptalk_types::LexicalSignals;

/// Store-policy vocabulary used to count policy topics
const POLICY_TOPICS: &[&str] = &[
	"shipping",
	"delivery",
	"return",
	"refund",
	"warranty",
	"exchange",
	"payment",
	"privacy",
	"cancellation",
];

/// Product-category vocabulary for category inference
const CATEGORY_TERMS: &[&str] = &[
	"staples",
	"staplers",
	"nails",
	"screws",
	"bolts",
	"washers",
	"anchors",
	"rivets",
	"brads",
	"pins",
	"wire",
	"mesh",
	"strapping",
	"tape",
	"glue",
	"fasteners",
	"tools",
];

/// Question openers for question-likeness detection
const QUESTION_OPENERS: &[&str] = &[
	"who", "what", "when", "where", "why", "how", "which", "can", "could", "do", "does", "is",
	"are", "will", "would", "should",
];

/// Lowercase text and collapse runs of whitespace
///
/// This is the normalization applied before every lexical match and before
/// cache-key hashing of the message.
pub fn normalize_text(text: &str) -> String {
	text.split_whitespace()
		.collect::<Vec<_>>()
		.join(" ")
		.to_lowercase()
}

/// Compiled lexical matchers, built once per service
#[derive(Debug, Clone)]
pub struct LexicalAnalyzer {
	sku_re: Regex,
	code_shape_re: Regex,
	gauge_re: Regex,
}

impl LexicalAnalyzer {
	pub fn new() -> Self {
		// Alphanumeric vendor codes like ST-4401, A11, 3515G8
		let sku_re = Regex::new(r"\b([A-Za-z]{1,5}-?\d{2,6}[A-Za-z0-9]*|\d{3,6}[A-Za-z]{1,4}\d*)\b")
			.expect("sku pattern is valid");
		let code_shape_re =
			Regex::new(r"^[A-Z0-9][A-Z0-9-]{1,19}$").expect("code shape pattern is valid");
		let gauge_re =
			Regex::new(r"\b(\d{1,2})[\s-]*(?:ga|gauge)\b").expect("gauge pattern is valid");
		Self {
			sku_re,
			code_shape_re,
			gauge_re,
		}
	}

	/// Strip surrounding punctuation from a classifier-proposed code and
	/// uppercase it
	pub fn clean_code(&self, raw: &str) -> String {
		raw.trim()
			.trim_matches(|c: char| !c.is_alphanumeric())
			.to_uppercase()
	}

	/// Whether a cleaned token is shaped like a product code
	///
	/// Requires at least one digit; a bare word is never a code.
	pub fn looks_like_code(&self, cleaned: &str) -> bool {
		self.code_shape_re.is_match(cleaned) && cleaned.chars().any(|c| c.is_ascii_digit())
	}

	/// Extract SKU-shaped tokens from the raw text, cleaned and deduplicated
	pub fn extract_skus(&self, text: &str) -> Vec<String> {
		let mut tokens = Vec::new();
		for capture in self.sku_re.find_iter(text) {
			let cleaned = self.clean_code(capture.as_str());
			// Gauge mentions ("16 gauge") are attribute filters, not SKUs
			if self.is_gauge_fragment(text, capture.start(), capture.end()) {
				continue;
			}
			if self.looks_like_code(&cleaned) && !tokens.contains(&cleaned) {
				tokens.push(cleaned);
			}
		}
		tokens
	}

	fn is_gauge_fragment(&self, text: &str, start: usize, end: usize) -> bool {
		let tail = &text[end..];
		let trimmed = tail.trim_start();
		let followed_by_gauge =
			trimmed.to_lowercase().starts_with("gauge") || trimmed.to_lowercase().starts_with("ga ");
		let token = &text[start..end];
		followed_by_gauge && token.chars().all(|c| c.is_ascii_digit())
	}

	/// Full lexical pass over one message
	pub fn analyze(&self, text: &str) -> LexicalSignals {
		let normalized = normalize_text(text);

		let sku_tokens = self.extract_skus(text);

		let mut attribute_filters = Vec::new();
		if let Some(capture) = self.gauge_re.captures(&normalized) {
			if let Some(gauge) = capture.get(1) {
				attribute_filters.push(("gauge".to_string(), gauge.as_str().to_string()));
			}
		}
		for material in [
			"stainless",
			"steel",
			"brass",
			"copper",
			"aluminum",
			"galvanized",
			"nylon",
			"plastic",
		] {
			if contains_word(&normalized, material) {
				attribute_filters.push(("material".to_string(), material.to_string()));
			}
		}

		let detail_request = ["detail", "details", "spec", "specs", "specification"]
			.iter()
			.any(|cue| contains_word(&normalized, cue))
			|| normalized.contains("tell me more")
			|| normalized.contains("more about");

		let inferred_category = CATEGORY_TERMS
			.iter()
			.find(|term| contains_word(&normalized, term))
			.map(|term| term.to_string());

		let compare_request = normalized.contains("compare");

		let table_cue = ["table", "grid", "spreadsheet"]
			.iter()
			.any(|cue| contains_word(&normalized, cue));
		let bullet_cue = contains_word(&normalized, "bullet")
			|| contains_word(&normalized, "bullets")
			|| normalized.contains("short list");
		let count_cue = normalized.contains("how many")
			|| contains_word(&normalized, "count")
			|| normalized.contains("number of");
		let recommendation_cue = ["suggest", "recommend", "minimal"]
			.iter()
			.any(|cue| normalized.contains(cue));

		let is_question_like = normalized.contains('?')
			|| QUESTION_OPENERS
				.iter()
				.any(|opener| normalized.starts_with(&format!("{} ", opener)));

		let word_count = normalized.split(' ').filter(|w| !w.is_empty()).count();
		let clause_count = normalized.matches(" and ").count() + normalized.matches(',').count();
		let is_complex = word_count > 15 || clause_count >= 2;

		let policy_topics: Vec<String> = POLICY_TOPICS
			.iter()
			.filter(|topic| normalized.contains(*topic))
			.map(|topic| topic.to_string())
			.collect();

		LexicalSignals {
			sku_tokens,
			attribute_filters,
			detail_request,
			inferred_category,
			compare_request,
			table_cue,
			bullet_cue,
			count_cue,
			recommendation_cue,
			is_question_like,
			is_complex,
			policy_topics,
		}
	}
}

impl Default for LexicalAnalyzer {
	fn default() -> Self {
		Self::new()
	}
}

fn contains_word(normalized: &str, word: &str) -> bool {
	normalized
		.split(|c: char| !c.is_alphanumeric())
		.any(|token| token == word)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_normalize_collapses_whitespace() {
		assert_eq!(normalize_text("  Hello   WORLD \n"), "hello world");
	}

	#[test]
	fn test_sku_extraction() {
		let lexical = LexicalAnalyzer::new();
		let tokens = lexical.extract_skus("do you have ST-4401 or st4402 in stock?");
		assert_eq!(tokens, vec!["ST-4401".to_string(), "ST4402".to_string()]);
	}

	#[test]
	fn test_gauge_mention_is_not_a_sku() {
		let lexical = LexicalAnalyzer::new();
		let signals = lexical.analyze("do you carry 16 gauge staples?");
		assert!(signals.sku_tokens.is_empty());
		assert!(signals
			.attribute_filters
			.contains(&("gauge".to_string(), "16".to_string())));
		assert_eq!(signals.inferred_category.as_deref(), Some("staples"));
	}

	#[test]
	fn test_code_shape_check() {
		let lexical = LexicalAnalyzer::new();
		assert!(lexical.looks_like_code("ST-4401"));
		assert!(lexical.looks_like_code("A11"));
		assert!(!lexical.looks_like_code("STAPLES"));
		assert!(!lexical.looks_like_code(""));
	}

	#[test]
	fn test_clean_code_strips_punctuation() {
		let lexical = LexicalAnalyzer::new();
		assert_eq!(lexical.clean_code("\"st-4401\","), "ST-4401");
	}

	#[test]
	fn test_policy_topics_counted_once_each() {
		let lexical = LexicalAnalyzer::new();
		let signals = lexical.analyze("what is your shipping and return policy?");
		assert_eq!(signals.policy_topics.len(), 2);
	}

	#[test]
	fn test_rendering_cues() {
		let lexical = LexicalAnalyzer::new();
		let signals = lexical.analyze("show me staples in a table");
		assert!(signals.table_cue);
		assert!(!signals.bullet_cue);

		let signals = lexical.analyze("give me a short list of nails");
		assert!(signals.bullet_cue);
	}

	#[test]
	fn test_question_likeness() {
		let lexical = LexicalAnalyzer::new();
		assert!(lexical.analyze("how do returns work").is_question_like);
		assert!(lexical.analyze("any staples?").is_question_like);
		assert!(!lexical.analyze("show me staples").is_question_like);
	}
}
