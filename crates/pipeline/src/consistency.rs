//! Response consistency policy
//!
//! The generated reply must never tell the user "nothing found" when the
//! retrieval layer did find products. This is the last gate before a reply
//! leaves the pipeline, and the same correction is applied to replies served
//! from cache.

use shoptalk_types::ChatReply;
use tracing::warn;

use crate::localize::Localizer;

/// Closed list of phrases that contradict found products
/// (case-insensitive substring match)
const NO_MATCH_MARKERS: &[&str] = &[
	"couldn't find",
	"could not find",
	"couldn\u{2019}t find",
	"no match",
	"no matches",
	"check our catalog",
	"email sales@",
];

fn contradicts_found_products(reply_text: &str) -> bool {
	if reply_text.trim().is_empty() {
		return true;
	}
	let lowered = reply_text.to_lowercase();
	NO_MATCH_MARKERS
		.iter()
		.any(|marker| lowered.contains(marker))
}

/// Correct a freshly composed reply against the retrieval outcome
///
/// No-op when no products were found. Otherwise a contradicting or empty
/// reply text is replaced with the localized default (and the hint reset
/// alongside it); an empty hint is always filled.
pub fn ensure_consistent_reply(
	reply: &mut ChatReply,
	has_products: bool,
	localizer: &Localizer,
	locale: &str,
) {
	if !has_products {
		return;
	}

	if contradicts_found_products(&reply.reply_text) {
		warn!(
			"Generated reply contradicts {} found products; replacing with default",
			reply.product_carousel.len()
		);
		reply.reply_text = localizer.default_reply(locale);
		reply.call_to_action = localizer.default_call_to_action(locale);
	}

	if reply.call_to_action.trim().is_empty() {
		reply.call_to_action = localizer.default_call_to_action(locale);
	}
}

/// Apply the same text correction to a reply served from cache
///
/// Unlike the fresh-reply path, a pre-existing non-empty hint is preserved
/// even when the text is replaced.
pub fn normalize_cached_response(
	reply: &mut ChatReply,
	has_products: bool,
	localizer: &Localizer,
	locale: &str,
) {
	if !has_products {
		return;
	}

	if contradicts_found_products(&reply.reply_text) {
		reply.reply_text = localizer.default_reply(locale);
	}

	if reply.call_to_action.trim().is_empty() {
		reply.call_to_action = localizer.default_call_to_action(locale);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rust_decimal::Decimal;
	use shoptalk_types::{CarouselItem, IntentLabel};

	fn reply_with_products(text: &str, cta: &str) -> ChatReply {
		let mut reply = ChatReply::new("conv-1".to_string(), IntentLabel::BrowseProducts);
		reply.reply_text = text.to_string();
		reply.call_to_action = cta.to_string();
		reply.product_carousel.push(CarouselItem {
			sku: "ST-4401".to_string(),
			title: "Staples".to_string(),
			price: Decimal::new(999, 2),
			currency: "USD".to_string(),
			in_stock: true,
			image_url: None,
			product_url: None,
		});
		reply
	}

	#[test]
	fn test_no_match_text_is_replaced_when_products_exist() {
		let localizer = Localizer;
		let mut reply = reply_with_products(
			"I couldn't find specific 16 gauge options in our current offerings.",
			"",
		);
		ensure_consistent_reply(&mut reply, true, &localizer, "en-US");

		assert_eq!(
			reply.reply_text,
			localizer.default_reply("en-US")
		);
		assert_eq!(
			reply.call_to_action,
			localizer.default_call_to_action("en-US")
		);
	}

	#[test]
	fn test_no_products_means_no_change() {
		let localizer = Localizer;
		let original = "I couldn't find anything matching that.";
		let mut reply = ChatReply::new("conv-1".to_string(), IntentLabel::KnowledgeQuery);
		reply.reply_text = original.to_string();

		ensure_consistent_reply(&mut reply, false, &localizer, "en-US");
		assert_eq!(reply.reply_text, original);
		assert!(reply.call_to_action.is_empty());
	}

	#[test]
	fn test_empty_reply_text_is_replaced() {
		let localizer = Localizer;
		let mut reply = reply_with_products("", "");
		ensure_consistent_reply(&mut reply, true, &localizer, "en-US");
		assert!(!reply.reply_text.is_empty());
	}

	#[test]
	fn test_consistent_text_keeps_its_hint() {
		let localizer = Localizer;
		let mut reply = reply_with_products(
			"Here are three staple options for cartons.",
			"Ask me about bulk pricing.",
		);
		ensure_consistent_reply(&mut reply, true, &localizer, "en-US");
		assert_eq!(reply.reply_text, "Here are three staple options for cartons.");
		assert_eq!(reply.call_to_action, "Ask me about bulk pricing.");
	}

	#[test]
	fn test_cached_variant_preserves_existing_hint() {
		let localizer = Localizer;
		let mut reply = reply_with_products("No match in our catalog.", "Browse the sale page.");
		normalize_cached_response(&mut reply, true, &localizer, "en-US");

		// Text is corrected, the cached hint survives
		assert_eq!(reply.reply_text, localizer.default_reply("en-US"));
		assert_eq!(reply.call_to_action, "Browse the sale page.");
	}

	#[test]
	fn test_case_insensitive_marker_match() {
		let localizer = Localizer;
		let mut reply = reply_with_products("NO MATCH found, sorry.", "cta");
		ensure_consistent_reply(&mut reply, true, &localizer, "en-US");
		assert_eq!(reply.reply_text, localizer.default_reply("en-US"));
	}
}
