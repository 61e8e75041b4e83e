//! Chat reply wire shape

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::components::ChatComponent;
use crate::intents::IntentLabel;
use crate::knowledge::KnowledgeSource;
use crate::products::CanonicalProduct;

/// Product projection for the reply carousel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CarouselItem {
	pub sku: String,
	pub title: String,
	#[cfg_attr(feature = "openapi", schema(value_type = String))]
	pub price: Decimal,
	pub currency: String,
	pub in_stock: bool,
	pub image_url: Option<String>,
	pub product_url: Option<String>,
}

impl From<&CanonicalProduct> for CarouselItem {
	fn from(product: &CanonicalProduct) -> Self {
		Self {
			sku: product.sku.clone(),
			title: product.title.clone(),
			price: product.price,
			currency: product.currency.clone(),
			in_stock: product.in_stock,
			image_url: product.image_url.clone(),
			product_url: product.product_url.clone(),
		}
	}
}

/// One outbound chat turn
///
/// `reply_text` and `call_to_action` pass through the consistency policy
/// before this struct leaves the pipeline; `components` carries the typed UI
/// payloads in planned order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChatReply {
	pub conversation_id: String,
	pub reply_text: String,
	#[serde(default)]
	pub call_to_action: String,
	pub product_carousel: Vec<CarouselItem>,
	pub follow_up_questions: Vec<String>,
	pub intent: IntentLabel,
	pub sources: Vec<KnowledgeSource>,
	pub components: Vec<ChatComponent>,
	/// Set when this reply was rehydrated from the result cache
	#[serde(default)]
	pub served_from_cache: bool,
}

impl ChatReply {
	/// Empty reply skeleton for one conversation turn
	pub fn new(conversation_id: String, intent: IntentLabel) -> Self {
		Self {
			conversation_id,
			reply_text: String::new(),
			call_to_action: String::new(),
			product_carousel: Vec::new(),
			follow_up_questions: Vec::new(),
			intent,
			sources: Vec::new(),
			components: Vec::new(),
			served_from_cache: false,
		}
	}

	/// Whether any products are attached to this reply
	pub fn has_products(&self) -> bool {
		!self.product_carousel.is_empty()
	}
}
