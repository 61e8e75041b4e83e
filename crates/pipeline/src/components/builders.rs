//! Default component builders
//!
//! Each builder is a pure projection from the shared context into one typed,
//! self-contained payload. Product builders only read fields their component
//! type declares in `required_fields`.

use serde_json::{json, Value};
use shoptalk_types::constants::limits::COMPARE_PRODUCT_LIMIT;
use shoptalk_types::{CanonicalProduct, ChatComponent, ComponentContext, ComponentType};

use super::{ComponentBuilder, ComponentRegistry};

/// Register every default builder
pub fn register_default_builders(registry: &mut ComponentRegistry) {
	registry.register(Box::new(QuerySummaryBuilder));
	registry.register(Box::new(ResultCountBuilder));
	registry.register(Box::new(ProductCardsBuilder));
	registry.register(Box::new(ProductTableBuilder));
	registry.register(Box::new(ProductBulletsBuilder));
	registry.register(Box::new(ProductDetailBuilder));
	registry.register(Box::new(CompareBuilder));
	registry.register(Box::new(RecommendationsBuilder));
	registry.register(Box::new(ClarifyBuilder));
	registry.register(Box::new(KnowledgeAnswerBuilder));
	registry.register(Box::new(ActionResultBuilder));
	registry.register(Box::new(ErrorBuilder));
}

pub struct QuerySummaryBuilder;

impl ComponentBuilder for QuerySummaryBuilder {
	fn component_type(&self) -> ComponentType {
		ComponentType::QuerySummary
	}

	fn build(&self, context: &ComponentContext) -> ChatComponent {
		ChatComponent::new(
			self.component_type(),
			json!({
				"query": context.user_text,
				"intent": context.intent,
				"sku_tokens": context.sku_tokens,
				"filters": context
					.attribute_filters
					.iter()
					.map(|(name, value)| json!({"name": name, "value": value}))
					.collect::<Vec<_>>(),
			}),
		)
	}
}

pub struct ResultCountBuilder;

impl ComponentBuilder for ResultCountBuilder {
	fn component_type(&self) -> ComponentType {
		ComponentType::ResultCount
	}

	fn build(&self, context: &ComponentContext) -> ChatComponent {
		ChatComponent::new(
			self.component_type(),
			json!({ "count": context.result_count }),
		)
	}
}

fn card_payload(product: &CanonicalProduct) -> Value {
	json!({
		"id": product.id,
		"sku": product.sku,
		"title": product.title,
		"price": product.price,
		"currency": product.currency,
		"in_stock": product.in_stock,
		"image_url": product.image_url,
		"product_url": product.product_url,
	})
}

pub struct ProductCardsBuilder;

impl ComponentBuilder for ProductCardsBuilder {
	fn component_type(&self) -> ComponentType {
		ComponentType::ProductCards
	}

	fn build(&self, context: &ComponentContext) -> ChatComponent {
		let cards: Vec<Value> = context.products.iter().map(card_payload).collect();
		ChatComponent::new(self.component_type(), json!({ "products": cards }))
	}
}

pub struct ProductTableBuilder;

impl ComponentBuilder for ProductTableBuilder {
	fn component_type(&self) -> ComponentType {
		ComponentType::ProductTable
	}

	fn build(&self, context: &ComponentContext) -> ChatComponent {
		let rows: Vec<Value> = context
			.products
			.iter()
			.map(|product| {
				json!({
					"id": product.id,
					"sku": product.sku,
					"title": product.title,
					"price": product.price,
					"in_stock": product.in_stock,
					"stock_qty": product.stock_qty,
				})
			})
			.collect();
		ChatComponent::new(
			self.component_type(),
			json!({
				"columns": ["sku", "title", "price", "in_stock", "stock_qty"],
				"rows": rows,
			}),
		)
	}
}

pub struct ProductBulletsBuilder;

impl ComponentBuilder for ProductBulletsBuilder {
	fn component_type(&self) -> ComponentType {
		ComponentType::ProductBullets
	}

	fn build(&self, context: &ComponentContext) -> ChatComponent {
		let items: Vec<String> = context
			.products
			.iter()
			.map(|product| {
				format!(
					"{} — {} {} ({})",
					product.title, product.price, product.currency, product.sku
				)
			})
			.collect();
		ChatComponent::new(self.component_type(), json!({ "items": items }))
	}
}

pub struct ProductDetailBuilder;

impl ComponentBuilder for ProductDetailBuilder {
	fn component_type(&self) -> ComponentType {
		ComponentType::ProductDetail
	}

	fn build(&self, context: &ComponentContext) -> ChatComponent {
		// Detail renders only the first canonical product
		let data = match context.products.first() {
			Some(product) => json!({
				"id": product.id,
				"sku": product.sku,
				"title": product.title,
				"price": product.price,
				"currency": product.currency,
				"in_stock": product.in_stock,
				"stock_qty": product.stock_qty,
				"material": product.material,
				"gauge": product.gauge,
				"image_url": product.image_url,
				"product_url": product.product_url,
				"attributes": product.attributes,
			}),
			None => Value::Null,
		};
		ChatComponent::new(self.component_type(), data)
	}
}

pub struct CompareBuilder;

impl ComponentBuilder for CompareBuilder {
	fn component_type(&self) -> ComponentType {
		ComponentType::Compare
	}

	fn build(&self, context: &ComponentContext) -> ChatComponent {
		let products: Vec<Value> = context
			.products
			.iter()
			.take(COMPARE_PRODUCT_LIMIT)
			.map(|product| {
				json!({
					"sku": product.sku,
					"title": product.title,
					"price": product.price,
					"material": product.material,
					"gauge": product.gauge,
					"attributes": product.attributes,
				})
			})
			.collect();
		ChatComponent::new(self.component_type(), json!({ "products": products }))
	}
}

pub struct RecommendationsBuilder;

impl ComponentBuilder for RecommendationsBuilder {
	fn component_type(&self) -> ComponentType {
		ComponentType::Recommendations
	}

	fn build(&self, context: &ComponentContext) -> ChatComponent {
		let picks = if context.recommendations.is_empty() {
			&context.products
		} else {
			&context.recommendations
		};
		let items: Vec<Value> = picks
			.iter()
			.take(3)
			.map(|product| {
				json!({
					"sku": product.sku,
					"title": product.title,
					"price": product.price,
					"product_url": product.product_url,
				})
			})
			.collect();
		ChatComponent::new(self.component_type(), json!({ "products": items }))
	}
}

pub struct ClarifyBuilder;

impl ComponentBuilder for ClarifyBuilder {
	fn component_type(&self) -> ComponentType {
		ComponentType::Clarify
	}

	fn build(&self, context: &ComponentContext) -> ChatComponent {
		let reason = context
			.ambiguity_reason
			.map(|r| r.as_str())
			.unwrap_or("unclear_intent");
		ChatComponent::new(
			self.component_type(),
			json!({
				"message": "Could you share a bit more detail so I can find the right products?",
				"reason": reason,
			}),
		)
	}
}

pub struct KnowledgeAnswerBuilder;

impl ComponentBuilder for KnowledgeAnswerBuilder {
	fn component_type(&self) -> ComponentType {
		ComponentType::KnowledgeAnswer
	}

	fn build(&self, context: &ComponentContext) -> ChatComponent {
		// Citations travel separately on the reply; only the answer text and
		// the source count are reported here
		ChatComponent::new(
			self.component_type(),
			json!({
				"answer": context.knowledge_answer.clone().unwrap_or_default(),
				"source_count": context.knowledge_sources.len(),
			}),
		)
	}
}

pub struct ActionResultBuilder;

impl ComponentBuilder for ActionResultBuilder {
	fn component_type(&self) -> ComponentType {
		ComponentType::ActionResult
	}

	fn build(&self, context: &ComponentContext) -> ChatComponent {
		ChatComponent::new(
			self.component_type(),
			json!({
				"status": "ok",
				"message": context.action_message,
			}),
		)
	}
}

pub struct ErrorBuilder;

impl ComponentBuilder for ErrorBuilder {
	fn component_type(&self) -> ComponentType {
		ComponentType::Error
	}

	fn build(&self, context: &ComponentContext) -> ChatComponent {
		let message = context
			.error_message
			.clone()
			.unwrap_or_else(|| "Something went wrong processing that message.".to_string());
		ChatComponent::new(
			self.component_type(),
			json!({
				"message": message,
				"code": "invalid_request",
			}),
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rust_decimal::Decimal;
	use shoptalk_types::AmbiguityReason;
	use std::collections::BTreeMap;

	fn product(sku: &str) -> CanonicalProduct {
		CanonicalProduct {
			id: format!("id-{}", sku),
			sku: sku.to_string(),
			title: format!("Product {}", sku),
			price: Decimal::new(1299, 2),
			currency: "USD".to_string(),
			in_stock: true,
			stock_qty: Some(7),
			material: Some("steel".to_string()),
			gauge: Some("16".to_string()),
			image_url: None,
			product_url: None,
			attributes: BTreeMap::new(),
		}
	}

	fn context_with_products(count: usize) -> ComponentContext {
		ComponentContext {
			products: (0..count).map(|i| product(&format!("ST-{:02}", i))).collect(),
			result_count: count,
			..Default::default()
		}
	}

	#[test]
	fn test_compare_caps_at_five_products() {
		let context = context_with_products(8);
		let component = CompareBuilder.build(&context);
		assert_eq!(component.data["products"].as_array().unwrap().len(), 5);
	}

	#[test]
	fn test_cards_render_full_list() {
		let context = context_with_products(8);
		let component = ProductCardsBuilder.build(&context);
		assert_eq!(component.data["products"].as_array().unwrap().len(), 8);
	}

	#[test]
	fn test_detail_uses_first_product_only() {
		let context = context_with_products(3);
		let component = ProductDetailBuilder.build(&context);
		assert_eq!(component.data["sku"], "ST-00");
	}

	#[test]
	fn test_detail_with_no_products_is_null() {
		let context = context_with_products(0);
		let component = ProductDetailBuilder.build(&context);
		assert!(component.data.is_null());
	}

	#[test]
	fn test_clarify_carries_reason_code() {
		let context = ComponentContext {
			ambiguity_reason: Some(AmbiguityReason::InsufficientCompareItems),
			..Default::default()
		};
		let component = ClarifyBuilder.build(&context);
		assert_eq!(component.data["reason"], "insufficient_compare_items");
	}

	#[test]
	fn test_knowledge_answer_reports_source_count_only() {
		let context = ComponentContext {
			knowledge_answer: Some("We ship worldwide.".to_string()),
			knowledge_sources: vec![shoptalk_types::KnowledgeSource::new(
				"Shipping".to_string(),
				"ships worldwide".to_string(),
				0.9,
				shoptalk_types::SourceKind::Knowledge,
			)],
			..Default::default()
		};
		let component = KnowledgeAnswerBuilder.build(&context);
		assert_eq!(component.data["source_count"], 1);
		assert_eq!(component.data["answer"], "We ship worldwide.");
		// Citations are not embedded in the component payload
		assert!(component.data.get("sources").is_none());
	}
}
