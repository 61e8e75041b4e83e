//! Product domain model: raw catalog hits, canonical products and the field
//! vocabulary used by component declarations

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw product hit as returned by the catalog search collaborator
///
/// This is the untyped shape of one catalog row plus its vector distance.
/// It is converted into a [`CanonicalProduct`] before any component builder
/// touches it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductHit {
	pub id: String,
	pub sku: String,
	pub title: String,
	pub price: Decimal,
	pub currency: String,
	pub in_stock: bool,
	pub stock_qty: Option<i64>,
	pub category: Option<String>,
	pub image_url: Option<String>,
	pub product_url: Option<String>,
	/// Cosine distance to the query embedding, when produced by vector search
	pub distance: Option<f64>,
	/// Free-form attribute document from the catalog row
	#[serde(default)]
	pub attributes: BTreeMap<String, serde_json::Value>,
}

/// Normalized, component-agnostic representation of a catalog item
///
/// Immutable once built: owned by a single request's pipeline run, rebuilt
/// fresh per request or rehydrated from a cache payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CanonicalProduct {
	pub id: String,
	pub sku: String,
	pub title: String,
	#[cfg_attr(feature = "openapi", schema(value_type = String))]
	pub price: Decimal,
	pub currency: String,
	pub in_stock: bool,
	pub stock_qty: Option<i64>,
	pub material: Option<String>,
	pub gauge: Option<String>,
	pub image_url: Option<String>,
	pub product_url: Option<String>,
	/// Extended attribute mapping, filled by enrichment when required
	#[serde(default)]
	#[cfg_attr(feature = "openapi", schema(value_type = Object))]
	pub attributes: BTreeMap<String, serde_json::Value>,
}

impl CanonicalProduct {
	/// Build a canonical product from a raw catalog hit
	///
	/// Material and gauge are lifted out of the attribute document when the
	/// catalog row carries them; everything else stays in `attributes`.
	pub fn from_hit(hit: &ProductHit) -> Self {
		let material = hit
			.attributes
			.get("material")
			.and_then(|v| v.as_str())
			.map(str::to_string);
		let gauge = hit
			.attributes
			.get("gauge")
			.and_then(|v| v.as_str())
			.map(str::to_string);

		Self {
			id: hit.id.clone(),
			sku: hit.sku.clone(),
			title: hit.title.clone(),
			price: hit.price,
			currency: hit.currency.clone(),
			in_stock: hit.in_stock,
			stock_qty: hit.stock_qty,
			material,
			gauge,
			image_url: hit.image_url.clone(),
			product_url: hit.product_url.clone(),
			attributes: hit.attributes.clone(),
		}
	}

	/// Whether the given field is populated on this product
	pub fn has_field(&self, field: ProductField) -> bool {
		match field {
			ProductField::Id => !self.id.is_empty(),
			ProductField::Sku => !self.sku.is_empty(),
			ProductField::Title => !self.title.is_empty(),
			ProductField::Price => true,
			ProductField::InStock => true,
			ProductField::StockQty => self.stock_qty.is_some(),
			ProductField::Material => self.material.is_some(),
			ProductField::Gauge => self.gauge.is_some(),
			ProductField::ImageUrl => self.image_url.is_some(),
			ProductField::ProductUrl => self.product_url.is_some(),
			ProductField::Attributes => !self.attributes.is_empty(),
		}
	}

	/// Merge enrichment attributes into a copy of this product
	///
	/// Base rows may lack material/gauge/extended attributes; enrichment
	/// fills them from the bulk attribute lookup without touching fields the
	/// base row already provided.
	pub fn with_enrichment(mut self, attributes: &BTreeMap<String, serde_json::Value>) -> Self {
		for (key, value) in attributes {
			self.attributes.entry(key.clone()).or_insert(value.clone());
		}
		if self.material.is_none() {
			self.material = self
				.attributes
				.get("material")
				.and_then(|v| v.as_str())
				.map(str::to_string);
		}
		if self.gauge.is_none() {
			self.gauge = self
				.attributes
				.get("gauge")
				.and_then(|v| v.as_str())
				.map(str::to_string);
		}
		if self.stock_qty.is_none() {
			self.stock_qty = self.attributes.get("stock_qty").and_then(|v| v.as_i64());
		}
		self
	}

	/// Short human-readable summary used in citations
	pub fn summary_line(&self) -> String {
		format!(
			"{} (sku {}, {} {})",
			self.title, self.sku, self.price, self.currency
		)
	}
}

/// Closed vocabulary of canonical product attributes a component may require
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ProductField {
	Id,
	Sku,
	Title,
	Price,
	InStock,
	StockQty,
	Material,
	Gauge,
	ImageUrl,
	ProductUrl,
	Attributes,
}

impl ProductField {
	/// Fields guaranteed to be present on base catalog rows
	///
	/// Anything outside this set requires the enrichment lookup when a
	/// planned component declares it.
	pub fn is_base_field(&self) -> bool {
		!matches!(self, Self::Material | Self::Gauge | Self::Attributes)
	}
}
