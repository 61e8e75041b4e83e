//! Field dependency resolver: loads exactly the product data the planned
//! components need, in at most two bulk round trips
//!
//! The second (enrichment) lookup happens at most once per request, across
//! all candidate ids at once, regardless of how many component types or
//! candidates are involved. UI composition decisions can never fan out into
//! N+1 queries.

use async_trait::async_trait;
use serde_json::Value;
use shoptalk_types::{CanonicalProduct, ComponentType, ProductField, ProductHit, SearchResult};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, warn};

/// The two bulk loads the resolver is allowed to perform
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductLoader: Send + Sync {
	/// Load base product rows by id (one round trip)
	async fn load_products(&self, ids: &[String]) -> SearchResult<Vec<ProductHit>>;

	/// Load the extended attribute set by id (the enrichment round trip)
	async fn load_attributes(
		&self,
		ids: &[String],
	) -> SearchResult<HashMap<String, BTreeMap<String, Value>>>;
}

/// Resolution observability, not used for control flow elsewhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionMetadata {
	pub enrichment_used: bool,
	pub db_round_trips: u32,
	pub field_union_size: usize,
}

/// Field-dependent canonical product resolution
pub struct FieldResolver;

impl FieldResolver {
	/// Union of required fields across the planned component types
	pub fn field_union(component_types: &[ComponentType]) -> BTreeSet<ProductField> {
		component_types
			.iter()
			.flat_map(|ty| ty.required_fields().iter().copied())
			.collect()
	}

	/// Resolve canonical products for the planned components
	///
	/// One base load always; one additional bulk enrichment only when a
	/// required field is missing from the base rows.
	pub async fn resolve(
		loader: &dyn ProductLoader,
		product_ids: &[String],
		component_types: &[ComponentType],
	) -> (Vec<CanonicalProduct>, ResolutionMetadata) {
		let union = Self::field_union(component_types);
		let field_union_size = union.len();

		if product_ids.is_empty() {
			return (
				Vec::new(),
				ResolutionMetadata {
					enrichment_used: false,
					db_round_trips: 0,
					field_union_size,
				},
			);
		}

		let mut db_round_trips = 1;
		let mut base = match loader.load_products(product_ids).await {
			Ok(hits) => hits,
			Err(e) => {
				warn!("Base product load failed: {}", e);
				return (
					Vec::new(),
					ResolutionMetadata {
						enrichment_used: false,
						db_round_trips,
						field_union_size,
					},
				);
			},
		};

		// The bulk load must not change presentation order: the first
		// candidate is the one a detail component renders
		let position: HashMap<&str, usize> = product_ids
			.iter()
			.enumerate()
			.map(|(idx, id)| (id.as_str(), idx))
			.collect();
		base.sort_by_key(|hit| position.get(hit.id.as_str()).copied().unwrap_or(usize::MAX));

		let mut products: Vec<CanonicalProduct> =
			base.iter().map(CanonicalProduct::from_hit).collect();

		let missing: Vec<ProductField> = union
			.iter()
			.copied()
			.filter(|field| products.iter().any(|product| !product.has_field(*field)))
			.collect();

		let enrichment_used = !missing.is_empty() && !products.is_empty();
		if enrichment_used {
			debug!(
				"Enriching {} products for missing fields {:?}",
				products.len(),
				missing
			);
			db_round_trips += 1;
			match loader.load_attributes(product_ids).await {
				Ok(attributes) => {
					products = products
						.into_iter()
						.map(|product| match attributes.get(&product.id) {
							Some(extra) => product.with_enrichment(extra),
							None => product,
						})
						.collect();
				},
				Err(e) => {
					// Missing enrichment degrades to base data; builders
					// render what is there
					warn!("Attribute enrichment failed: {}", e);
				},
			}
		}

		(
			products,
			ResolutionMetadata {
				enrichment_used,
				db_round_trips,
				field_union_size,
			},
		)
	}
}
