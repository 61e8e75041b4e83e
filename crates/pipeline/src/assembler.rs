//! Product context assembler: shapes raw catalog hits into canonical
//! products plus citation sources

use shoptalk_types::constants::limits::{
	BROWSE_DISTANCE_THRESHOLD, CITATION_SUMMARY_LIMIT, DEFAULT_DISTANCE_THRESHOLD,
	FALLBACK_CITATION_RELEVANCE, PRIMARY_PRODUCT_LIMIT, SPECIFIC_DISTANCE_THRESHOLD,
};
use shoptalk_types::{CanonicalProduct, IntentLabel, KnowledgeSource, ProductHit, SourceKind};
use tracing::debug;

/// Distance thresholds and limits for primary product selection
///
/// The browse threshold is deliberately looser than the specific one:
/// browsing tolerates weaker matches, a specific search must not surface
/// irrelevant hits.
#[derive(Debug, Clone)]
pub struct SelectionConfig {
	pub default_threshold: f64,
	pub browse_threshold: f64,
	pub specific_threshold: f64,
	pub product_limit: usize,
}

impl Default for SelectionConfig {
	fn default() -> Self {
		Self {
			default_threshold: DEFAULT_DISTANCE_THRESHOLD,
			browse_threshold: BROWSE_DISTANCE_THRESHOLD,
			specific_threshold: SPECIFIC_DISTANCE_THRESHOLD,
			product_limit: PRIMARY_PRODUCT_LIMIT,
		}
	}
}

/// Output of primary product selection
#[derive(Debug, Clone, Default)]
pub struct PrimaryProducts {
	pub products: Vec<CanonicalProduct>,
	pub sources: Vec<KnowledgeSource>,
	/// Set when products were surfaced below the confidence threshold; the
	/// caller must down-weight the textual reply accordingly
	pub fallback_used: bool,
}

/// Select the products surfaced for this turn and their citation
///
/// Below-threshold candidates are still surfaced (at fixed low relevance)
/// when the classifier asked for products, so the UI never silently drops a
/// visible product signal. That path trades precision for recall on purpose.
pub fn select_primary_products(
	hits: &[ProductHit],
	best_distance: Option<f64>,
	show_products: bool,
	intent: IntentLabel,
	config: &SelectionConfig,
) -> PrimaryProducts {
	let threshold = if show_products {
		match intent {
			IntentLabel::BrowseProducts => config.browse_threshold,
			IntentLabel::SearchSpecific => config.specific_threshold,
			_ => config.default_threshold,
		}
	} else {
		config.default_threshold
	};

	let confident = matches!(best_distance, Some(best) if best < threshold) && !hits.is_empty();

	if confident {
		let best = best_distance.unwrap_or(0.0);
		let products = top_products(hits, config.product_limit);
		let relevance = (1.0 - best).clamp(0.0, 1.0);
		let citation = product_citation(hits, relevance, SourceKind::Product);
		debug!(
			"Selected {} primary products (best distance {:.3} < {:.2})",
			products.len(),
			best,
			threshold
		);
		return PrimaryProducts {
			products,
			sources: vec![citation],
			fallback_used: false,
		};
	}

	if show_products && !hits.is_empty() {
		let products = top_products(hits, config.product_limit);
		let citation = product_citation(
			hits,
			FALLBACK_CITATION_RELEVANCE,
			SourceKind::ProductFallback,
		);
		debug!(
			"Falling back to {} below-threshold products (threshold {:.2})",
			products.len(),
			threshold
		);
		return PrimaryProducts {
			products,
			sources: vec![citation],
			fallback_used: true,
		};
	}

	PrimaryProducts::default()
}

fn top_products(hits: &[ProductHit], limit: usize) -> Vec<CanonicalProduct> {
	hits.iter()
		.take(limit)
		.map(CanonicalProduct::from_hit)
		.collect()
}

fn product_citation(hits: &[ProductHit], relevance: f64, kind: SourceKind) -> KnowledgeSource {
	// Top hits summarized by category/name/sku/price
	let summary = hits
		.iter()
		.take(CITATION_SUMMARY_LIMIT)
		.map(|hit| match &hit.category {
			Some(category) => format!(
				"{}: {} (sku {}, {} {})",
				category, hit.title, hit.sku, hit.price, hit.currency
			),
			None => format!(
				"{} (sku {}, {} {})",
				hit.title, hit.sku, hit.price, hit.currency
			),
		})
		.collect::<Vec<_>>()
		.join("; ");

	KnowledgeSource::new("Catalog matches".to_string(), summary, relevance, kind)
}
