//! Global limits and defaults for configuration and runtime

/// Maximum number of primary products surfaced per turn
pub const PRIMARY_PRODUCT_LIMIT: usize = 10;

/// Maximum number of products projected into a comparison component
pub const COMPARE_PRODUCT_LIMIT: usize = 5;

/// Relevance assigned to the below-threshold product fallback citation
pub const FALLBACK_CITATION_RELEVANCE: f64 = 0.3;

/// Number of top hits summarized inside a product citation
pub const CITATION_SUMMARY_LIMIT: usize = 3;

/// Default vector distance threshold when no intent-specific one applies
pub const DEFAULT_DISTANCE_THRESHOLD: f64 = 0.75;

/// Distance threshold for pure browsing (looser, browsing tolerates weaker matches)
pub const BROWSE_DISTANCE_THRESHOLD: f64 = 0.85;

/// Distance threshold for specific product search (tighter, avoid irrelevant hits)
pub const SPECIFIC_DISTANCE_THRESHOLD: f64 = 0.65;

/// Default number of knowledge sources retrieved per turn
pub const KNOWLEDGE_SOURCE_LIMIT: usize = 5;

/// Default candidate pool size for vector search
pub const DEFAULT_CANDIDATE_LIMIT: usize = 50;

/// Maximum accepted chat message length in characters
pub const MAX_MESSAGE_CHARS: usize = 4_000;

/// Minimum allowed classifier timeout in milliseconds
pub const MIN_CLASSIFIER_TIMEOUT_MS: u64 = 100;

/// Default classifier timeout in milliseconds
pub const DEFAULT_CLASSIFIER_TIMEOUT_MS: u64 = 5_000;

/// Default per-search timeout in milliseconds
pub const DEFAULT_SEARCH_TIMEOUT_MS: u64 = 3_000;

/// Default global pipeline timeout in milliseconds
pub const DEFAULT_GLOBAL_TIMEOUT_MS: u64 = 15_000;

/// Default TTL for cached replies in seconds
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 300;

/// Default namespace prefix for reply cache keys
pub const DEFAULT_CACHE_NAMESPACE: &str = "shoptalk:chat";
