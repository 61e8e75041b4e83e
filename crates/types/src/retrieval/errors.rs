//! Error types for search and rerank collaborators

use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors from the catalog/knowledge search and rerank collaborators
///
/// The pipeline treats most of these as "no data available" and continues;
/// they exist so adapters can report what actually went wrong.
#[derive(Error, Debug)]
pub enum SearchError {
	#[error("Search backend unavailable: {reason}")]
	Unavailable { reason: String },

	#[error("Search request failed with HTTP {status}: {message}")]
	Http { status: u16, message: String },

	#[error("Search request timed out after {timeout_ms}ms")]
	Timeout { timeout_ms: u64 },

	#[error("Invalid search input: {reason}")]
	InvalidInput { reason: String },

	#[error("Rerank service disabled")]
	RerankDisabled,

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}
