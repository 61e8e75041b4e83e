//! Error types for the result cache

use thiserror::Error;

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors from the result-cache collaborator
///
/// The pipeline treats every cache error as a cache miss; these exist so
/// stores can report connection problems to probes and logs.
#[derive(Error, Debug)]
pub enum CacheError {
	#[error("Cache backend unavailable: {reason}")]
	Unavailable { reason: String },

	#[error("Cache connection failed: {reason}")]
	Connection { reason: String },

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}
