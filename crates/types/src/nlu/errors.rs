//! Error types for the language-model boundary

use thiserror::Error;

/// Result type for language-model operations
pub type NluResult<T> = Result<T, ClassifierError>;

/// Errors from the classification/embedding/generation collaborator
#[derive(Error, Debug)]
pub enum ClassifierError {
	#[error("Classifier payload failed schema validation: {reason}")]
	InvalidPayload { reason: String },

	#[error("Language model endpoint returned HTTP {status}: {message}")]
	Http { status: u16, message: String },

	#[error("Language model request failed: {0}")]
	Network(String),

	#[error("Language model call timed out after {timeout_ms}ms")]
	Timeout { timeout_ms: u64 },

	#[error("Language model returned an empty response")]
	EmptyResponse,

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}
