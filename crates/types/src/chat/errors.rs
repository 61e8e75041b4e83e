//! Error types for chat operations

use thiserror::Error;

use crate::components::RegistryError;

/// Validation errors for chat requests
#[derive(Error, Debug)]
pub enum ChatValidationError {
	#[error("Message too long: {length} characters (limit {limit})")]
	MessageTooLong { length: usize, limit: usize },

	#[error("Missing required field: {field}")]
	MissingRequiredField { field: String },
}

/// General chat pipeline errors
#[derive(Error, Debug)]
pub enum ChatError {
	#[error("Chat validation failed: {0}")]
	Validation(#[from] ChatValidationError),

	#[error("Component registry error: {0}")]
	Registry(#[from] RegistryError),

	#[error("Pipeline failed: {reason}")]
	Pipeline { reason: String },

	#[error("Missing collaborator: {name}")]
	MissingCollaborator { name: String },

	#[error("Configuration error: {reason}")]
	Configuration { reason: String },

	#[error("Server error: {0}")]
	Server(String),

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}
