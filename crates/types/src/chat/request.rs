//! Chat request wire shape

use crate::constants::limits::MAX_MESSAGE_CHARS;
use serde::{Deserialize, Serialize};

use super::errors::ChatValidationError;

/// One inbound chat turn
///
/// An empty message is accepted here; the pipeline routes it to the error
/// component rather than rejecting the request at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChatRequest {
	/// Conversation identifier; generated when absent
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub conversation_id: Option<String>,

	/// Raw user message
	pub message: String,

	/// Tenant the conversation belongs to
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tenant_id: Option<String>,

	/// Caller-provided locale hint
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub locale: Option<String>,
}

impl ChatRequest {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			conversation_id: None,
			message: message.into(),
			tenant_id: None,
			locale: None,
		}
	}

	pub fn with_conversation_id(mut self, conversation_id: impl Into<String>) -> Self {
		self.conversation_id = Some(conversation_id.into());
		self
	}

	pub fn with_tenant_id(mut self, tenant_id: impl Into<String>) -> Self {
		self.tenant_id = Some(tenant_id.into());
		self
	}

	pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
		self.locale = Some(locale.into());
		self
	}

	/// Validate boundary constraints
	pub fn validate(&self) -> Result<(), ChatValidationError> {
		if self.message.chars().count() > MAX_MESSAGE_CHARS {
			return Err(ChatValidationError::MessageTooLong {
				length: self.message.chars().count(),
				limit: MAX_MESSAGE_CHARS,
			});
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_empty_message_is_accepted_at_boundary() {
		// Empty text is handled inside the pipeline, not rejected here
		assert!(ChatRequest::new("").validate().is_ok());
	}

	#[test]
	fn test_oversized_message_is_rejected() {
		let request = ChatRequest::new("x".repeat(MAX_MESSAGE_CHARS + 1));
		assert!(matches!(
			request.validate(),
			Err(ChatValidationError::MessageTooLong { .. })
		));
	}
}
