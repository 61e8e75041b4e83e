//! Shared request fixtures for API tests

#![allow(dead_code)]

use serde_json::{json, Value};

/// Canned request payloads for the chat endpoint
pub struct ApiFixtures;

impl ApiFixtures {
	pub fn browse_request() -> Value {
		json!({
			"message": "show me staples",
			"tenant_id": "tenant-1",
			"locale": "en-US"
		})
	}

	pub fn sku_request() -> Value {
		json!({
			"message": "details for ST-4401 please",
			"tenant_id": "tenant-1"
		})
	}

	pub fn compare_request() -> Value {
		json!({
			"message": "compare ST-4401 and ST-4402",
			"tenant_id": "tenant-1"
		})
	}

	pub fn knowledge_request() -> Value {
		json!({
			"message": "what is your shipping policy?",
			"tenant_id": "tenant-1"
		})
	}

	pub fn empty_request() -> Value {
		json!({
			"message": "   ",
			"tenant_id": "tenant-1"
		})
	}

	pub fn oversized_request() -> Value {
		json!({
			"message": "x".repeat(5000),
			"tenant_id": "tenant-1"
		})
	}
}
