//! Stable cache-key hashing
//!
//! Keys must be identical for identical requests regardless of JSON mapping
//! insertion order, so the payload is canonicalized (objects recursively
//! key-sorted) before hashing.

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::fmt::Write;

/// Recursively rebuild a JSON value with object keys in sorted order
fn canonicalize(value: &Value) -> Value {
	match value {
		Value::Object(map) => {
			let mut entries: Vec<(&String, &Value)> = map.iter().collect();
			entries.sort_by(|a, b| a.0.cmp(b.0));
			let mut sorted = Map::new();
			for (key, inner) in entries {
				sorted.insert(key.clone(), canonicalize(inner));
			}
			Value::Object(sorted)
		},
		Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
		other => other.clone(),
	}
}

/// Compute the namespaced, order-independent cache key for a request payload
pub fn stable_cache_key(prefix: &str, payload: &Value) -> String {
	let canonical = canonicalize(payload);
	let serialized = canonical.to_string();

	let mut hasher = Sha256::new();
	hasher.update(serialized.as_bytes());
	let digest = hasher.finalize();

	let mut hex = String::with_capacity(digest.len() * 2);
	for byte in digest {
		let _ = write!(hex, "{:02x}", byte);
	}

	format!("{}:{}", prefix, hex)
}
