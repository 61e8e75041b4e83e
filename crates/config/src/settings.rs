//! Configuration settings structures

use crate::configurable_value::ConfigurableValue;
use serde::{Deserialize, Serialize};
use shoptalk_types::constants::limits::{
	BROWSE_DISTANCE_THRESHOLD, DEFAULT_CACHE_NAMESPACE, DEFAULT_CACHE_TTL_SECONDS,
	DEFAULT_CANDIDATE_LIMIT, DEFAULT_CLASSIFIER_TIMEOUT_MS, DEFAULT_DISTANCE_THRESHOLD,
	DEFAULT_GLOBAL_TIMEOUT_MS, DEFAULT_SEARCH_TIMEOUT_MS, KNOWLEDGE_SOURCE_LIMIT,
	MIN_CLASSIFIER_TIMEOUT_MS, PRIMARY_PRODUCT_LIMIT, SPECIFIC_DISTANCE_THRESHOLD,
};
use thiserror::Error;

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
	pub server: ServerSettings,
	pub nlu: NluSettings,
	pub rerank: RerankSettings,
	pub retrieval: RetrievalSettings,
	pub cache: CacheSettings,
	pub timeouts: TimeoutSettings,
	pub environment: EnvironmentSettings,
	pub logging: LoggingSettings,
}

/// Server configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
	pub host: String,
	pub port: u16,
}

impl Default for ServerSettings {
	fn default() -> Self {
		Self {
			host: "0.0.0.0".to_string(),
			port: 4000,
		}
	}
}

/// Language-model endpoint configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct NluSettings {
	pub endpoint: String,
	pub chat_model: String,
	pub embedding_model: String,
	pub api_key: Option<ConfigurableValue>,
	pub timeout_ms: u64,
}

impl Default for NluSettings {
	fn default() -> Self {
		Self {
			endpoint: "https://api.openai.com/v1".to_string(),
			chat_model: "gpt-4o-mini".to_string(),
			embedding_model: "text-embedding-3-small".to_string(),
			api_key: Some(ConfigurableValue::from_env("SHOPTALK_NLU_API_KEY")),
			timeout_ms: DEFAULT_CLASSIFIER_TIMEOUT_MS,
		}
	}
}

/// Rerank scoring API configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RerankSettings {
	pub enabled: bool,
	pub endpoint: String,
	pub model: String,
	pub api_key: Option<ConfigurableValue>,
	pub timeout_ms: u64,
}

impl Default for RerankSettings {
	fn default() -> Self {
		Self {
			enabled: false,
			endpoint: "https://api.cohere.com/v2/rerank".to_string(),
			model: "rerank-v3.5".to_string(),
			api_key: Some(ConfigurableValue::from_env("SHOPTALK_RERANK_API_KEY")),
			timeout_ms: DEFAULT_SEARCH_TIMEOUT_MS,
		}
	}
}

/// Retrieval thresholds and limits
///
/// The intent-dependent distance thresholds are deliberately configurable:
/// the browse threshold trades precision for perceived helpfulness.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RetrievalSettings {
	pub default_distance_threshold: f64,
	pub browse_distance_threshold: f64,
	pub specific_distance_threshold: f64,
	pub primary_product_limit: usize,
	pub knowledge_source_limit: usize,
	pub candidate_limit: usize,
}

impl Default for RetrievalSettings {
	fn default() -> Self {
		Self {
			default_distance_threshold: DEFAULT_DISTANCE_THRESHOLD,
			browse_distance_threshold: BROWSE_DISTANCE_THRESHOLD,
			specific_distance_threshold: SPECIFIC_DISTANCE_THRESHOLD,
			primary_product_limit: PRIMARY_PRODUCT_LIMIT,
			knowledge_source_limit: KNOWLEDGE_SOURCE_LIMIT,
			candidate_limit: DEFAULT_CANDIDATE_LIMIT,
		}
	}
}

/// Cache backend selection
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
	Memory,
	Redis,
}

/// Result-cache configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CacheSettings {
	pub enabled: bool,
	pub backend: CacheBackend,
	pub url: Option<String>,
	pub ttl_seconds: u64,
	pub namespace: String,
}

impl Default for CacheSettings {
	fn default() -> Self {
		Self {
			enabled: true,
			backend: CacheBackend::Memory,
			url: None,
			ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
			namespace: DEFAULT_CACHE_NAMESPACE.to_string(),
		}
	}
}

/// Timeout configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TimeoutSettings {
	/// Classifier call timeout in milliseconds
	pub classifier_ms: u64,
	/// Per-search timeout in milliseconds
	pub search_ms: u64,
	/// Global pipeline timeout in milliseconds
	pub global_ms: u64,
}

impl Default for TimeoutSettings {
	fn default() -> Self {
		Self {
			classifier_ms: DEFAULT_CLASSIFIER_TIMEOUT_MS,
			search_ms: DEFAULT_SEARCH_TIMEOUT_MS,
			global_ms: DEFAULT_GLOBAL_TIMEOUT_MS,
		}
	}
}

/// Environment-specific settings
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct EnvironmentSettings {
	pub profile: EnvironmentProfile,
	pub debug: bool,
}

impl Default for EnvironmentSettings {
	fn default() -> Self {
		Self {
			profile: EnvironmentProfile::Development,
			debug: false,
		}
	}
}

/// Environment profiles
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentProfile {
	Development,
	Staging,
	Production,
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Pretty,
			structured: false,
		}
	}
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

/// Validation errors for settings
#[derive(Error, Debug)]
pub enum ConfigValidationError {
	#[error("Threshold '{name}' out of range: {value} (must be within 0.0..=1.0)")]
	ThresholdOutOfRange { name: &'static str, value: f64 },

	#[error("Invalid endpoint '{name}': {reason}")]
	InvalidEndpoint { name: &'static str, reason: String },

	#[error("Timeout '{name}' too small: {value}ms (minimum {minimum}ms)")]
	TimeoutTooSmall {
		name: &'static str,
		value: u64,
		minimum: u64,
	},

	#[error("Cache backend 'redis' requires a connection url")]
	MissingCacheUrl,

	#[error("Limit '{name}' must be greater than zero")]
	ZeroLimit { name: &'static str },
}

impl Settings {
	/// Validate the settings before wiring services
	pub fn validate(&self) -> Result<(), ConfigValidationError> {
		for (name, value) in [
			(
				"retrieval.default_distance_threshold",
				self.retrieval.default_distance_threshold,
			),
			(
				"retrieval.browse_distance_threshold",
				self.retrieval.browse_distance_threshold,
			),
			(
				"retrieval.specific_distance_threshold",
				self.retrieval.specific_distance_threshold,
			),
		] {
			if !(0.0..=1.0).contains(&value) {
				return Err(ConfigValidationError::ThresholdOutOfRange { name, value });
			}
		}

		if self.retrieval.primary_product_limit == 0 {
			return Err(ConfigValidationError::ZeroLimit {
				name: "retrieval.primary_product_limit",
			});
		}
		if self.retrieval.candidate_limit == 0 {
			return Err(ConfigValidationError::ZeroLimit {
				name: "retrieval.candidate_limit",
			});
		}

		if self.timeouts.classifier_ms < MIN_CLASSIFIER_TIMEOUT_MS {
			return Err(ConfigValidationError::TimeoutTooSmall {
				name: "timeouts.classifier_ms",
				value: self.timeouts.classifier_ms,
				minimum: MIN_CLASSIFIER_TIMEOUT_MS,
			});
		}

		url::Url::parse(&self.nlu.endpoint).map_err(|e| {
			ConfigValidationError::InvalidEndpoint {
				name: "nlu.endpoint",
				reason: e.to_string(),
			}
		})?;
		if self.rerank.enabled {
			url::Url::parse(&self.rerank.endpoint).map_err(|e| {
				ConfigValidationError::InvalidEndpoint {
					name: "rerank.endpoint",
					reason: e.to_string(),
				}
			})?;
		}

		if self.cache.enabled
			&& self.cache.backend == CacheBackend::Redis
			&& self.cache.url.is_none()
		{
			return Err(ConfigValidationError::MissingCacheUrl);
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_settings_are_valid() {
		assert!(Settings::default().validate().is_ok());
	}

	#[test]
	fn test_out_of_range_threshold_is_rejected() {
		let mut settings = Settings::default();
		settings.retrieval.browse_distance_threshold = 1.5;
		assert!(matches!(
			settings.validate(),
			Err(ConfigValidationError::ThresholdOutOfRange { .. })
		));
	}

	#[test]
	fn test_redis_backend_requires_url() {
		let mut settings = Settings::default();
		settings.cache.backend = CacheBackend::Redis;
		settings.cache.url = None;
		assert!(matches!(
			settings.validate(),
			Err(ConfigValidationError::MissingCacheUrl)
		));
	}

	#[test]
	fn test_invalid_nlu_endpoint_is_rejected() {
		let mut settings = Settings::default();
		settings.nlu.endpoint = "not a url".to_string();
		assert!(matches!(
			settings.validate(),
			Err(ConfigValidationError::InvalidEndpoint { .. })
		));
	}
}
