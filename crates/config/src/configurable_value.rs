//! Configurable value types that can load from environment variables or
//! plain values

use shoptalk_types::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A configurable value that can be loaded from an environment variable or
/// used as plain text
///
/// API keys belong in the environment; plain values are for local
/// development only.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ConfigurableValue {
	/// Type of value: "env" for environment variable, "plain" for direct value
	#[serde(rename = "type")]
	pub value_type: ValueType,
	/// The value: either the environment variable name or the actual value
	pub value: String,
}

/// Type of configurable value
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
	/// Load value from environment variable (name specified in `value` field)
	Env,
	/// Use the value directly from the `value` field
	Plain,
}

/// Errors from resolving configurable values
#[derive(Error, Debug)]
pub enum ConfigurableValueError {
	#[error("Environment variable not found: {0}")]
	EnvironmentVariableNotFound(String),
}

impl ConfigurableValue {
	/// Create a new environment variable reference
	pub fn from_env(env_var_name: &str) -> Self {
		Self {
			value_type: ValueType::Env,
			value: env_var_name.to_string(),
		}
	}

	/// Create a new plain value
	pub fn from_plain(plain_value: &str) -> Self {
		Self {
			value_type: ValueType::Plain,
			value: plain_value.to_string(),
		}
	}

	/// Resolve the actual value based on the type
	pub fn resolve(&self) -> Result<String, ConfigurableValueError> {
		match self.value_type {
			ValueType::Env => std::env::var(&self.value).map_err(|_| {
				ConfigurableValueError::EnvironmentVariableNotFound(self.value.clone())
			}),
			ValueType::Plain => Ok(self.value.clone()),
		}
	}

	/// Resolve into a [`SecretString`] for sensitive values
	pub fn resolve_for_secret(&self) -> Result<SecretString, ConfigurableValueError> {
		let resolved = self.resolve()?;
		Ok(SecretString::from_str(&resolved))
	}

	/// Plain values for secrets are insecure outside local development
	pub fn is_insecure_default(&self) -> bool {
		matches!(self.value_type, ValueType::Plain)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_plain_value_resolves_directly() {
		let value = ConfigurableValue::from_plain("local-key");
		assert_eq!(value.resolve().unwrap(), "local-key");
		assert!(value.is_insecure_default());
	}

	#[test]
	fn test_env_value_reports_missing_variable() {
		let value = ConfigurableValue::from_env("SHOPTALK_TEST_MISSING_VAR");
		assert!(matches!(
			value.resolve(),
			Err(ConfigurableValueError::EnvironmentVariableNotFound(_))
		));
	}
}
