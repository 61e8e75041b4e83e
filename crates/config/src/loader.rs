//! Configuration loading utilities

use crate::Settings;
use config::{Config, ConfigError, Environment, File};
use thiserror::Error;

/// Errors from loading configuration
#[derive(Error, Debug)]
pub enum ConfigLoadError {
	#[error("Failed to read configuration: {0}")]
	Read(#[from] ConfigError),

	#[error("Configuration invalid: {0}")]
	Validation(#[from] crate::settings::ConfigValidationError),
}

/// Load configuration from the optional config file plus environment
/// overrides, then validate it
///
/// Missing file and missing variables fall back to defaults; a present but
/// invalid configuration is an error.
pub fn load_config() -> Result<Settings, ConfigLoadError> {
	let s = Config::builder()
		.add_source(File::with_name("config/config").required(false))
		.add_source(Environment::with_prefix("SHOPTALK").separator("__"))
		.build()?;

	let settings: Settings = s.try_deserialize()?;
	settings.validate()?;
	Ok(settings)
}
