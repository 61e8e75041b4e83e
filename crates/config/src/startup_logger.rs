//! Service startup logging for the shoptalk chat engine

use std::env;
use tracing::info;

use crate::settings::{CacheBackend, Settings};

/// Logs service information at startup
pub fn log_service_info() {
	let service_name = "shoptalk";
	let service_version = env!("CARGO_PKG_VERSION");

	info!("=== Shoptalk Chat Engine Starting ===");
	info!("🚀 Service: {} v{}", service_name, service_version);
	info!("💻 Platform: {}", env::consts::OS);
	info!("🏗️ Architecture: {}", env::consts::ARCH);

	if let Ok(rust_log) = env::var("RUST_LOG") {
		info!("🔧 Log Level: {}", rust_log);
	}
	if let Ok(cwd) = env::current_dir() {
		info!("📁 Working Directory: {}", cwd.display());
	}
}

/// Logs the resolved configuration summary
pub fn log_startup_complete(settings: &Settings) {
	info!(
		"🧠 Language model: {} ({})",
		settings.nlu.chat_model, settings.nlu.endpoint
	);
	info!(
		"🎯 Distance thresholds: browse {:.2} / specific {:.2} / default {:.2}",
		settings.retrieval.browse_distance_threshold,
		settings.retrieval.specific_distance_threshold,
		settings.retrieval.default_distance_threshold
	);
	let cache_backend = match settings.cache.backend {
		CacheBackend::Memory => "memory",
		CacheBackend::Redis => "redis",
	};
	info!(
		"🗄️ Reply cache: {} ({}, ttl {}s)",
		if settings.cache.enabled {
			"enabled"
		} else {
			"disabled"
		},
		cache_backend,
		settings.cache.ttl_seconds
	);
	info!(
		"🌐 Listening on {}:{}",
		settings.server.host, settings.server.port
	);
	info!("=== Startup Complete ===");
}

/// Logs service shutdown
pub fn log_service_shutdown() {
	info!("=== Shoptalk Chat Engine Shutting Down ===");
}
