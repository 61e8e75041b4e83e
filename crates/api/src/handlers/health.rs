use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;

use crate::state::AppState;

/// Health check endpoint
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service healthy", body = String)),
    tag = "health"
))]
pub async fn health() -> &'static str {
	"OK"
}

/// Readiness response
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
	pub status: String,
	pub cache_healthy: bool,
	pub collaborators: std::collections::HashMap<String, bool>,
}

/// GET /ready - Readiness probe with cache and collaborator checks
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/ready",
    responses((status = 200, description = "Readiness response")),
    tag = "health"
))]
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
	let cache_healthy = match &state.cache {
		Some(cache) => cache.health_check().await.unwrap_or(false),
		None => true,
	};
	let collaborators = state.chat_service.health_check_all().await;
	let collaborators_healthy = collaborators.values().all(|v| *v) || collaborators.is_empty();

	let overall = cache_healthy && collaborators_healthy;
	let status = if overall { "ready" } else { "degraded" };

	let body = ReadinessResponse {
		status: status.to_string(),
		cache_healthy,
		collaborators,
	};
	let code = if overall {
		StatusCode::OK
	} else {
		StatusCode::SERVICE_UNAVAILABLE
	};
	(code, Json(body))
}
