use axum::{extract::State, http::StatusCode, response::Json};
use tracing::info;

use crate::handlers::common::ErrorResponse;
use crate::state::AppState;
use shoptalk_types::chat::{ChatError, ChatReply, ChatRequest};

/// POST /v1/chat - Handle one chat turn
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/v1/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Chat turn handled", body = ChatReply),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    ),
    tag = "chat"
))]
pub async fn post_chat(
	State(state): State<AppState>,
	Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, (StatusCode, Json<ErrorResponse>)> {
	info!(
		"Received chat request ({} chars)",
		request.message.chars().count()
	);

	if let Err(e) = request.validate() {
		return Err((
			StatusCode::BAD_REQUEST,
			Json(ErrorResponse {
				error: "VALIDATION_ERROR".to_string(),
				message: format!("Invalid request: {}", e),
				timestamp: chrono::Utc::now().timestamp(),
			}),
		));
	}

	match state.chat_service.handle(request).await {
		Ok(reply) => Ok(Json(reply)),
		Err(ChatError::Validation(e)) => Err((
			StatusCode::BAD_REQUEST,
			Json(ErrorResponse {
				error: "VALIDATION_ERROR".to_string(),
				message: e.to_string(),
				timestamp: chrono::Utc::now().timestamp(),
			}),
		)),
		Err(e) => Err((
			StatusCode::INTERNAL_SERVER_ERROR,
			Json(ErrorResponse {
				error: "PIPELINE_ERROR".to_string(),
				message: format!("Failed to handle chat turn: {}", e),
				timestamp: chrono::Utc::now().timestamp(),
			}),
		)),
	}
}
