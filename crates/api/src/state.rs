use std::sync::Arc;

use shoptalk_pipeline::ChatService;
use shoptalk_types::ResponseCache;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
	pub chat_service: Arc<ChatService>,
	pub cache: Option<Arc<dyn ResponseCache>>,
}
