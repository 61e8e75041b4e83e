use crate::handlers::{chat, health};
use utoipa::OpenApi;

use shoptalk_types::chat::{ChatReply, ChatRequest};
use shoptalk_types::components::{ChatComponent, ComponentType};
use shoptalk_types::knowledge::KnowledgeSource;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::ready,
        chat::post_chat,
    ),
    components(schemas(
        ChatRequest, ChatReply, ChatComponent, ComponentType, KnowledgeSource
    )),
    tags(
        (name = "chat", description = "Chat pipeline endpoints"),
        (name = "health", description = "Health and readiness endpoints")
    )
)]
pub struct ApiDoc;
