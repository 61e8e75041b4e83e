//! Chat domain model: wire request/reply shapes and chat errors

pub mod errors;
pub mod request;
pub mod response;

pub use errors::{ChatError, ChatValidationError};
pub use request::ChatRequest;
pub use response::{CarouselItem, ChatReply};

/// Result type for chat operations
pub type ChatResult<T> = Result<T, ChatError>;
