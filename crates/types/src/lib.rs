//! Shoptalk Types
//!
//! Shared models and traits for the shoptalk conversational commerce engine.
//! This crate contains all domain models organized by business entity.

pub mod cache;
pub mod chat;
pub mod components;
pub mod constants;
pub mod intents;
pub mod knowledge;
pub mod nlu;
pub mod products;
pub mod retrieval;
pub mod secret;

// Re-export chrono and serde_json for convenience
pub use chrono;
pub use serde_json;

// Re-export commonly used types for convenience
pub use chat::{CarouselItem, ChatError, ChatReply, ChatRequest, ChatResult, ChatValidationError};

pub use intents::{
	AmbiguityReason, IntentDecision, IntentLabel, LexicalSignals, RetrievalDecision,
};

pub use nlu::{ClassifierError, GeneratedReply, LanguageModel, NluOutput, NluResult, ReplyRequest};

pub use products::{CanonicalProduct, ProductField, ProductHit};

pub use knowledge::{KnowledgeRetrieval, KnowledgeSource, SourceKind};

pub use components::{
	ChatComponent, ComponentContext, ComponentType, RegistryError, RegistryResult,
};

pub use retrieval::{
	CatalogSearch, KnowledgeSearch, Reranker, SearchError, SearchResult, SearchTimings,
	VectorSearchResult,
};

pub use cache::{CacheError, CacheResult, CacheStats, ResponseCache};

pub use secret::SecretString;
