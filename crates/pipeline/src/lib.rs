//! Shoptalk Pipeline
//!
//! Core logic for the chat component subsystem: intent resolution, retrieval
//! gating, output planning, field-dependent product resolution and
//! response-consistency enforcement.

pub mod assembler;
pub mod cache_key;
pub mod chat;
pub mod components;
pub mod consistency;
pub mod fields;
pub mod gate;
pub mod knowledge;
pub mod lexical;
pub mod localize;
pub mod planner;
pub mod router;

pub use assembler::{select_primary_products, PrimaryProducts, SelectionConfig};
pub use cache_key::stable_cache_key;
pub use chat::{ChatService, ChatServiceConfig};
pub use components::{
	build_components, register_default_builders, ComponentBuilder, ComponentRegistry,
};
pub use consistency::{ensure_consistent_reply, normalize_cached_response};
pub use fields::{FieldResolver, ProductLoader, ResolutionMetadata};
pub use gate::decide_retrieval;
pub use knowledge::{assemble_knowledge, KnowledgeContext};
pub use lexical::{normalize_text, LexicalAnalyzer};
pub use localize::Localizer;
pub use planner::plan;
pub use router::resolve_intent;
