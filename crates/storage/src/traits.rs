//! Cache traits for pluggable store implementations

// Re-export the cache traits from the types crate
pub use shoptalk_types::cache::{CacheError, CacheResult, CacheStats, ResponseCache};
