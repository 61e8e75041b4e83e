//! Centralized mocks and fixtures for testing
//!
//! This module provides reusable mock collaborators, configurations and test
//! data to reduce duplication across test files.

pub mod collaborators;
pub mod fixtures;
pub mod test_server;

// Re-export commonly used items for convenience
#[allow(unused_imports)]
pub use collaborators::{FailingCatalog, FailingLanguageModel, SlowCatalog};
#[allow(unused_imports)]
pub use fixtures::ApiFixtures;
#[allow(unused_imports)]
pub use test_server::TestServer;
