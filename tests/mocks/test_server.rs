//! Test server for integration tests
//!
//! Spawns the chat engine on an ephemeral port with mock collaborators.

#![allow(dead_code)]

use axum::Router;
use tokio::task::JoinHandle;

use shoptalk::mocks::{MockCatalog, MockKnowledge, MockLanguageModel};
use shoptalk::{ChatBuilder, Settings};
use std::sync::Arc;

/// Test server instance with configurable settings
pub struct TestServer {
	pub base_url: String,
	pub handle: JoinHandle<()>,
}

impl TestServer {
	/// Spawn a test server with the default mock collaborators
	pub async fn spawn() -> Result<Self, Box<dyn std::error::Error>> {
		Self::spawn_with_builder(Self::default_builder()).await
	}

	/// Spawn a test server with an empty catalog (every product search misses)
	pub async fn spawn_with_empty_catalog() -> Result<Self, Box<dyn std::error::Error>> {
		let builder = Self::default_builder().with_catalog(Arc::new(MockCatalog::empty()));
		Self::spawn_with_builder(builder).await
	}

	/// Builder wired with in-process mocks and test settings
	pub fn default_builder() -> ChatBuilder {
		ChatBuilder::new()
			.with_settings(Settings::default())
			.with_language_model(Arc::new(MockLanguageModel::new()))
			.with_catalog(Arc::new(MockCatalog::with_demo_products()))
			.with_knowledge(Arc::new(MockKnowledge::with_demo_articles()))
	}

	/// Spawn a test server from a prepared builder
	pub async fn spawn_with_builder(
		builder: ChatBuilder,
	) -> Result<Self, Box<dyn std::error::Error>> {
		let (router, state) = builder.start().await?;
		let app: Router = router.with_state(state);
		Self::spawn_server_with_app(app).await
	}

	async fn spawn_server_with_app(app: Router) -> Result<Self, Box<dyn std::error::Error>> {
		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;
		let base_url = format!("http://{}", addr);

		let handle = tokio::spawn(async move {
			let _ = axum::serve(listener, app).await;
		});

		Ok(Self { base_url, handle })
	}

	pub fn abort(&self) {
		self.handle.abort();
	}
}
