//! Health and readiness E2E tests

mod mocks;

use crate::mocks::TestServer;
use reqwest::Client;

#[tokio::test]
async fn test_health_endpoint() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let resp = client
		.get(format!("{}/health", server.base_url))
		.send()
		.await
		.unwrap();

	assert!(resp.status().is_success());
	assert_eq!(resp.text().await.unwrap(), "OK");

	server.abort();
}

#[tokio::test]
async fn test_ready_reports_collaborators() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let resp = client
		.get(format!("{}/ready", server.base_url))
		.send()
		.await
		.unwrap();

	assert!(resp.status().is_success());
	let body: serde_json::Value = resp.json().await.unwrap();
	assert_eq!(body["status"], "ready");
	assert_eq!(body["cache_healthy"], true);
	assert_eq!(body["collaborators"]["catalog"], true);
	assert_eq!(body["collaborators"]["language_model"], true);

	server.abort();
}

#[tokio::test]
async fn test_security_headers_are_present() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let resp = client
		.get(format!("{}/health", server.base_url))
		.send()
		.await
		.unwrap();

	let headers = resp.headers();
	assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
	assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
	assert!(headers.get("x-request-id").is_some());

	server.abort();
}
