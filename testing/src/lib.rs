//! # Transactional Email Testing
//!
//! Testing utilities for the transactional email client.
//!
//! This crate provides:
//! - [`MockEmailApi`]: an in-process HTTP server standing in for the email API
//! - [`RecordedRequest`]: a decoded view of what the client sent
//!
//! ## Example
//!
//! ```ignore
//! use transactional_email_client::EmailApiClient;
//! use transactional_email_testing::MockEmailApi;
//!
//! #[tokio::test]
//! async fn test_login() {
//!     let api = MockEmailApi::start().await;
//!     api.expect_login("abc123").await;
//!
//!     let client = EmailApiClient::new(api.config());
//!     let token = client.login(Some("ops@mail.test"), Some("pw")).await.unwrap();
//!
//!     assert_eq!(token, "abc123");
//!     assert_eq!(api.requests_to("/login").await.len(), 1);
//! }
//! ```

use serde_json::{json, Value};
use transactional_email_client::ClientConfig;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub use wiremock;

/// Path prefix the mock API is mounted under, mimicking a typical `/api` base
pub const API_PREFIX: &str = "/api";

/// Mock transactional email API backed by `wiremock`
pub struct MockEmailApi {
    server: MockServer,
}

impl MockEmailApi {
    /// Start a mock server on a random local port
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Underlying `wiremock` server, for custom mocks
    #[must_use]
    pub const fn server(&self) -> &MockServer {
        &self.server
    }

    /// Base URL including [`API_PREFIX`]
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}{API_PREFIX}", self.server.uri())
    }

    /// Absolute URL of `endpoint` (e.g. `/login`) on this server
    #[must_use]
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url())
    }

    /// Client configuration pointing at this server with default endpoints
    #[must_use]
    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(self.base_url())
    }

    /// Answer POSTs to `endpoint` with `response`
    pub async fn respond(&self, endpoint: &str, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path(format!("{API_PREFIX}{endpoint}")))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    /// Answer POSTs to `endpoint` with a JSON body and status
    pub async fn respond_json(&self, endpoint: &str, status: u16, body: Value) {
        self.respond(endpoint, ResponseTemplate::new(status).set_body_json(body))
            .await;
    }

    /// Answer POSTs to `endpoint` with a raw, non-JSON body
    pub async fn respond_raw(&self, endpoint: &str, status: u16, body: &str) {
        self.respond(
            endpoint,
            ResponseTemplate::new(status).set_body_raw(body.to_string(), "text/plain"),
        )
        .await;
    }

    /// Answer the default login endpoint with `{"token": token}`
    pub async fn expect_login(&self, token: &str) {
        self.respond_json("/login", 200, json!({ "token": token })).await;
    }

    /// Answer both send endpoints with a generic success body
    pub async fn accept_sends(&self) {
        let body = json!({ "status": "queued" });
        self.respond_json("/gettransactionalApi", 200, body.clone()).await;
        self.respond_json("/makeTransactionalApi", 200, body).await;
    }

    /// Every request received so far, oldest first
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(RecordedRequest::from)
            .collect()
    }

    /// Requests received on `endpoint` (relative to [`API_PREFIX`])
    pub async fn requests_to(&self, endpoint: &str) -> Vec<RecordedRequest> {
        let full_path = format!("{API_PREFIX}{endpoint}");
        self.requests()
            .await
            .into_iter()
            .filter(|r| r.path == full_path)
            .collect()
    }
}

/// A request captured by [`MockEmailApi`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// HTTP method
    pub method: String,
    /// URL path, including [`API_PREFIX`]
    pub path: String,
    /// `Authorization` header, if sent
    pub authorization: Option<String>,
    /// `Content-Type` header, if sent
    pub content_type: Option<String>,
    /// Raw body text
    pub raw_body: String,
    /// Body decoded as JSON, or `Value::Null` if it was not JSON
    pub body: Value,
}

impl From<&Request> for RecordedRequest {
    fn from(request: &Request) -> Self {
        let header = |name: &str| {
            request
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        Self {
            method: request.method.to_string(),
            path: request.url.path().to_string(),
            authorization: header("authorization"),
            content_type: header("content-type"),
            raw_body: String::from_utf8_lossy(&request.body).into_owned(),
            body: serde_json::from_slice(&request.body).unwrap_or(Value::Null),
        }
    }
}
