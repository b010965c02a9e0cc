//! Integration tests for login and token handling.

use serde_json::json;
use std::io;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use transactional_email_client::{
    ClientConfig, Credentials, EmailApiClient, EmailApiError, Endpoints, ErrorKind, HttpConfig,
};
use transactional_email_testing::MockEmailApi;
use transactional_email_testing::wiremock::ResponseTemplate;

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_login_stores_and_returns_token() {
    let api = MockEmailApi::start().await;
    api.expect_login("abc123").await;

    let client = EmailApiClient::new(api.config());
    let token = client.login(Some("ops@mail.test"), Some("pw")).await.unwrap();

    assert_eq!(token, "abc123");
    assert_eq!(client.token().as_deref(), Some("abc123"));

    let requests = api.requests_to("/login").await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].authorization, None);
    assert_eq!(requests[0].content_type.as_deref(), Some("application/json"));
    assert_eq!(requests[0].body, json!({"email": "ops@mail.test", "password": "pw"}));
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_login_falls_back_to_configured_credentials() {
    let api = MockEmailApi::start().await;
    api.expect_login("from-config").await;

    let client = EmailApiClient::new(
        api.config().with_credentials(Credentials::new("ops@mail.test", "secret")),
    );
    let token = client.login(None, None).await.unwrap();
    assert_eq!(token, "from-config");

    // Explicit arguments win over configured ones, one field at a time
    client.login(Some("other@mail.test"), None).await.unwrap();
    let requests = api.requests_to("/login").await;
    assert_eq!(requests[1].body, json!({"email": "other@mail.test", "password": "secret"}));
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_login_without_token_is_protocol_error() {
    let api = MockEmailApi::start().await;
    api.respond_json("/login", 200, json!({"user": "ops"})).await;

    let client = EmailApiClient::new(api.config()).with_token("previous");
    let err = client.login(Some("ops@mail.test"), Some("pw")).await.unwrap_err();

    assert_eq!(err, EmailApiError::MissingToken);
    assert_eq!(err.kind(), ErrorKind::Protocol);
    assert_eq!(client.token().as_deref(), Some("previous"));
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_login_rejected_is_api_error() {
    let api = MockEmailApi::start().await;
    api.respond_json("/login", 401, json!({"message": "Invalid credentials"})).await;

    let client = EmailApiClient::new(api.config());
    let err = client.login(Some("ops@mail.test"), Some("wrong")).await.unwrap_err();

    assert_eq!(
        err,
        EmailApiError::Api {
            status: 401,
            message: "Invalid credentials".into()
        }
    );
    assert_eq!(client.token(), None);
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_login_missing_password_makes_no_request() {
    let api = MockEmailApi::start().await;
    api.expect_login("unused").await;

    let client = EmailApiClient::new(
        api.config().with_credentials(Credentials {
            email: Some("ops@mail.test".into()),
            password: None,
        }),
    );
    let err = client.login(None, None).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(api.requests().await.is_empty());
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_login_endpoint_absolute_url_bypasses_base() {
    let auth = MockEmailApi::start().await;
    auth.expect_login("elsewhere").await;

    let config = ClientConfig::new("http://127.0.0.1:9/api")
        .with_endpoints(Endpoints::default().with_login(auth.url("/login")));
    let client = EmailApiClient::new(config);

    let token = client.login(Some("ops@mail.test"), Some("pw")).await.unwrap();
    assert_eq!(token, "elsewhere");
    assert_eq!(auth.requests_to("/login").await.len(), 1);
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_unreachable_server_is_network_error() {
    // Port 9 (discard) is not listening on test hosts
    let client = EmailApiClient::new(ClientConfig::new("http://127.0.0.1:9/api"));
    let err = client.login(Some("ops@mail.test"), Some("pw")).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(client.token(), None);
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_login_with_malformed_utf8_is_protocol_error() {
    let api = MockEmailApi::start().await;
    api.respond(
        "/login",
        ResponseTemplate::new(200).set_body_raw(b"{\"token\":\"a\xff\"}".to_vec(), "application/json"),
    )
    .await;

    let client = EmailApiClient::new(api.config()).with_token("previous");
    let err = client.login(Some("ops@mail.test"), Some("pw")).await.unwrap_err();

    assert!(matches!(err, EmailApiError::InvalidJson { status: 200, .. }));
    assert_eq!(err.kind(), ErrorKind::Protocol);
    assert_eq!(client.token().as_deref(), Some("previous"));
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_slow_server_times_out_as_network_error() {
    let api = MockEmailApi::start().await;
    api.respond(
        "/login",
        ResponseTemplate::new(200)
            .set_body_json(json!({"token": "late"}))
            .set_delay(Duration::from_secs(3)),
    )
    .await;

    let client = EmailApiClient::new(api.config().with_http(HttpConfig {
        timeout_secs: 1,
        verify_ssl: false,
    }));
    let err = client.login(Some("ops@mail.test"), Some("pw")).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(client.token(), None);
}

/// Shared in-memory sink for captured log output.
#[derive(Clone, Default)]
struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    fn contents(&self) -> String {
        let buf = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_login_logs_never_include_credentials() {
    let api = MockEmailApi::start().await;
    api.expect_login("abc123").await;

    let capture = LogCapture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let client = EmailApiClient::new(
        api.config().with_credentials(Credentials::new("ops@mail.test", "hunter2")),
    );
    client.login(None, None).await.unwrap();

    let logs = capture.contents();
    assert!(logs.contains("Logged in"));
    assert!(!logs.contains("ops@mail.test"));
    assert!(!logs.contains("hunter2"));
    assert!(!logs.contains("abc123"));
}
