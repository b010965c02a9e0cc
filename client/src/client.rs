//! Transactional email API client implementation

use crate::{
    config::{non_empty, ClientConfig},
    error::{EmailApiError, Result},
    messages::{ApiResponse, DirectEmail, DirectPayload, LoginPayload, TemplateEmail, TemplatePayload},
};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;
use std::sync::{PoisonError, RwLock};

/// Transactional email API client
///
/// Holds the connection configuration and the current bearer token. The
/// token is set by [`login`](Self::login) or [`set_token`](Self::set_token)
/// and read by every send; it never expires on the client side.
#[derive(Debug)]
pub struct EmailApiClient {
    config: ClientConfig,
    token: RwLock<Option<String>>,
}

impl EmailApiClient {
    /// Create a client with no stored token
    #[must_use]
    pub const fn new(config: ClientConfig) -> Self {
        Self {
            config,
            token: RwLock::new(None),
        }
    }

    /// Builder: Inject an initial token
    #[must_use]
    pub fn with_token(self, token: impl Into<String>) -> Self {
        self.set_token(Some(token.into()));
        self
    }

    /// Connection configuration
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Current stored token
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Overwrite the stored token. `None` or an empty string leaves the
    /// client without a usable token.
    pub fn set_token(&self, token: Option<String>) -> &Self {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
        self
    }

    /// Forget the stored token
    pub fn clear_token(&self) -> &Self {
        self.set_token(None)
    }

    /// Log in and store the returned token.
    ///
    /// `email` and `password` fall back to the configured credentials when
    /// `None`.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if email or password is still missing after defaulting
    /// - `MissingToken` if the response has no `token` field
    /// - any error from the underlying request
    pub async fn login(&self, email: Option<&str>, password: Option<&str>) -> Result<String> {
        let credentials = self.config.credentials();
        let email = email.or_else(|| credentials.and_then(|c| c.email.as_deref()));
        let password = password.or_else(|| credentials.and_then(|c| c.password.as_deref()));

        let (Some(email), Some(password)) = (non_empty(email), non_empty(password)) else {
            return Err(EmailApiError::InvalidInput(
                "login requires email and password".to_string(),
            ));
        };

        let response = self
            .post(&self.config.endpoints().login, &LoginPayload { email, password }, None)
            .await?;

        let token = match response.get("token") {
            Some(Value::String(token)) => token.clone(),
            Some(Value::Number(token)) => token.to_string(),
            _ => return Err(EmailApiError::MissingToken),
        };

        tracing::debug!("Logged in to transactional email API");
        self.set_token(Some(token.clone()));
        Ok(token)
    }

    /// Send an email rendered from a server-side template.
    ///
    /// The application identifier falls back to the configured app id when
    /// the request carries none.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if no application identifier is available; raised
    ///   before any network call
    /// - any error from automatic login or the send request
    pub async fn send_template_email(
        &self,
        email: &TemplateEmail,
        token: Option<&str>,
    ) -> Result<ApiResponse> {
        let uuid = email.uuid.as_deref().or_else(|| self.config.app_id());
        let Some(uuid) = non_empty(uuid) else {
            return Err(EmailApiError::InvalidInput(
                "template sends require a UUID; configure an app id or pass one explicitly"
                    .to_string(),
            ));
        };

        let payload = TemplatePayload::new(email, uuid)?;
        let token = self.resolve_token(token).await?;
        self.post(&self.config.endpoints().template, &payload, token.as_deref())
            .await
    }

    /// Send an email with caller-supplied subject and body.
    ///
    /// # Errors
    ///
    /// Returns any error from automatic login or the send request
    pub async fn send_direct_email(
        &self,
        email: &DirectEmail,
        token: Option<&str>,
    ) -> Result<ApiResponse> {
        let payload = DirectPayload::from(email);
        let token = self.resolve_token(token).await?;
        self.post(&self.config.endpoints().direct, &payload, token.as_deref())
            .await
    }

    /// Pick the token for a send: override, then stored, then a fresh login
    /// when complete credentials are configured.
    async fn resolve_token(&self, override_token: Option<&str>) -> Result<Option<String>> {
        if let Some(token) = non_empty(override_token) {
            return Ok(Some(token.to_string()));
        }
        if let Some(token) = self.token().filter(|t| !t.is_empty()) {
            return Ok(Some(token));
        }
        if self.config.credentials().is_some_and(|c| c.is_complete()) {
            tracing::debug!("No token available, logging in with configured credentials");
            return self.login(None, None).await.map(Some);
        }
        Ok(None)
    }

    async fn post<P: Serialize + ?Sized>(
        &self,
        path_or_url: &str,
        payload: &P,
        token: Option<&str>,
    ) -> Result<ApiResponse> {
        let url = self.build_url(path_or_url);

        let http = self.config.http();
        let mut builder =
            reqwest::Client::builder().danger_accept_invalid_certs(!http.verify_ssl);
        if let Some(timeout) = http.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| EmailApiError::Network(format!("HTTP client error: {e}")))?;

        let token = non_empty(token);
        tracing::debug!(url = %url, authenticated = token.is_some(), "POST");

        let mut request = client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(payload);
        if let Some(token) = token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| EmailApiError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let raw = response
            .bytes()
            .await
            .map_err(|e| EmailApiError::Network(e.to_string()))?;

        decode_response(status, &raw)
    }

    fn build_url(&self, path_or_url: &str) -> String {
        if path_or_url.starts_with("http://") || path_or_url.starts_with("https://") {
            return path_or_url.to_string();
        }
        if path_or_url.starts_with('/') {
            format!("{}{path_or_url}", self.config.base_url())
        } else {
            format!("{}/{path_or_url}", self.config.base_url())
        }
    }
}

/// Map a status code and raw body to the decoded object or an error.
///
/// JSON validity (including UTF-8) is checked first, then the status; a
/// successful response whose body is not an object comes back as
/// `{raw, status}`.
fn decode_response(status: u16, raw: &[u8]) -> Result<ApiResponse> {
    let decoded: Value = serde_json::from_slice(raw).map_err(|_| {
        tracing::warn!(status, "Response body is not valid JSON");
        EmailApiError::InvalidJson {
            status,
            body: String::from_utf8_lossy(raw).into_owned(),
        }
    })?;

    if status >= 400 {
        let message = match decoded.get("message") {
            Some(Value::String(message)) => message.clone(),
            Some(Value::Null) | None => format!("HTTP {status}"),
            Some(other) => other.to_string(),
        };
        tracing::warn!(status, message = %message, "API request failed");
        return Err(EmailApiError::Api { status, message });
    }

    match decoded {
        Value::Object(map) => Ok(map),
        _ => {
            let mut map = ApiResponse::new();
            map.insert(
                "raw".to_string(),
                Value::String(String::from_utf8_lossy(raw).into_owned()),
            );
            map.insert("status".to_string(), Value::from(status));
            Ok(map)
        }
    }
}
