//! Client configuration
//!
//! Plain values handed to [`EmailApiClient`](crate::EmailApiClient) at
//! construction. Nothing here reads the environment; see
//! [`settings`](crate::settings) for that.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default login endpoint path
pub const DEFAULT_LOGIN_PATH: &str = "/login";
/// Default template-send endpoint path
pub const DEFAULT_TEMPLATE_PATH: &str = "/gettransactionalApi";
/// Default direct-send endpoint path
pub const DEFAULT_DIRECT_PATH: &str = "/makeTransactionalApi";
/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Endpoint paths, relative to the base URL or absolute.
///
/// Missing fields take their defaults when deserialized, so a partial
/// override merges over the defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// Login endpoint
    pub login: String,
    /// Template-send endpoint
    pub template: String,
    /// Direct-send endpoint
    pub direct: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            login: DEFAULT_LOGIN_PATH.to_string(),
            template: DEFAULT_TEMPLATE_PATH.to_string(),
            direct: DEFAULT_DIRECT_PATH.to_string(),
        }
    }
}

impl Endpoints {
    /// Builder: Set login endpoint
    #[must_use]
    pub fn with_login(mut self, path: impl Into<String>) -> Self {
        self.login = path.into();
        self
    }

    /// Builder: Set template-send endpoint
    #[must_use]
    pub fn with_template(mut self, path: impl Into<String>) -> Self {
        self.template = path.into();
        self
    }

    /// Builder: Set direct-send endpoint
    #[must_use]
    pub fn with_direct(mut self, path: impl Into<String>) -> Self {
        self.direct = path.into();
        self
    }
}

/// HTTP transport behaviour
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds; 0 disables the timeout
    #[serde(rename = "timeout")]
    pub timeout_secs: u64,
    /// Verify TLS certificates. Off by default for local development.
    pub verify_ssl: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            verify_ssl: false,
        }
    }
}

impl HttpConfig {
    /// Request timeout as a `Duration`, or `None` when disabled
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_secs))
        }
    }
}

/// Default login credentials used for explicit and automatic login
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Account email
    pub email: Option<String>,
    /// Account password
    pub password: Option<String>,
}

impl Credentials {
    /// Credentials with both halves set
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }

    /// Both email and password are present and non-empty
    #[must_use]
    pub fn is_complete(&self) -> bool {
        non_empty(self.email.as_deref()).is_some() && non_empty(self.password.as_deref()).is_some()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Connection configuration for [`EmailApiClient`](crate::EmailApiClient)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    endpoints: Endpoints,
    http: HttpConfig,
    credentials: Option<Credentials>,
    app_id: Option<String>,
}

impl ClientConfig {
    /// Create a configuration for `base_url` with default endpoints and
    /// transport settings. Trailing slashes are stripped.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            endpoints: Endpoints::default(),
            http: HttpConfig::default(),
            credentials: None,
            app_id: None,
        }
    }

    /// Builder: Set endpoint paths
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Builder: Set transport behaviour
    #[must_use]
    pub const fn with_http(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Builder: Set default login credentials
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Builder: Set the default application identifier for template sends
    #[must_use]
    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    /// Base URL, never ending in `/`
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Endpoint paths
    #[must_use]
    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Transport behaviour
    #[must_use]
    pub const fn http(&self) -> &HttpConfig {
        &self.http
    }

    /// Default login credentials, if configured
    #[must_use]
    pub const fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Default application identifier, if configured
    #[must_use]
    pub fn app_id(&self) -> Option<&str> {
        self.app_id.as_deref()
    }
}

/// `Some(s)` only when `s` is present and non-empty.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
