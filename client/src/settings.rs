//! Settings loading for application wiring
//!
//! [`Settings`] mirrors the published configuration of the email service:
//! base URL, application id, endpoint overrides, HTTP behaviour and optional
//! login credentials. It can be read from environment variables or a TOML
//! document and then turned into a [`ClientConfig`].
//!
//! # Environment variables
//!
//! | Variable | Setting |
//! |---|---|
//! | `TRANSACTIONAL_EMAIL_BASE_URL` | `base_url` |
//! | `APP_ID` | `app_id` |
//! | `TRANSACTIONAL_EMAIL_LOGIN_ENDPOINT` | `endpoints.login` |
//! | `TRANSACTIONAL_EMAIL_TEMPLATE_ENDPOINT` | `endpoints.template` |
//! | `TRANSACTIONAL_EMAIL_DIRECT_ENDPOINT` | `endpoints.direct` |
//! | `TRANSACTIONAL_EMAIL_TIMEOUT` | `http.timeout` |
//! | `TRANSACTIONAL_EMAIL_VERIFY_SSL` | `http.verify_ssl` |
//! | `TRANSACTIONAL_EMAIL_LOGIN_EMAIL` | `credentials.email` |
//! | `TRANSACTIONAL_EMAIL_LOGIN_PASSWORD` | `credentials.password` |
//!
//! Empty variables count as unset.
//!
//! # Example
//!
//! ```no_run
//! use transactional_email_client::settings::Settings;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Settings::from_env()?.into_client_config();
//! println!("Sending through {}", config.base_url());
//! # Ok(())
//! # }
//! ```

use crate::config::{ClientConfig, Credentials, Endpoints, HttpConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

/// Settings loading error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// A variable held a value that could not be interpreted
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue {
        /// Variable or key name
        var: String,
        /// Offending value
        value: String,
    },

    /// The settings document could not be parsed
    #[error("Failed to parse settings: {0}")]
    Parse(String),
}

/// Wiring-level configuration for the email client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base API URL
    pub base_url: String,
    /// Default application identifier for template sends
    pub app_id: Option<String>,
    /// Endpoint path overrides
    pub endpoints: Endpoints,
    /// HTTP behaviour
    pub http: HttpConfig,
    /// Credentials for automatic login
    pub credentials: Option<Credentials>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            app_id: None,
            endpoints: Endpoints::default(),
            http: HttpConfig::default(),
            credentials: None,
        }
    }
}

impl Settings {
    /// Load settings from the process environment
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidValue` for a malformed timeout or
    /// TLS verification flag
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidValue` for a malformed timeout or
    /// TLS verification flag
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let mut settings = Self::default();

        if let Some(base_url) = get("TRANSACTIONAL_EMAIL_BASE_URL") {
            settings.base_url = base_url;
        }
        settings.app_id = get("APP_ID");

        if let Some(path) = get("TRANSACTIONAL_EMAIL_LOGIN_ENDPOINT") {
            settings.endpoints.login = path;
        }
        if let Some(path) = get("TRANSACTIONAL_EMAIL_TEMPLATE_ENDPOINT") {
            settings.endpoints.template = path;
        }
        if let Some(path) = get("TRANSACTIONAL_EMAIL_DIRECT_ENDPOINT") {
            settings.endpoints.direct = path;
        }

        if let Some(raw) = get("TRANSACTIONAL_EMAIL_TIMEOUT") {
            settings.http.timeout_secs = raw.trim().parse().map_err(|_| SettingsError::InvalidValue {
                var: "TRANSACTIONAL_EMAIL_TIMEOUT".to_string(),
                value: raw.clone(),
            })?;
        }
        if let Some(raw) = lookup("TRANSACTIONAL_EMAIL_VERIFY_SSL") {
            settings.http.verify_ssl = parse_bool(&raw).ok_or_else(|| SettingsError::InvalidValue {
                var: "TRANSACTIONAL_EMAIL_VERIFY_SSL".to_string(),
                value: raw.clone(),
            })?;
        }

        let email = get("TRANSACTIONAL_EMAIL_LOGIN_EMAIL");
        let password = get("TRANSACTIONAL_EMAIL_LOGIN_PASSWORD");
        if email.is_some() || password.is_some() {
            settings.credentials = Some(Credentials { email, password });
        }

        Ok(settings)
    }

    /// Parse settings from a TOML document; absent keys keep their defaults
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Parse` if the document is not valid
    pub fn from_toml_str(document: &str) -> Result<Self, SettingsError> {
        toml::from_str(document).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    /// Build the client configuration
    #[must_use]
    pub fn into_client_config(self) -> ClientConfig {
        let mut config = ClientConfig::new(self.base_url)
            .with_endpoints(self.endpoints)
            .with_http(self.http);
        if let Some(credentials) = self.credentials {
            config = config.with_credentials(credentials);
        }
        if let Some(app_id) = self.app_id.filter(|id| !id.is_empty()) {
            config = config.with_app_id(app_id);
        }
        config
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "off" => Some(false),
        "1" | "true" | "yes" | "on" => Some(true),
        _ => None,
    }
}
