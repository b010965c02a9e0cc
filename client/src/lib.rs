//! # Transactional Email API Client
//!
//! Rust client for a transactional email HTTP API: password login producing
//! a bearer token, template sends and direct sends.
//!
//! ## Example
//!
//! ```no_run
//! use transactional_email_client::{ClientConfig, Credentials, DirectEmail, EmailApiClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("https://mail.example.com/api")
//!         .with_credentials(Credentials::new("ops@example.com", "secret"))
//!         .with_app_id("5d1c8a34-9f0e-4a5b-8a7e-0c2f1e3d4b6a");
//!     let client = EmailApiClient::new(config);
//!
//!     // Logs in automatically with the configured credentials
//!     let email = DirectEmail::new("noreply@example.com", "ann@example.com", "Hello")
//!         .with_body("Plain text body");
//!     let response = client.send_direct_email(&email, None).await?;
//!
//!     println!("Response: {response:?}");
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - Token caching with automatic login from configured credentials
//! - Template sends with structured or pre-encoded variables
//! - Direct sends with optional HTML body
//! - Typed error taxonomy (`InvalidInput`, `Network`, protocol, `Api`)
//! - Environment/TOML settings and an optional process-wide default client

pub mod client;
pub mod config;
pub mod error;
pub mod messages;
pub mod provider;
pub mod settings;

// Re-export main types for convenience
pub use client::EmailApiClient;
pub use config::{ClientConfig, Credentials, Endpoints, HttpConfig};
pub use error::{EmailApiError, ErrorKind, Result};
pub use messages::{ApiResponse, DirectEmail, TemplateEmail, TemplateVariables};
pub use settings::{Settings, SettingsError};
