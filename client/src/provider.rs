//! Client factory and optional process-wide default instance
//!
//! Applications that want a single shared client can install one here and
//! reach it from anywhere with [`global`]. Independent clients built with
//! [`make_client`] or [`EmailApiClient::new`] are unaffected.

use crate::client::EmailApiClient;
use crate::settings::{Settings, SettingsError};
use once_cell::sync::OnceCell;

static DEFAULT_CLIENT: OnceCell<EmailApiClient> = OnceCell::new();

/// Build a client from wiring settings
#[must_use]
pub fn make_client(settings: &Settings) -> EmailApiClient {
    EmailApiClient::new(settings.clone().into_client_config())
}

/// Install the process-wide default client.
///
/// # Errors
///
/// Hands `client` back if a default is already installed
pub fn install(client: EmailApiClient) -> Result<&'static EmailApiClient, EmailApiClient> {
    DEFAULT_CLIENT
        .try_insert(client)
        .map_err(|(_, rejected)| rejected)
}

/// The process-wide default client, if one has been installed
#[must_use]
pub fn global() -> Option<&'static EmailApiClient> {
    DEFAULT_CLIENT.get()
}

/// The process-wide default client, built from the environment on first use
///
/// # Errors
///
/// Returns `SettingsError` if the environment holds malformed settings
pub fn global_or_init_from_env() -> Result<&'static EmailApiClient, SettingsError> {
    DEFAULT_CLIENT.get_or_try_init(|| {
        let settings = Settings::from_env()?;
        tracing::debug!(base_url = %settings.base_url, "Initialising default email client");
        Ok(make_client(&settings))
    })
}
