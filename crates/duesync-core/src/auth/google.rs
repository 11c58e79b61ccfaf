//! Google OAuth credentials and access-token management.
//!
//! Client credentials and tokens live in the OS keyring. Access tokens are
//! refreshed automatically when expired.

use super::{keyring_store, oauth};
use crate::error::OAuthError;

const SERVICE_NAME: &str = "google";

/// Access-token provider for the Google Calendar API.
pub struct GoogleAuth {
    client_id: String,
    client_secret: String,
    /// Fixed token bypassing the keyring, for tests.
    static_token: Option<String>,
}

impl GoogleAuth {
    /// Load client credentials from the keyring.
    /// Fields are empty strings if not stored yet.
    pub fn from_keyring() -> Self {
        let client_id = keyring_store::get("google_client_id")
            .ok()
            .flatten()
            .unwrap_or_default();
        let client_secret = keyring_store::get("google_client_secret")
            .ok()
            .flatten()
            .unwrap_or_default();

        Self {
            client_id,
            client_secret,
            static_token: None,
        }
    }

    /// Create a provider that always yields the given token (for testing).
    pub fn with_static_token(token: impl Into<String>) -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            static_token: Some(token.into()),
        }
    }

    /// Persist Google OAuth client credentials to the OS keyring.
    pub fn set_credentials(client_id: &str, client_secret: &str) -> Result<(), OAuthError> {
        keyring_store::set("google_client_id", client_id)?;
        keyring_store::set("google_client_secret", client_secret)?;
        Ok(())
    }

    fn oauth_config(&self) -> oauth::OAuthConfig {
        oauth::OAuthConfig {
            service_name: SERVICE_NAME.to_string(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            auth_url: "https://accounts.google.com/o/oauth2/v2/auth".to_string(),
            token_url: "https://oauth2.googleapis.com/token".to_string(),
            scopes: vec!["https://www.googleapis.com/auth/calendar.events".to_string()],
            redirect_port: 19821,
        }
    }

    /// Whether tokens are stored for the calendar backend.
    pub fn is_authenticated(&self) -> bool {
        self.static_token.is_some() || oauth::load_tokens(SERVICE_NAME).is_some()
    }

    /// Start the browser OAuth flow and store the resulting tokens.
    pub async fn authenticate(&self) -> Result<(), OAuthError> {
        if self.client_id.is_empty() || self.client_secret.is_empty() {
            return Err(OAuthError::CredentialsNotConfigured {
                service: SERVICE_NAME.to_string(),
            });
        }

        oauth::authorize(&self.oauth_config()).await?;
        Ok(())
    }

    /// Remove stored tokens.
    pub fn disconnect(&self) -> Result<(), OAuthError> {
        keyring_store::delete(SERVICE_NAME)
    }

    /// Return a valid access token, refreshing if expired.
    pub async fn access_token(&self) -> Result<String, OAuthError> {
        if let Some(token) = &self.static_token {
            return Ok(token.clone());
        }

        let tokens =
            oauth::load_tokens(SERVICE_NAME).ok_or_else(|| OAuthError::NotAuthenticated {
                service: SERVICE_NAME.to_string(),
            })?;

        if !oauth::is_expired(&tokens) {
            return Ok(tokens.access_token);
        }

        let refresh = tokens
            .refresh_token
            .as_deref()
            .ok_or(OAuthError::TokenExpired)?;

        let refreshed = oauth::refresh_token(&self.oauth_config(), refresh).await?;
        Ok(refreshed.access_token)
    }
}
