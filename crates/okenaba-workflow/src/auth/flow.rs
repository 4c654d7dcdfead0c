use super::backend::{AuthBackend, HttpAuthBackend};
use super::oauth::{HostedOAuth, OAuthProvider, OAuthRequest};
use super::session::{ProviderSession, SessionPayload};
use anyhow::Result;
use log::{info, warn};
use okenaba_core::config::AuthConfig;
use okenaba_error::{AuthError, AuthResult};
use std::time::Duration;

const AUTH_TIMEOUT: Duration = Duration::from_secs(15);

/// Login page state: the bot-check token plus the two collaborators.
///
/// The OAuth redirect is only requested once the backend has accepted the
/// bot-check token. Any failure on the way clears the token, so the user has
/// to pass the challenge again.
pub struct LoginFlow<B, O> {
    backend: B,
    oauth: O,
    origin: String,
    redirect_path: String,
    landing_path: String,
    bot_token: Option<String>,
}

impl LoginFlow<HttpAuthBackend, HostedOAuth> {
    pub fn from_config(config: &AuthConfig, origin: &str) -> Result<Self> {
        let backend = HttpAuthBackend::new(&config.base_url, AUTH_TIMEOUT)?;
        let oauth = HostedOAuth::new(config.authorize_url.clone());
        Ok(Self::new(backend, oauth, origin)
            .with_paths(&config.redirect_path, &config.landing_path))
    }
}

impl<B, O> LoginFlow<B, O>
where
    B: AuthBackend,
    O: OAuthProvider,
{
    pub fn new(backend: B, oauth: O, origin: &str) -> Self {
        Self {
            backend,
            oauth,
            origin: origin.trim_end_matches('/').to_string(),
            redirect_path: "/login".to_string(),
            landing_path: "/pages".to_string(),
            bot_token: None,
        }
    }

    pub fn with_paths(mut self, redirect_path: &str, landing_path: &str) -> Self {
        self.redirect_path = redirect_path.to_string();
        self.landing_path = landing_path.to_string();
        self
    }

    pub fn on_bot_check_success(&mut self, token: impl Into<String>) {
        self.bot_token = Some(token.into());
    }

    pub fn on_bot_check_expired(&mut self) {
        self.bot_token = None;
    }

    /// Whether the sign-in button is enabled.
    pub fn can_sign_in(&self) -> bool {
        self.bot_token.is_some()
    }

    /// Verify the bot check, then return the provider URL to redirect to.
    pub fn sign_in(&mut self) -> AuthResult<String> {
        let token = self.bot_token.clone().ok_or(AuthError::MissingBotCheck)?;

        if let Err(err) = self.backend.verify_bot_check(&token) {
            self.bot_token = None;
            return Err(err);
        }

        let request = OAuthRequest::google(format!("{}{}", self.origin, self.redirect_path));
        match self.oauth.authorize_url(&request) {
            Ok(url) => {
                info!("Redirecting to {} sign-in", request.provider);
                Ok(url)
            }
            Err(err) => {
                warn!("OAuth redirect failed: {}", err);
                self.bot_token = None;
                Err(err)
            }
        }
    }

    /// Hand the provider session to the backend; returns where to land.
    pub fn sync_session(&self, session: &ProviderSession) -> AuthResult<String> {
        let payload = SessionPayload::from(session);
        match self.backend.sync_session(&payload) {
            Ok(()) => {
                info!("Session synced for {}", payload.email);
                Ok(self.landing_path.clone())
            }
            Err(err) => {
                warn!("Session sync failed: {}", err);
                Err(err)
            }
        }
    }
}
