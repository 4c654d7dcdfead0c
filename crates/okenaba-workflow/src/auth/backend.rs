use super::session::SessionPayload;
use anyhow::{Context, Result};
use log::{debug, warn};
use okenaba_error::{AuthError, AuthResult};
use reqwest::blocking::Client;
use serde::Serialize;
use std::time::Duration;

pub const VERIFY_BOT_CHECK_PATH: &str = "/api/auth/verify-turnstile";
pub const SESSION_PATH: &str = "/api/auth/session";

/// The application backend's auth endpoints.
pub trait AuthBackend {
    fn verify_bot_check(&self, token: &str) -> AuthResult<()>;

    fn sync_session(&self, payload: &SessionPayload) -> AuthResult<()>;
}

#[derive(Serialize)]
struct BotCheckRequest<'a> {
    token: &'a str,
}

pub struct HttpAuthBackend {
    base_url: String,
    client: Client,
}

impl HttpAuthBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl AuthBackend for HttpAuthBackend {
    fn verify_bot_check(&self, token: &str) -> AuthResult<()> {
        let response = self
            .client
            .post(self.url(VERIFY_BOT_CHECK_PATH))
            .json(&BotCheckRequest { token })
            .send()
            .map_err(|err| {
                warn!("Bot check request failed: {}", err);
                AuthError::BotCheckFailed
            })?;

        if !response.status().is_success() {
            warn!("Bot check rejected with {}", response.status());
            return Err(AuthError::BotCheckFailed);
        }
        debug!("Bot check passed");
        Ok(())
    }

    fn sync_session(&self, payload: &SessionPayload) -> AuthResult<()> {
        let response = self
            .client
            .post(self.url(SESSION_PATH))
            .json(payload)
            .send()
            .map_err(|err| AuthError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::SessionRejected(status.as_u16()));
        }
        Ok(())
    }
}
