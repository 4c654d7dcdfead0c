use okenaba_error::{AuthError, AuthResult};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthRequest {
    pub provider: String,
    pub redirect_to: String,
    /// Extra provider query parameters, in order.
    pub query: Vec<(String, String)>,
}

impl OAuthRequest {
    /// Google with offline access and a forced consent screen.
    pub fn google(redirect_to: impl Into<String>) -> Self {
        Self {
            provider: "google".to_string(),
            redirect_to: redirect_to.into(),
            query: vec![
                ("access_type".to_string(), "offline".to_string()),
                ("prompt".to_string(), "consent".to_string()),
            ],
        }
    }
}

pub trait OAuthProvider {
    /// URL the browser should be sent to.
    fn authorize_url(&self, request: &OAuthRequest) -> AuthResult<String>;
}

/// Hosted auth service exposing a single `authorize` endpoint.
#[derive(Debug, Clone)]
pub struct HostedOAuth {
    authorize_url: String,
}

impl HostedOAuth {
    pub fn new(authorize_url: impl Into<String>) -> Self {
        Self {
            authorize_url: authorize_url.into(),
        }
    }
}

impl OAuthProvider for HostedOAuth {
    fn authorize_url(&self, request: &OAuthRequest) -> AuthResult<String> {
        let mut url = Url::parse(&self.authorize_url)
            .map_err(|err| AuthError::Provider(format!("bad authorize url: {}", err)))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("provider", &request.provider);
            pairs.append_pair("redirect_to", &request.redirect_to);
            for (key, value) in &request.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url.to_string())
    }
}
