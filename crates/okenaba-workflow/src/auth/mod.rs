//! Sign-in: bot check, OAuth redirect and backend session sync.
//!
//! This is a library surface for the hosting login page. The wizard binary
//! starts after sign-in has happened, so nothing in `okenaba-cli` or
//! `okenaba-tui` calls it.

pub mod backend;
pub mod flow;
pub mod oauth;
pub mod session;

pub use backend::{AuthBackend, HttpAuthBackend};
pub use flow::LoginFlow;
pub use oauth::{HostedOAuth, OAuthProvider, OAuthRequest};
pub use session::{ProviderSession, ProviderUser, SessionPayload, UserMetadata};
