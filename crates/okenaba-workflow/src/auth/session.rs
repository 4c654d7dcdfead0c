use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Some providers only send `picture`.
    #[serde(default)]
    pub picture: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

/// Session handed back by the OAuth provider after the redirect.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderSession {
    pub access_token: String,
    pub refresh_token: String,
    pub user: ProviderUser,
}

/// Body of `POST /api/auth/session`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPayload {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

impl From<&ProviderSession> for SessionPayload {
    fn from(session: &ProviderSession) -> Self {
        let meta = &session.user.user_metadata;
        Self {
            access_token: session.access_token.clone(),
            refresh_token: session.refresh_token.clone(),
            user_id: session.user.id.clone(),
            email: session.user.email.clone(),
            full_name: non_empty(&meta.full_name),
            avatar_url: non_empty(&meta.avatar_url).or_else(|| non_empty(&meta.picture)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn avatar_falls_back_to_picture() {
        let session: ProviderSession = serde_json::from_value(json!({
            "access_token": "at",
            "refresh_token": "rt",
            "user": {
                "id": "u1",
                "email": "ada@example.com",
                "user_metadata": { "picture": "https://img/ada.png" }
            }
        }))
        .unwrap();

        let payload = SessionPayload::from(&session);
        assert_eq!(payload.avatar_url.as_deref(), Some("https://img/ada.png"));
        assert_eq!(payload.full_name, None);
    }

    #[test]
    fn payload_serializes_nulls() {
        let payload = SessionPayload {
            access_token: "at".into(),
            refresh_token: "rt".into(),
            user_id: "u1".into(),
            email: "a@b.co".into(),
            full_name: Some("Ada".into()),
            avatar_url: None,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["full_name"], "Ada");
        assert!(value["avatar_url"].is_null());
        assert_eq!(value["user_id"], "u1");
    }
}
