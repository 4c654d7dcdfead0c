use thiserror::Error;

pub type UploadResult<T> = Result<T, UploadError>;
pub type AuthResult<T> = Result<T, AuthError>;

/// Why an image upload was refused. The snapshot is never touched on error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadError {
    #[error("Please upload a PNG or JPEG image")]
    BadType,

    #[error("Image must be smaller than 5MB")]
    TooLarge,
}

impl UploadError {
    /// Stable reason code (`bad-type`, `too-large`).
    pub fn reason(&self) -> &'static str {
        match self {
            UploadError::BadType => "bad-type",
            UploadError::TooLarge => "too-large",
        }
    }
}

#[derive(Error, Debug)]
pub enum WizardError {
    #[error("Invalid wizard schema: {0}")]
    Schema(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Unknown field key: {0}")]
    UnknownField(String),
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Please complete the security challenge first.")]
    MissingBotCheck,

    #[error("Security check failed. Please try again.")]
    BotCheckFailed,

    #[error("Login failed: {0}")]
    Provider(String),

    #[error("Session sync rejected (status {0})")]
    SessionRejected(u16),

    #[error("Network error: {0}")]
    Transport(String),
}
