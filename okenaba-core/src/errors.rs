pub use okenaba_error::{AuthError, UploadError, WizardError};

/// Result type alias for Okenaba operations
pub type Result<T> = anyhow::Result<T>;
