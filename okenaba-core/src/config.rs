use crate::schema::{parse_schema_toml, Variant, WizardSchema};
use crate::share::DEFAULT_SITE_BASE_URL;
use anyhow::{Context, Result};
use okenaba_error::WizardError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ANIMATION_BUDGET_MS: u64 = 400;
pub const DEFAULT_NOTIFICATION_MS: u64 = 2500;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Backend that verifies bot-check tokens and accepts session syncs.
    pub base_url: String,
    /// Hosted auth `authorize` endpoint for the OAuth redirect.
    pub authorize_url: String,
    /// Where the OAuth provider sends the user back to.
    pub redirect_path: String,
    /// Authenticated landing route after a successful session sync.
    pub landing_path: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            authorize_url: "http://127.0.0.1:54321/auth/v1/authorize".to_string(),
            redirect_path: "/login".to_string(),
            landing_path: "/pages".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    pub variant: Variant,
    /// Optional TOML schema overriding the bundled variant.
    pub schema_path: Option<PathBuf>,
    pub animation_budget_ms: u64,
    pub notification_ms: u64,
    pub site_base_url: String,
    pub theme_path: PathBuf,
    /// Project draft discarded when the user leaves onboarding early.
    pub draft_delete_url: String,
    pub auth: AuthConfig,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            schema_path: None,
            animation_budget_ms: DEFAULT_ANIMATION_BUDGET_MS,
            notification_ms: DEFAULT_NOTIFICATION_MS,
            site_base_url: DEFAULT_SITE_BASE_URL.to_string(),
            theme_path: PathBuf::from(".okenaba/theme.json"),
            draft_delete_url: "/projects/draft/delete".to_string(),
            auth: AuthConfig::default(),
        }
    }
}

impl WizardConfig {
    pub fn animation_budget(&self) -> Duration {
        Duration::from_millis(self.animation_budget_ms)
    }

    pub fn notification_lifetime(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }

    /// Where the interactive wizard logs when no `--log-file` is given.
    pub fn log_path(&self) -> PathBuf {
        self.theme_path.with_file_name("okenaba.log")
    }

    /// The schema file when configured, otherwise the bundled variant.
    pub fn schema(&self) -> Result<WizardSchema> {
        match &self.schema_path {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read schema file: {}", path.display()))?;
                parse_schema_toml(&text)
                    .with_context(|| format!("Invalid schema file: {}", path.display()))
            }
            None => self.variant.schema(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.animation_budget_ms == 0 {
            return Err(WizardError::Config("animation_budget_ms must be > 0".into()).into());
        }
        if self.notification_ms == 0 {
            return Err(WizardError::Config("notification_ms must be > 0".into()).into());
        }
        if self.site_base_url.trim().is_empty() {
            return Err(WizardError::Config("site_base_url must not be empty".into()).into());
        }
        Ok(())
    }
}

/// Load a config file; a missing path yields the defaults.
pub fn load_config(path: Option<&Path>) -> Result<WizardConfig> {
    let config = match path {
        Some(path) if path.exists() => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            toml::from_str::<WizardConfig>(&text)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        }
        Some(path) => {
            log::warn!(
                "Config file {} not found, using defaults",
                path.display()
            );
            WizardConfig::default()
        }
        None => WizardConfig::default(),
    };
    config.validate()?;
    Ok(config)
}
