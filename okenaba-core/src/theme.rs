//! Dark/light theme preference, persisted across runs.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Theme::Dark => "🌙",
            Theme::Light => "☀️",
        }
    }

    /// Label for the toggle control (what pressing it will do).
    pub fn toggle_label(&self) -> &'static str {
        match self {
            Theme::Dark => "Switch to light mode",
            Theme::Light => "Switch to dark mode",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Dark => write!(f, "dark"),
            Theme::Light => write!(f, "light"),
        }
    }
}

/// A stored preference wins; otherwise follow the system preference.
pub fn resolve_theme(stored: Option<Theme>, prefers_dark: bool) -> Theme {
    match stored {
        Some(theme) => theme,
        None if prefers_dark => Theme::Dark,
        None => Theme::Light,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
struct ThemePreference {
    theme: Theme,
}

#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<Theme>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read theme file: {}", self.path.display()))?;
        let pref: ThemePreference =
            serde_json::from_str(&content).context("Failed to parse theme file")?;
        Ok(Some(pref.theme))
    }

    /// Write via temp file + rename so a crash never leaves a torn file.
    pub fn save(&self, theme: Theme) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create theme directory: {}", parent.display())
                })?;
            }
        }

        let tmp_path = temp_path(&self.path);
        let payload = serde_json::to_string_pretty(&ThemePreference { theme })
            .context("Failed to serialize theme")?;
        let mut file = File::create(&tmp_path)
            .with_context(|| format!("Failed to create temp theme file: {}", tmp_path.display()))?;
        file.write_all(payload.as_bytes())
            .context("Failed to write theme")?;
        file.sync_all().context("Failed to flush theme")?;

        fs::rename(&tmp_path, &self.path).with_context(|| {
            format!("Failed to replace theme file: {}", self.path.display())
        })?;
        Ok(())
    }

    /// Flip the effective theme and persist the result.
    pub fn toggle(&self, prefers_dark: bool) -> Result<Theme> {
        let next = resolve_theme(self.load()?, prefers_dark).toggled();
        self.save(next)?;
        log::info!("🎨 Theme set to {}", next);
        Ok(next)
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("theme.json");
    path.with_file_name(format!("{}.tmp", file_name))
}
