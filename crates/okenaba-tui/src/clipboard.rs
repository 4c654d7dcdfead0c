//! Clipboard writers for the terminal.
//!
//! The primary writer asks the terminal emulator to set the system clipboard
//! (OSC 52). Terminals without support silently drop it, so the fallback
//! writes the text to a file the user can open.

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use okenaba_ports::Clipboard;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let payload = BASE64_STANDARD.encode(text.as_bytes());
        write!(self.out, "\x1b]52;c;{}\x07", payload).context("Failed to write OSC 52 sequence")?;
        self.out.flush().context("Failed to flush terminal")?;
        Ok(())
    }
}

pub struct FileClipboard {
    path: PathBuf,
}

impl FileClipboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Clipboard for FileClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        fs::write(&self.path, text)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn osc52_encodes_payload() {
        let mut clip = Osc52Clipboard::new(Vec::new());
        clip.write_text("hi").unwrap();
        assert_eq!(clip.into_inner(), b"\x1b]52;c;aGk=\x07".to_vec());
    }

    #[test]
    fn file_clipboard_creates_parent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("link.txt");
        FileClipboard::new(&path).write_text("https://presence.app/ada").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "https://presence.app/ada");
    }
}
