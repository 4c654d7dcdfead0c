//! Image upload checks and data-URL encoding.

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use okenaba_error::{UploadError, UploadResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
pub const ACCEPTED_MIME_TYPES: &[&str] = &["image/png", "image/jpeg"];

/// Where a file came from. Both paths go through [`accept_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadSource {
    Picker,
    DragDrop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing the MIME type from its extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read image file: {}", path.display()))?;
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload")
            .to_string();
        Ok(Self::new(name, mime_for_path(path), bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// An accepted image, ready to embed in the preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageData {
    pub mime: String,
    pub data_url: String,
    pub byte_len: usize,
}

pub fn accept_file(file: &FileUpload) -> UploadResult<ImageData> {
    let mime = file.mime.trim().to_ascii_lowercase();
    if !ACCEPTED_MIME_TYPES.contains(&mime.as_str()) {
        return Err(UploadError::BadType);
    }
    if file.len() > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge);
    }

    let payload = BASE64_STANDARD.encode(&file.bytes);
    Ok(ImageData {
        data_url: format!("data:{};base64,{}", mime, payload),
        mime,
        byte_len: file.len(),
    })
}
