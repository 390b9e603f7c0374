//! Probe image types.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SessionError, SessionResult};

/// Image extensions accepted for file probes (lowercase, without the dot).
pub const ACCEPTED_IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// An uploaded probe image.
#[derive(Clone, PartialEq, Eq)]
pub struct ProbeFile {
    file_name: String,
    bytes: Vec<u8>,
}

impl ProbeFile {
    /// Create a file probe, rejecting names without an accepted image extension.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> SessionResult<Self> {
        let file_name = file_name.into();
        if image_extension(&file_name).is_none() {
            return Err(SessionError::validation(format!(
                "unsupported image type: {} (accepted: {})",
                file_name,
                ACCEPTED_IMAGE_EXTENSIONS.join(", ")
            )));
        }
        if bytes.is_empty() {
            return Err(SessionError::validation(format!("image file is empty: {}", file_name)));
        }
        Ok(Self { file_name, bytes })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// MIME type for the multipart part, derived from the extension.
    pub fn mime_type(&self) -> &'static str {
        match image_extension(&self.file_name).as_deref() {
            Some("png") => "image/png",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            _ => "image/jpeg",
        }
    }
}

impl std::fmt::Debug for ProbeFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProbeFile")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn image_extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .filter(|e| ACCEPTED_IMAGE_EXTENSIONS.contains(&e.as_str()))
}

/// The image submitted as the search query.
///
/// At most one of file or URL is active at a time. The input controller
/// refuses to set one while the other is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProbeInput {
    #[default]
    None,
    File(ProbeFile),
    Url(String),
}

impl ProbeInput {
    pub fn kind(&self) -> ProbeKind {
        match self {
            ProbeInput::None => ProbeKind::None,
            ProbeInput::File(_) => ProbeKind::File,
            ProbeInput::Url(_) => ProbeKind::Url,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ProbeInput::None)
    }
}

/// Tag of a [`ProbeInput`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeKind {
    None,
    File,
    Url,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_known_extensions_case_insensitive() {
        for name in ["a.jpg", "b.JPEG", "c.Png", "d.gif", "e.webp"] {
            assert!(ProbeFile::new(name, vec![1, 2, 3]).is_ok(), "{} should be accepted", name);
        }
    }

    #[test]
    fn test_rejects_unknown_extension() {
        let err = ProbeFile::new("notes.txt", vec![1]).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("notes.txt"));

        assert!(ProbeFile::new("no_extension", vec![1]).is_err());
    }

    #[test]
    fn test_rejects_empty_file() {
        assert!(ProbeFile::new("empty.png", Vec::new()).is_err());
    }

    #[test]
    fn test_mime_type_from_extension() {
        assert_eq!(ProbeFile::new("x.PNG", vec![1]).unwrap().mime_type(), "image/png");
        assert_eq!(ProbeFile::new("x.jpeg", vec![1]).unwrap().mime_type(), "image/jpeg");
        assert_eq!(ProbeFile::new("x.webp", vec![1]).unwrap().mime_type(), "image/webp");
    }

    #[test]
    fn test_debug_omits_bytes() {
        let file = ProbeFile::new("x.gif", vec![7; 4096]).unwrap();
        let debug = format!("{:?}", file);
        assert!(debug.contains("len: 4096"));
        assert!(!debug.contains("7, 7"));
    }

    #[test]
    fn test_probe_kind() {
        assert_eq!(ProbeInput::default().kind(), ProbeKind::None);
        assert_eq!(ProbeInput::Url("u".into()).kind(), ProbeKind::Url);
        let file = ProbeFile::new("x.jpg", vec![1]).unwrap();
        assert_eq!(ProbeInput::File(file).kind(), ProbeKind::File);
    }
}
