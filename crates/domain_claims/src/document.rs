//! Supporting documents attached to claims

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DocumentError;

/// Default upload limit (5 MB)
pub const DEFAULT_MAX_DOCUMENT_BYTES: u64 = 5 * 1024 * 1024;

/// An uploaded file as received from the caller
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    /// File name as supplied by the uploader
    pub file_name: String,
    /// Declared MIME type, informational only
    pub content_type: Option<String>,
    /// File contents
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lower-cased extension including the leading dot, e.g. `.pdf`
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
    }

    /// Final path component with anything outside `[A-Za-z0-9._-]` replaced by `_`
    ///
    /// Directory components supplied by the uploader are dropped.
    pub fn safe_file_name(&self) -> Result<String, DocumentError> {
        let base = Path::new(&self.file_name)
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| DocumentError::InvalidFileName(self.file_name.clone()))?;

        let cleaned: String = base
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
            .collect();

        if cleaned.trim_start_matches('.').is_empty() {
            return Err(DocumentError::InvalidFileName(self.file_name.clone()));
        }
        Ok(cleaned)
    }
}

// File contents stay out of logs.
impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Stable reference to a stored document, e.g. `/uploads/0190..._timesheet.pdf`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentRef(String);

impl DocumentRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which uploads are acceptable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentPolicy {
    /// Extensions with or without the leading dot, compared case-insensitively
    pub allowed_extensions: Vec<String>,
    pub max_size_bytes: u64,
}

impl Default for DocumentPolicy {
    fn default() -> Self {
        Self {
            allowed_extensions: vec![".pdf".to_string(), ".docx".to_string(), ".xlsx".to_string()],
            max_size_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }
}

impl DocumentPolicy {
    pub fn allows_extension(&self, extension: &str) -> bool {
        let wanted = extension.trim_start_matches('.');
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(wanted))
    }

    /// Checks an attachment against the allow-list and size limit
    pub fn check(&self, attachment: &Attachment) -> Result<(), DocumentError> {
        if attachment.is_empty() {
            return Err(DocumentError::Empty);
        }
        attachment.safe_file_name()?;

        let extension = attachment.extension().unwrap_or_default();
        if extension.is_empty() || !self.allows_extension(&extension) {
            return Err(DocumentError::DisallowedType {
                extension,
                allowed: self.allowed_extensions.join(", "),
            });
        }

        if attachment.size() > self.max_size_bytes {
            return Err(DocumentError::TooLarge {
                size: attachment.size(),
                max: self.max_size_bytes,
            });
        }
        Ok(())
    }
}
