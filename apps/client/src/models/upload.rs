use std::path::Path;

use anyhow::{Context, Result};
use bytes::Bytes;

use crate::errors::ValidationError;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOC: &str = "application/msword";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Content types the parsing service accepts.
pub const ALLOWED_CONTENT_TYPES: &[&str] = &[MIME_PDF, MIME_DOC, MIME_DOCX];

/// 10 MiB, inclusive.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// A resume document chosen by the user. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// File metadata safe to hand to views without the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    pub content_type: String,
    pub size: u64,
}

impl UploadedFile {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk, declaring its content type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read '{}'", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume".to_string());
        let content_type = content_type_for_path(path);
        Ok(Self::new(name, content_type, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn info(&self) -> FileInfo {
        FileInfo {
            name: self.name.clone(),
            content_type: self.content_type.clone(),
            size: self.size(),
        }
    }

    /// Checks the declared type against the allow-list, then the size ceiling.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !ALLOWED_CONTENT_TYPES.contains(&self.content_type.as_str()) {
            return Err(ValidationError::UnsupportedFileType {
                content_type: self.content_type.clone(),
            });
        }
        if self.size() > MAX_UPLOAD_BYTES {
            return Err(ValidationError::FileTooLarge {
                size: self.size(),
                max: MAX_UPLOAD_BYTES,
            });
        }
        Ok(())
    }
}

fn content_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => MIME_PDF,
        "doc" => MIME_DOC,
        "docx" => MIME_DOCX,
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn file_of(content_type: &str, size: usize) -> UploadedFile {
        UploadedFile::new("resume", content_type, vec![0u8; size])
    }

    #[test]
    fn test_allowed_types_pass() {
        for ct in ALLOWED_CONTENT_TYPES {
            assert!(file_of(ct, 1024).validate().is_ok(), "{ct} should pass");
        }
    }

    #[test]
    fn test_executable_rejected() {
        let err = file_of("application/x-msdownload", 1024).validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnsupportedFileType {
                content_type: "application/x-msdownload".to_string()
            }
        );
    }

    #[test]
    fn test_size_ceiling_is_inclusive() {
        assert!(file_of(MIME_PDF, MAX_UPLOAD_BYTES as usize).validate().is_ok());
        let err = file_of(MIME_PDF, MAX_UPLOAD_BYTES as usize + 1)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ValidationError::FileTooLarge { .. }));
    }

    #[test]
    fn test_type_checked_before_size() {
        let err = file_of("image/png", MAX_UPLOAD_BYTES as usize + 1)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedFileType { .. }));
    }

    #[test]
    fn test_info_reports_size() {
        let info = file_of(MIME_DOCX, 2048).info();
        assert_eq!(info.size, 2048);
        assert_eq!(info.content_type, MIME_DOCX);
    }

    #[test]
    fn test_content_type_from_extension() {
        assert_eq!(content_type_for_path(Path::new("cv.PDF")), MIME_PDF);
        assert_eq!(content_type_for_path(Path::new("cv.doc")), MIME_DOC);
        assert_eq!(content_type_for_path(Path::new("cv.docx")), MIME_DOCX);
        assert_eq!(
            content_type_for_path(Path::new("setup.exe")),
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn test_from_path_reads_bytes() {
        let mut tmp = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        tmp.write_all(b"%PDF-1.7 fake").unwrap();

        let file = UploadedFile::from_path(tmp.path()).await.unwrap();
        assert_eq!(file.content_type, MIME_PDF);
        assert_eq!(file.bytes.as_ref(), b"%PDF-1.7 fake");
        assert!(file.name.ends_with(".pdf"));
    }

    #[tokio::test]
    async fn test_from_path_missing_file() {
        assert!(UploadedFile::from_path("/definitely/not/here.pdf").await.is_err());
    }
}
