//! Photo attachments for troubleshooting requests

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fs;
use std::path::Path;

use crate::error::{ErrorCode, PlannerError, Result};

/// Image types the vision model accepts from us
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// An image ready to be sent inline with a prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageAttachment {
    /// Read a JPEG or PNG from disk
    pub fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime_type = mime_for(path)?;
        let bytes = fs::read(path).map_err(|e| {
            PlannerError::from(e).with_context(format!("reading image {}", path.display()))
        })?;
        Self::new(file_name, mime_type, bytes)
    }

    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let file_name = file_name.into();
        if bytes.is_empty() {
            return Err(PlannerError::validation_with_code(
                ErrorCode::VALIDATION_UNSUPPORTED_IMAGE,
                format!("{} is empty", file_name),
                Some("image".to_string()),
            ));
        }
        Ok(Self {
            file_name,
            mime_type: mime_type.into(),
            bytes,
        })
    }

    /// Inline `data:` URL with the image base64-encoded
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

fn mime_for(path: &Path) -> Result<String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(PlannerError::validation_with_code(
            ErrorCode::VALIDATION_UNSUPPORTED_IMAGE,
            format!(
                "{} is not a supported image (use {})",
                path.display(),
                SUPPORTED_EXTENSIONS.join(", ")
            ),
            Some("image".to_string()),
        ));
    }

    Ok(mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_png_becomes_data_url() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("crumb.PNG");
        fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let image = ImageAttachment::from_path(&path).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.file_name, "crumb.PNG");
        assert_eq!(image.to_data_url(), "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn test_jpeg_mime_type() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("loaf.jpg");
        fs::write(&path, b"jpeg").unwrap();

        let image = ImageAttachment::from_path(&path).unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
    }

    #[test]
    fn test_rejects_other_file_types() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.gif");
        fs::write(&path, b"GIF89a").unwrap();

        let err = ImageAttachment::from_path(&path).unwrap_err();
        assert_eq!(err.code(), ErrorCode::VALIDATION_UNSUPPORTED_IMAGE);
    }

    #[test]
    fn test_rejects_empty_and_missing_files() {
        let temp_dir = TempDir::new().unwrap();
        let empty = temp_dir.path().join("empty.jpeg");
        fs::write(&empty, b"").unwrap();
        assert!(ImageAttachment::from_path(&empty).is_err());

        let missing = temp_dir.path().join("missing.png");
        let err = ImageAttachment::from_path(&missing).unwrap_err();
        assert_eq!(err.code(), ErrorCode::STORAGE_NOT_FOUND);
    }
}
