//! Employee photo types

use serde::{Deserialize, Serialize};

use hris_shared::constants::{ALLOWED_PHOTO_MIME, MAX_PHOTO_SIZE};

use crate::error::DomainError;

/// Accepted photo content types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhotoMime {
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/png")]
    Png,
    #[serde(rename = "image/gif")]
    Gif,
}

impl PhotoMime {
    /// Parse a declared content type. `image/jpg` is accepted as JPEG.
    pub fn parse(content_type: &str) -> Result<Self, DomainError> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "image/jpeg" | "image/jpg" => Ok(PhotoMime::Jpeg),
            "image/png" => Ok(PhotoMime::Png),
            "image/gif" => Ok(PhotoMime::Gif),
            _ => Err(DomainError::BadRequest(format!(
                "unsupported photo type '{}', expected one of: {}",
                content_type.trim(),
                ALLOWED_PHOTO_MIME.join(", ")
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PhotoMime::Jpeg => "image/jpeg",
            PhotoMime::Png => "image/png",
            PhotoMime::Gif => "image/gif",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            PhotoMime::Jpeg => "jpg",
            PhotoMime::Png => "png",
            PhotoMime::Gif => "gif",
        }
    }
}

/// Stored photo: where it lives and what it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRef {
    pub url: String,
    pub mime: PhotoMime,
}

impl PhotoRef {
    pub fn new(url: String, mime: PhotoMime) -> Self {
        Self { url, mime }
    }
}

/// Raw photo bytes with their declared type, checked against the size cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    bytes: Vec<u8>,
    mime: PhotoMime,
}

impl PhotoUpload {
    pub fn new(bytes: Vec<u8>, content_type: &str) -> Result<Self, DomainError> {
        if bytes.is_empty() {
            return Err(DomainError::BadRequest("photo is empty".into()));
        }
        if bytes.len() > MAX_PHOTO_SIZE {
            return Err(DomainError::PhotoTooLarge);
        }
        let mime = PhotoMime::parse(content_type)?;
        Ok(Self { bytes, mime })
    }

    pub fn mime(&self) -> PhotoMime {
        self.mime
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Object key for this upload: `employees/{employee_id}/{photo_id}.{ext}`.
    pub fn object_key(&self, employee_id: &str, photo_id: &str) -> String {
        format!(
            "employees/{}/{}.{}",
            employee_id,
            photo_id,
            self.mime.extension()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_known_types() {
        assert_eq!(PhotoMime::parse("image/jpeg").unwrap(), PhotoMime::Jpeg);
        assert_eq!(PhotoMime::parse("image/jpg").unwrap(), PhotoMime::Jpeg);
        assert_eq!(PhotoMime::parse("IMAGE/PNG").unwrap(), PhotoMime::Png);
        assert_eq!(PhotoMime::parse("image/gif; charset=binary").unwrap(), PhotoMime::Gif);
    }

    #[test]
    fn test_parse_rejects_other_types() {
        for ct in ["image/webp", "application/pdf", "", "text/plain"] {
            assert!(matches!(PhotoMime::parse(ct), Err(DomainError::BadRequest(_))), "{ct}");
        }
    }

    #[test]
    fn test_upload_size_limit() {
        let exact = vec![0u8; MAX_PHOTO_SIZE];
        assert!(PhotoUpload::new(exact, "image/png").is_ok());

        let over = vec![0u8; MAX_PHOTO_SIZE + 1];
        assert_eq!(PhotoUpload::new(over, "image/png"), Err(DomainError::PhotoTooLarge));

        assert!(matches!(
            PhotoUpload::new(Vec::new(), "image/png"),
            Err(DomainError::BadRequest(_))
        ));
    }

    #[test]
    fn test_object_key() {
        let upload = PhotoUpload::new(vec![1, 2, 3], "image/jpg").unwrap();
        assert_eq!(upload.object_key("emp-1", "p-9"), "employees/emp-1/p-9.jpg");
    }
}
