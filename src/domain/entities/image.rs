use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    constants::{ALLOWED_EXTENSIONS, MAX_NAME_LEN, STORAGE_SCHEME},
    errors::AppError,
};

/// A row of the `downloads` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ImageRecord {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub s3_path: String,
    pub timestamp: String,
}

// For inserts, `id` is assigned by the database
#[derive(Debug, Clone, PartialEq)]
pub struct NewImageRecord {
    pub name: String,
    pub url: String,
    pub s3_path: String,
    pub timestamp: String,
}

impl NewImageRecord {
    pub fn new(name: &ImageName, url: String, stored: &StoredObject) -> Self {
        NewImageRecord {
            name: name.file_name().to_string(),
            url,
            s3_path: stored.storage_path.clone(),
            timestamp: stored.uploaded_at.to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct IngestRequest {
    #[validate(
        length(min = 1, max = 2048, message = "url must be 1 to 2048 characters long"),
        url(message = "url must be a valid URL")
    )]
    pub url: String,
}

/// The file name taken from the last path segment of a source URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageName {
    file_name: String,
    dot: usize,
}

impl ImageName {
    /// Splits the text after the last `/` on its last `.` and checks the
    /// extension against [`ALLOWED_EXTENSIONS`]. Names longer than the
    /// `downloads.name` column are a `BadRequest`.
    pub fn from_url(url: &str) -> Result<Self, AppError> {
        let file_name = url.rsplit('/').next().unwrap_or(url);

        let dot = file_name.rfind('.').ok_or_else(unsupported_format)?;
        let extension = &file_name[dot + 1..];

        if !ALLOWED_EXTENSIONS.contains(&extension) {
            return Err(unsupported_format());
        }
        if file_name.chars().count() > MAX_NAME_LEN {
            return Err(AppError::BadRequest(format!(
                "Image name cannot exceed {} characters",
                MAX_NAME_LEN
            )));
        }

        Ok(ImageName {
            file_name: file_name.to_string(),
            dot,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn extension(&self) -> &str {
        &self.file_name[self.dot + 1..]
    }
}

fn unsupported_format() -> AppError {
    AppError::NotFound(format!(
        "Image format not found. Accepted are {}",
        ALLOWED_EXTENSIONS.join(", ")
    ))
}

/// Result of a confirmed upload.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub key: String,
    pub storage_path: String,
    pub uploaded_at: DateTime<Utc>,
    /// The key already held an object, which earlier rows may point at.
    pub replaced: bool,
}

impl StoredObject {
    pub fn new(bucket: &str, key: &str, replaced: bool) -> Self {
        StoredObject {
            key: key.to_string(),
            storage_path: storage_path(bucket, key),
            uploaded_at: Utc::now(),
            replaced,
        }
    }
}

pub fn storage_path(bucket: &str, key: &str) -> String {
    format!("{STORAGE_SCHEME}://{bucket}/{key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_name_from_last_segment() {
        let name = ImageName::from_url("https://example.com/photos/cat.png").unwrap();

        assert_eq!(name.file_name(), "cat.png");
        assert_eq!(name.extension(), "png");
    }

    #[test]
    fn splits_on_the_last_dot() {
        let name = ImageName::from_url("https://cdn.example.com/a/b/holiday.2024.jpeg").unwrap();

        assert_eq!(name.file_name(), "holiday.2024.jpeg");
        assert_eq!(name.extension(), "jpeg");
    }

    #[test]
    fn accepts_every_allowed_extension() {
        for ext in ALLOWED_EXTENSIONS {
            let url = format!("http://example.com/img.{ext}");
            assert!(ImageName::from_url(&url).is_ok(), "{ext} should be accepted");
        }
    }

    #[test]
    fn extension_match_is_case_sensitive() {
        let err = ImageName::from_url("https://example.com/CAT.PNG").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn rejects_unknown_or_missing_extensions() {
        for url in [
            "https://example.com/photo.bmp",
            "https://example.com/photo",
            "https://example.com/",
            "https://example.com/photo.png?size=large",
        ] {
            let err = ImageName::from_url(url).unwrap_err();
            assert!(matches!(err, AppError::NotFound(_)), "{url} should be rejected");
        }
    }

    #[test]
    fn rejection_lists_accepted_formats() {
        let err = ImageName::from_url("https://example.com/doc.pdf").unwrap_err();
        assert_eq!(err.to_string(), "Image format not found. Accepted are jpeg, jpg, png, gif");
    }

    #[test]
    fn stored_object_points_into_bucket() {
        let stored = StoredObject::new("env-s-img1-bucket1", "cat.png", false);
        assert_eq!(stored.storage_path, "s3://env-s-img1-bucket1/cat.png");
    }

    #[test]
    fn new_record_copies_upload_details() {
        let name = ImageName::from_url("https://example.com/photos/cat.png").unwrap();
        let stored = StoredObject::new("bucket", name.file_name(), false);
        let record = NewImageRecord::new(&name, "https://example.com/photos/cat.png".into(), &stored);

        assert_eq!(record.name, "cat.png");
        assert_eq!(record.s3_path, "s3://bucket/cat.png");
        assert!(DateTime::parse_from_rfc3339(&record.timestamp).is_ok());
    }

    #[test]
    fn name_length_is_capped_at_the_column_width() {
        let fits = format!("https://example.com/{}.png", "a".repeat(MAX_NAME_LEN - 4));
        assert!(ImageName::from_url(&fits).is_ok());

        let too_long = format!("https://example.com/{}.png", "a".repeat(MAX_NAME_LEN - 3));
        let err = ImageName::from_url(&too_long).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn ingest_request_caps_url_length() {
        let base = "https://example.com/";
        let fits = format!("{}{}.png", base, "a".repeat(2048 - base.len() - 4));
        assert_eq!(fits.len(), 2048);
        assert!(IngestRequest { url: fits }.validate().is_ok());

        let too_long = format!("{}{}.png", base, "a".repeat(2048 - base.len() - 3));
        assert!(IngestRequest { url: too_long }.validate().is_err());
    }

    #[test]
    fn ingest_request_requires_a_valid_url() {
        assert!(IngestRequest { url: "".into() }.validate().is_err());
        assert!(IngestRequest { url: "not a url".into() }.validate().is_err());
        assert!(IngestRequest { url: "https://example.com/cat.png".into() }.validate().is_ok());
    }
}
