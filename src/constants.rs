/// Extensions accepted for ingestion, compared case-sensitively.
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["jpeg", "jpg", "png", "gif"];

/// Width of the `downloads.name` column.
pub const MAX_NAME_LEN: usize = 200;

pub const STORAGE_SCHEME: &str = "s3";

pub const HEALTH_MESSAGE: &str = "App is healthy";

pub const INVALID_URL: &str = "Invalid URL";
