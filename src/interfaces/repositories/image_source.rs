use std::path::Path;

use async_trait::async_trait;

use crate::errors::AppError;

#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Streams the body behind `url` into `destination` and returns the number
    /// of bytes written. A non-success status is a `BadRequest`.
    async fn download_to(&self, url: &str, destination: &Path) -> Result<u64, AppError>;
}
