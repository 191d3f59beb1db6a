use std::path::Path;

use async_trait::async_trait;

use crate::errors::AppError;

/// Bucket-scoped blob storage.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    fn bucket(&self) -> &str;

    async fn object_exists(&self, key: &str) -> Result<bool, AppError>;

    /// Uploads the file at `path` under `key`. Failures are logged by the
    /// implementation and reported as `false`.
    async fn upload_file(&self, path: &Path, key: &str) -> bool;

    async fn delete_object(&self, key: &str) -> Result<(), AppError>;

    /// Every key in the bucket.
    async fn list_keys(&self) -> Result<Vec<String>, AppError>;
}
