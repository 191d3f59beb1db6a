use std::path::Path;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::{
    config::{Builder as S3ConfigBuilder, Credentials},
    error::DisplayErrorContext,
    primitives::ByteStream,
    Client,
};
use tracing::{error, info, instrument};
use zeroize::Zeroizing;

use crate::{errors::AppError, repositories::object_store::ObjectStore, settings::AppConfig};

const LIST_PAGE_SIZE: i32 = 1000;

#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        S3ObjectStore {
            client,
            bucket: bucket.into(),
        }
    }

    /// Builds the client from the default AWS chain, overridden by any static
    /// credentials or custom endpoint in `config`.
    pub async fn from_config(config: &AppConfig) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.aws_region.clone()))
            .load()
            .await;

        let mut builder = S3ConfigBuilder::from(&sdk_config);

        if let (Some(key_id), Some(secret)) =
            (&config.aws_access_key_id, &config.aws_secret_access_key)
        {
            let secret = Zeroizing::new(secret.clone());
            builder = builder.credentials_provider(Credentials::new(
                key_id,
                secret.as_str(),
                None,
                None,
                "image-to-s3-config",
            ));
        }

        if let Some(endpoint) = &config.s3_endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Self::new(Client::from_conf(builder.build()), &config.s3_bucket)
    }
}

fn storage_error<E: std::error::Error>(operation: &str, err: E) -> AppError {
    AppError::StorageError(format!("{} failed: {}", operation, DisplayErrorContext(&err)))
}

/// MIME type guessed from the file's magic bytes, read on the blocking pool.
async fn sniff_content_type(path: &Path) -> Option<String> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || infer::get_from_path(path))
        .await
        .ok()?
        .ok()?
        .map(|kind| kind.mime_type().to_string())
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    #[instrument(name = "S3ObjectStore::object_exists", skip(self), fields(bucket = %self.bucket))]
    async fn object_exists(&self, key: &str) -> Result<bool, AppError> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if e.as_service_error().is_some_and(|se| se.is_not_found()) => Ok(false),
            Err(e) => Err(storage_error("head_object", e)),
        }
    }

    #[instrument(name = "S3ObjectStore::upload_file", skip(self, path), fields(bucket = %self.bucket))]
    async fn upload_file(&self, path: &Path, key: &str) -> bool {
        let body = match ByteStream::from_path(path).await {
            Ok(body) => body,
            Err(e) => {
                error!("Failed to open {} for upload: {}", path.display(), e);
                return false;
            }
        };

        // unknown formats fall back to the bucket default
        let content_type = sniff_content_type(path).await;

        match self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .set_content_type(content_type)
            .send()
            .await
        {
            Ok(_) => {
                info!("Object uploaded");
                true
            }
            Err(e) => {
                error!(error = %DisplayErrorContext(&e), "S3 put_object failed");
                false
            }
        }
    }

    #[instrument(name = "S3ObjectStore::delete_object", skip(self), fields(bucket = %self.bucket))]
    async fn delete_object(&self, key: &str) -> Result<(), AppError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| storage_error("delete_object", e))?;

        info!("Object deleted");
        Ok(())
    }

    #[instrument(name = "S3ObjectStore::list_keys", skip(self), fields(bucket = %self.bucket))]
    async fn list_keys(&self) -> Result<Vec<String>, AppError> {
        let mut keys = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let resp = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .max_keys(LIST_PAGE_SIZE)
                .set_continuation_token(continuation_token.take())
                .send()
                .await
                .map_err(|e| storage_error("list_objects_v2", e))?;

            keys.extend(
                resp.contents()
                    .iter()
                    .filter_map(|object| object.key().map(str::to_string)),
            );

            match resp.next_continuation_token() {
                Some(token) => continuation_token = Some(token.to_string()),
                None => return Ok(keys),
            }
        }
    }
}
