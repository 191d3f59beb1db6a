use std::{path::PathBuf, sync::Arc};

use tracing::{error, info, warn};
use validator::Validate;

use crate::{
    entities::image::{ImageName, ImageRecord, IngestRequest, NewImageRecord, StoredObject},
    errors::AppError,
    repositories::{image::ImageRepository, image_source::ImageSource, object_store::ObjectStore},
};

pub struct ImageHandler {
    pub image_repo: Arc<dyn ImageRepository>,
    pub object_store: Arc<dyn ObjectStore>,
    pub image_source: Arc<dyn ImageSource>,
    pub scratch_dir: PathBuf,
}

impl ImageHandler {
    pub fn new(
        image_repo: Arc<dyn ImageRepository>,
        object_store: Arc<dyn ObjectStore>,
        image_source: Arc<dyn ImageSource>,
        scratch_dir: PathBuf,
    ) -> Self {
        ImageHandler {
            image_repo,
            object_store,
            image_source,
            scratch_dir,
        }
    }

    /// Downloads the image behind `request.url`, stores it and records it.
    ///
    /// The row is written only after the upload succeeded. If the insert then
    /// fails, the uploaded object is deleted again, unless the key already held
    /// an object that earlier rows may still point at.
    pub async fn ingest(&self, request: IngestRequest) -> Result<ImageRecord, AppError> {
        request.validate()?;

        let name = ImageName::from_url(&request.url)?;
        let stored = self.fetch_and_store(&request.url, &name).await?;
        let new_image = NewImageRecord::new(&name, request.url, &stored);

        match self.image_repo.insert_image(&new_image).await {
            Ok(record) => {
                info!(id = record.id, key = %stored.key, "Image recorded");
                Ok(record)
            }
            Err(e) => {
                error!(key = %stored.key, "Failed to record image: {}", e);
                if stored.replaced {
                    warn!(key = %stored.key, "Object predates this request, leaving it in place");
                } else if let Err(cleanup) = self.object_store.delete_object(&stored.key).await {
                    error!(key = %stored.key, "Failed to remove orphaned object: {}", cleanup);
                }
                Err(e)
            }
        }
    }

    /// Streams `url` into a scratch file, uploads it as `name` and removes the
    /// scratch file on every path. Early returns drop the file, which deletes it.
    pub async fn fetch_and_store(
        &self,
        url: &str,
        name: &ImageName,
    ) -> Result<StoredObject, AppError> {
        let scratch = tempfile::Builder::new()
            .prefix("download-")
            .suffix(&format!(".{}", name.extension()))
            .tempfile_in(&self.scratch_dir)?;

        self.image_source.download_to(url, scratch.path()).await?;

        let replaced = match self.object_store.object_exists(name.file_name()).await {
            Ok(exists) => exists,
            Err(e) => {
                warn!(key = %name.file_name(), "Existence check failed, treating key as shared: {}", e);
                true
            }
        };

        let uploaded = self
            .object_store
            .upload_file(scratch.path(), name.file_name())
            .await;

        if let Err(e) = scratch.close() {
            warn!("Failed to remove scratch file: {}", e);
        }

        if !uploaded {
            return Err(AppError::UploadFailed(format!(
                "could not store {} in bucket {}",
                name.file_name(),
                self.object_store.bucket()
            )));
        }

        Ok(StoredObject::new(self.object_store.bucket(), name.file_name(), replaced))
    }

    /// Keys of every object in the bucket.
    pub async fn list_objects(&self) -> Result<Vec<String>, AppError> {
        self.object_store.list_keys().await
    }
}
