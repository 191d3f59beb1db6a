use std::{path::PathBuf, sync::Arc};

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod telemetry;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{db, fetch, storage, utils, web};

use repositories::{image::ImageRepository, image_source::ImageSource, object_store::ObjectStore};
use use_cases::images::ImageHandler;

pub struct AppState {
    pub image_handler: ImageHandler,
    pub readme_path: PathBuf,
}

impl AppState {
    pub fn new(
        config: &settings::AppConfig,
        image_repo: Arc<dyn ImageRepository>,
        object_store: Arc<dyn ObjectStore>,
        image_source: Arc<dyn ImageSource>,
    ) -> Self {
        let image_handler = ImageHandler::new(
            image_repo,
            object_store,
            image_source,
            config.scratch_dir.clone(),
        );

        AppState {
            image_handler,
            readme_path: config.readme_path.clone(),
        }
    }
}
