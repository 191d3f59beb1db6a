use actix_web::web;

use crate::handlers::images::{ingest_image, list_images};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(ingest_image)
        .service(list_images);
}
