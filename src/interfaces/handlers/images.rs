use actix_web::{get, post, web, HttpResponse};

use crate::{entities::image::IngestRequest, errors::AppError, AppState};

#[post("/")]
pub async fn ingest_image(
    state: web::Data<AppState>,
    request: web::Json<IngestRequest>,
) -> Result<HttpResponse, AppError> {
    let record = state.image_handler.ingest(request.into_inner()).await?;

    Ok(HttpResponse::Ok().json(record))
}

#[get("/list")]
pub async fn list_images(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let keys = state.image_handler.list_objects().await?;

    if keys.is_empty() {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::Ok().json(keys))
    }
}
