use actix_web::{get, http::header::ContentType, web, HttpResponse};

use crate::{errors::AppError, utils::markdown::render_markdown_file, AppState};

/// Serves the README as HTML.
#[get("/")]
pub async fn home(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let html = render_markdown_file(&state.readme_path).await?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(html))
}
