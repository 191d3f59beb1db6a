use actix_web::{error::JsonPayloadError, web};

use crate::errors::AppError;

const MAX_JSON_BODY: usize = 16 * 1024;

/// Body extraction failures (malformed JSON, missing `url`, wrong content
/// type) become a 400 and oversized bodies a 413, both as JSON errors.
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(MAX_JSON_BODY)
            .error_handler(|err, _req| json_payload_error(err).into()),
    );
}

fn json_payload_error(err: JsonPayloadError) -> AppError {
    let message = format!("JSON payload error: {}", err);
    match err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            AppError::PayloadTooLarge(message)
        }
        _ => AppError::BadRequest(message),
    }
}
