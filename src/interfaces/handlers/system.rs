use actix_web::{get, HttpResponse, Responder};

use crate::constants::HEALTH_MESSAGE;

#[get("/ping")]
pub async fn ping() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "message": HEALTH_MESSAGE }))
}
