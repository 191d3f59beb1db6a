use actix_web::web;

use crate::handlers::{home::home, system::ping};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home)
        .service(ping);
}
