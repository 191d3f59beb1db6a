use actix_web::web;

mod images;
mod json_error;
mod system;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(json_error::config_routes);
    cfg.configure(system::config_routes);
    cfg.configure(images::config_routes);
}
