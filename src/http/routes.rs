use crate::http;
use actix_web::web;

/// Mount every HTTP sub-module under `/api`.
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(http::auth::init_routes)
            .configure(http::users::init_routes)
            .configure(http::tournaments::init_routes)
            .configure(http::rankings::init_routes)
            .configure(http::health::init_routes),
    );
}
