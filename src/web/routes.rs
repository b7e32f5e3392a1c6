use actix_web::web;

use crate::error::ApiError;
use crate::web::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::InvalidRequest(err.to_string()).into()),
    )
    .service(
        web::scope("/api")
            .route("/chat", web::post().to(handlers::chat))
            .route("/generate-problem", web::post().to(handlers::generate_problem)),
    )
    .route("/health", web::get().to(handlers::health_check));
}
