use actix_cors::Cors;
use actix_web::web;

pub mod config;
pub mod error;
pub mod handlers;
pub mod storage;

/// Registers every endpoint under `/api`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(handlers::health::health_check)
            .service(handlers::health::version_info)
            .service(handlers::conversations::list_conversations)
            .service(handlers::conversations::list_messages),
    );
}

/// Read-only CORS policy; an empty origin list allows any origin.
pub fn cors_middleware(config: &config::CorsConfig) -> Cors {
    let cors = if config.allowed_origins.is_empty() {
        Cors::default().allow_any_origin()
    } else {
        config
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods(vec!["GET"])
        .allow_any_header()
        .max_age(3600)
}
