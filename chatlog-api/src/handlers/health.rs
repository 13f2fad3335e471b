use crate::storage::Datastore;
use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub datastore: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResponse {
    pub version: String,
    pub service: String,
}

/// Liveness only; does not touch the database.
#[get("/health")]
pub async fn health_check(datastore: web::Data<Datastore>) -> impl Responder {
    let datastore = if datastore.is_configured() {
        "configured"
    } else {
        "unconfigured"
    };

    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        datastore: datastore.to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

#[get("/version")]
pub async fn version_info() -> impl Responder {
    HttpResponse::Ok().json(VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        service: "chatlog-api".to_string(),
    })
}
