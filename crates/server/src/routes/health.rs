use actix_web::{get, HttpResponse};

use crate::types::HealthResponse;

#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
    })
}
