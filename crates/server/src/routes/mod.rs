mod health;
mod summarize;
mod transcribe;

use actix_cors::Cors;
use actix_web::web;

use crate::error::ApiError;

/// Register every route plus the JSON body error handler
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::new(400, format!("Invalid request body: {}", err)).into());

    cfg.app_data(json_config)
        .service(health::health)
        .service(transcribe::transcribe)
        .service(summarize::summarize);
}

/// Any origin, method and header
pub fn cors() -> Cors {
    Cors::permissive()
}
