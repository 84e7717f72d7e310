//! HTTP API

pub mod analyze;
pub mod error;
pub mod health;
pub mod openapi;

use actix_web::{HttpResponse, web};

use error::ApiError;

/// Maximum accepted JSON body size
const JSON_BODY_LIMIT: usize = 1024 * 1024;

/// JSON extractor settings; malformed or oversized bodies answer 400
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(|err, _req| {
            ApiError::BadRequest(format!("Invalid JSON body: {}", err)).into()
        })
}

/// Register all routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .configure(analyze::configure)
        .configure(health::configure)
        .configure(openapi::configure);
}

/// Fallback for unknown routes
pub async fn not_found() -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound)
}
