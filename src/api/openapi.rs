//! OpenAPI specification endpoints

use actix_web::{HttpResponse, Responder, get};
use utoipa::OpenApi;

use crate::api::error::ApiError;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Content Refiner",
        description = "Paraphrasing, humanizing, AI-detection and plagiarism estimates backed by a Groq chat model"
    ),
    paths(crate::api::analyze::analyze, crate::api::health::health),
    components(schemas(
        crate::model::AnalysisRequest,
        crate::model::AnalysisResponse,
        crate::api::error::ErrorResponse,
        crate::api::health::HealthStatus
    )),
    tags(
        (name = "analysis", description = "Text analysis tasks"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> Result<HttpResponse, ApiError> {
    let yaml = ApiDoc::openapi().to_yaml().map_err(|e| {
        tracing::error!(error = %e, "Failed to render OpenAPI YAML");
        ApiError::Internal
    })?;

    Ok(HttpResponse::Ok().content_type("text/yaml").body(yaml))
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}
