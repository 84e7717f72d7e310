//! REST API endpoint for text analysis

use actix_web::{HttpResponse, post, web};

use crate::api::error::ApiError;
use crate::model::AnalysisRequest;
use crate::service::AnalysisService;

/// Analyze text with the requested task
#[utoipa::path(
    post,
    path = "/analyze",
    request_body = AnalysisRequest,
    responses(
        (status = 200, description = "Task-shaped analysis result", body = crate::model::AnalysisResponse),
        (status = 400, description = "Missing text or task, or unsupported task", body = crate::api::error::ErrorResponse),
        (status = 500, description = "Chat API call failed or returned unusable output", body = crate::api::error::ErrorResponse)
    ),
    tag = "analysis"
)]
#[post("/analyze")]
pub async fn analyze(
    service: web::Data<AnalysisService>,
    body: web::Json<AnalysisRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner().validate()?;

    tracing::info!(
        task = %request.task,
        text_length = request.text.len(),
        "Analysis requested"
    );

    let response = service.analyze(&request.text, request.task).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// Configure analysis routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(analyze);
}
