//! Unified API error handling
//!
//! Every failure reaches the client as `{"error": ..., "request_id": ...}`.
//! Upstream details are logged here and never included in the body.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::RequestValidationError;
use crate::service::AnalysisError;
use crate::service::sanitizer::SanitizeError;

/// Standard error response format
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Unique request ID, also present in the server log
    pub request_id: String,
}

/// Unified API error type
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Missing or unsupported input (400)
    #[error("{0}")]
    BadRequest(String),

    /// Chat API call failed or returned no text (500)
    #[error("Groq API request failed.")]
    ExternalService,

    /// Model output could not be turned into the expected JSON (500)
    #[error("Failed to parse model JSON response.")]
    MalformedOutput,

    /// Missing API key or similar server-side misconfiguration (500)
    #[error("Internal server error")]
    Configuration,

    /// Unknown route (404)
    #[error("Not found")]
    NotFound,

    /// Anything else (500)
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    fn error_type(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::ExternalService => "external_service_error",
            ApiError::MalformedOutput => "malformed_model_output",
            ApiError::Configuration => "configuration_error",
            ApiError::NotFound => "not_found",
            ApiError::Internal => "internal_error",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::ExternalService
            | ApiError::MalformedOutput
            | ApiError::Configuration
            | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let request_id = Uuid::new_v4().to_string();

        if status.is_server_error() {
            tracing::error!(
                error_type = self.error_type(),
                status = status.as_u16(),
                request_id = %request_id,
                message = %self,
                "API error"
            );
        } else {
            tracing::warn!(
                error_type = self.error_type(),
                status = status.as_u16(),
                request_id = %request_id,
                message = %self,
                "Request rejected"
            );
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: self.to_string(),
            request_id,
        })
    }
}

// ============================================================================
// From conversions for service errors
// ============================================================================

impl From<RequestValidationError> for ApiError {
    fn from(err: RequestValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        tracing::error!(error = %err, "Analysis failed");

        if err.is_configuration() {
            return ApiError::Configuration;
        }

        match err {
            AnalysisError::ExternalCall { .. } => ApiError::ExternalService,
            AnalysisError::MalformedModelOutput {
                source: SanitizeError::MissingContent,
                ..
            } => ApiError::ExternalService,
            AnalysisError::MalformedModelOutput { .. } => ApiError::MalformedOutput,
        }
    }
}
