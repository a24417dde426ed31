use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use careerstack_engine::PipelineError;
use serde_json::json;
use stack_logging::stack_error;
use thiserror::Error;

/// Client-visible request failures. Configuration and validation problems
/// map to 400 with an explanatory message; everything else is a 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Configuration(String),
    #[error("{0}")]
    Validation(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::NoCompanies => {
                ApiError::Configuration("No companies CSV found on server.".to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Configuration(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            stack_error!("request failed: {self}");
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
