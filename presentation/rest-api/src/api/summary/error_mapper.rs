use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::summary::errors::SummaryError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for SummaryError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name, message) = match &self {
            SummaryError::NothingToSummarize => (
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "summary.nothing_to_summarize",
            ),
            SummaryError::ModelRequestFailed => (
                StatusCode::BAD_GATEWAY,
                "ModelUnavailable",
                "summary.model_request_failed",
            ),
            SummaryError::ModelRejected => (
                StatusCode::BAD_GATEWAY,
                "ModelError",
                "summary.model_rejected",
            ),
            SummaryError::StreamInterrupted => (
                StatusCode::BAD_GATEWAY,
                "ModelError",
                "summary.stream_interrupted",
            ),
        };

        (status, Json(ErrorResponse::new(name, message)))
    }
}
