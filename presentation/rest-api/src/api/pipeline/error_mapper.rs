use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::pipeline::errors::PipelineError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for PipelineError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        match self {
            PipelineError::Paper(err) => err.into_error_response(),
            PipelineError::Summary(err) => err.into_error_response(),
        }
    }
}
