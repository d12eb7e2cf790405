use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::paper::errors::PaperError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for PaperError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name, message) = match &self {
            PaperError::NoInput => (StatusCode::BAD_REQUEST, "ValidationError", "paper.no_input"),
            PaperError::InvalidLink => (
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "paper.invalid_link",
            ),
            PaperError::DownloadFailed => (
                StatusCode::BAD_GATEWAY,
                "DownloadError",
                "paper.download_failed",
            ),
            PaperError::InvalidPdf => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "InvalidPdf",
                "paper.invalid_pdf",
            ),
            PaperError::OcrFailed => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "OcrError",
                "paper.ocr_failed",
            ),
            PaperError::OcrTimeout => (
                StatusCode::GATEWAY_TIMEOUT,
                "OcrTimeout",
                "paper.ocr_timeout",
            ),
            PaperError::MarkdownMissing => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalError",
                "paper.markdown_missing",
            ),
            PaperError::Storage(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalError",
                "storage.failure",
            ),
        };

        (status, Json(ErrorResponse::new(name, message)))
    }
}
