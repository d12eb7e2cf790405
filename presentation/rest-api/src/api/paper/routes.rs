use std::sync::Arc;

use poem_openapi::{OpenApi, payload::Json};

use business::domain::paper::errors::PaperError;
use business::domain::paper::model::PaperSource;
use business::domain::paper::progress::NoProgress;
use business::domain::paper::use_cases::convert::{ConvertPaperParams, ConvertPaperUseCase};

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::paper::dto::{ConvertPaperRequest, ConvertedPaperResponse, UploadPaperRequest};
use crate::api::tags::ApiTags;

pub struct PaperApi {
    convert_use_case: Arc<dyn ConvertPaperUseCase>,
}

impl PaperApi {
    pub fn new(convert_use_case: Arc<dyn ConvertPaperUseCase>) -> Self {
        Self { convert_use_case }
    }

    async fn convert(&self, source: PaperSource) -> ConvertPaperResponse {
        match self
            .convert_use_case
            .execute(ConvertPaperParams { source }, &NoProgress)
            .await
        {
            Ok(paper) => ConvertPaperResponse::Ok(Json(paper.into())),
            Err(err) => ConvertPaperResponse::from_error(err),
        }
    }
}

/// Paper conversion API
///
/// Endpoints that run Nougat OCR on a PDF and return its Markdown.
#[OpenApi]
impl PaperApi {
    /// Convert a PDF link
    ///
    /// Downloads the PDF behind the link and converts it with Nougat.
    /// The call blocks until OCR finishes, which can take several minutes.
    #[oai(path = "/papers", method = "post", tag = "ApiTags::Papers")]
    async fn convert_link(&self, body: Json<ConvertPaperRequest>) -> ConvertPaperResponse {
        self.convert(body.0.into()).await
    }

    /// Convert an uploaded PDF
    ///
    /// Accepts a multipart form with a single `file` field.
    #[oai(path = "/papers/upload", method = "post", tag = "ApiTags::Papers")]
    async fn convert_upload(&self, form: UploadPaperRequest) -> ConvertPaperResponse {
        match form.into_source().await {
            Some(source) => self.convert(source).await,
            None => ConvertPaperResponse::from_error(PaperError::NoInput),
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum ConvertPaperResponse {
    #[oai(status = 200)]
    Ok(Json<ConvertedPaperResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 422)]
    Unprocessable(Json<ErrorResponse>),
    #[oai(status = 502)]
    BadGateway(Json<ErrorResponse>),
    #[oai(status = 504)]
    GatewayTimeout(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl ConvertPaperResponse {
    fn from_error(err: PaperError) -> Self {
        let (status, json) = err.into_error_response();
        match status.as_u16() {
            400 => ConvertPaperResponse::BadRequest(json),
            422 => ConvertPaperResponse::Unprocessable(json),
            502 => ConvertPaperResponse::BadGateway(json),
            504 => ConvertPaperResponse::GatewayTimeout(json),
            _ => ConvertPaperResponse::InternalError(json),
        }
    }
}
