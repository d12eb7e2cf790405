use std::sync::Arc;

use futures::stream::{BoxStream, StreamExt};
use poem_openapi::{
    OpenApi,
    payload::{EventStream, Json},
};

use business::domain::paper::errors::PaperError;
use business::domain::paper::link::normalize_pdf_link;
use business::domain::paper::model::{PaperSource, is_pdf};
use business::domain::pipeline::use_cases::run::{RunPipelineParams, RunPipelineUseCase};

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::paper::dto::UploadPaperRequest;
use crate::api::pipeline::dto::{PipelineEventResponse, RunPipelineRequest};
use crate::api::summary::routes::KEEP_ALIVE;
use crate::api::tags::ApiTags;

pub struct PipelineApi {
    run_use_case: Arc<dyn RunPipelineUseCase>,
}

impl PipelineApi {
    pub fn new(run_use_case: Arc<dyn RunPipelineUseCase>) -> Self {
        Self { run_use_case }
    }

    fn run(&self, source: PaperSource) -> RunPipelineResponse {
        let events: BoxStream<'static, PipelineEventResponse> = self
            .run_use_case
            .execute(RunPipelineParams { source })
            .map(PipelineEventResponse::from)
            .boxed();
        RunPipelineResponse::Ok(EventStream::new(events).keep_alive(KEEP_ALIVE))
    }
}

/// Pipeline API
///
/// Converts a paper, summarizes its sections and then the whole paper, all in
/// one server-sent event stream. Closing the connection stops the run.
#[OpenApi]
impl PipelineApi {
    /// Run the pipeline on a PDF link
    #[oai(path = "/pipeline", method = "post", tag = "ApiTags::Pipeline")]
    async fn run_link(&self, body: Json<RunPipelineRequest>) -> RunPipelineResponse {
        if let Err(err) = normalize_pdf_link(&body.0.pdf_link) {
            return RunPipelineResponse::from_error(err);
        }
        self.run(PaperSource::Link(body.0.pdf_link))
    }

    /// Run the pipeline on an uploaded PDF
    ///
    /// Accepts a multipart form with a single `file` field.
    #[oai(path = "/pipeline/upload", method = "post", tag = "ApiTags::Pipeline")]
    async fn run_upload(&self, form: UploadPaperRequest) -> RunPipelineResponse {
        match form.into_source().await {
            Some(PaperSource::Upload { bytes, .. }) if bytes.is_empty() => {
                RunPipelineResponse::from_error(PaperError::NoInput)
            }
            Some(PaperSource::Upload { bytes, .. }) if !is_pdf(&bytes) => {
                RunPipelineResponse::from_error(PaperError::InvalidPdf)
            }
            Some(source) => self.run(source),
            None => RunPipelineResponse::from_error(PaperError::NoInput),
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum RunPipelineResponse {
    #[oai(status = 200)]
    Ok(EventStream<BoxStream<'static, PipelineEventResponse>>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 422)]
    Unprocessable(Json<ErrorResponse>),
}

impl RunPipelineResponse {
    fn from_error(err: PaperError) -> Self {
        let (status, json) = err.into_error_response();
        match status.as_u16() {
            422 => RunPipelineResponse::Unprocessable(json),
            _ => RunPipelineResponse::BadRequest(json),
        }
    }
}
