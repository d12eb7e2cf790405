use std::sync::Arc;
use std::time::Duration;

use futures::stream::{BoxStream, StreamExt};
use poem_openapi::{
    OpenApi,
    payload::{EventStream, Json},
};

use business::domain::summary::errors::SummaryError;
use business::domain::summary::model::SummaryStream;
use business::domain::summary::use_cases::summarize_final::{
    SummarizeFinalParams, SummarizeFinalUseCase,
};
use business::domain::summary::use_cases::summarize_sections::{
    SummarizeSectionsParams, SummarizeSectionsUseCase,
};

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::summary::dto::{
    SummarizeFinalRequest, SummarizeSectionsRequest, SummaryEventResponse,
};
use crate::api::tags::ApiTags;

pub const KEEP_ALIVE: Duration = Duration::from_secs(15);

pub struct SummaryApi {
    summarize_sections_use_case: Arc<dyn SummarizeSectionsUseCase>,
    summarize_final_use_case: Arc<dyn SummarizeFinalUseCase>,
}

impl SummaryApi {
    pub fn new(
        summarize_sections_use_case: Arc<dyn SummarizeSectionsUseCase>,
        summarize_final_use_case: Arc<dyn SummarizeFinalUseCase>,
    ) -> Self {
        Self {
            summarize_sections_use_case,
            summarize_final_use_case,
        }
    }
}

fn events(updates: SummaryStream) -> SummaryStreamResponse {
    let events: BoxStream<'static, SummaryEventResponse> =
        updates.map(SummaryEventResponse::from).boxed();
    SummaryStreamResponse::Ok(EventStream::new(events).keep_alive(KEEP_ALIVE))
}

/// Summary API
///
/// Streams chat model summaries as server-sent events. Every event carries the
/// whole text generated so far. A failure arrives as a final `error` event.
#[OpenApi]
impl SummaryApi {
    /// Summarize every section of a paper
    ///
    /// Splits the Markdown on its headers and summarizes each section in order.
    /// Each section's summary is preceded by its deepest header.
    #[oai(path = "/summaries/sections", method = "post", tag = "ApiTags::Summaries")]
    async fn summarize_sections(
        &self,
        body: Json<SummarizeSectionsRequest>,
    ) -> SummaryStreamResponse {
        if body.0.markdown.trim().is_empty() {
            return SummaryStreamResponse::from_error(SummaryError::NothingToSummarize);
        }

        events(
            self.summarize_sections_use_case
                .execute(SummarizeSectionsParams {
                    markdown: body.0.markdown,
                }),
        )
    }

    /// Summarize the whole paper
    ///
    /// Combines section summaries into one summary with key contributions,
    /// takeaways and questions for the authors.
    #[oai(path = "/summaries/final", method = "post", tag = "ApiTags::Summaries")]
    async fn summarize_final(&self, body: Json<SummarizeFinalRequest>) -> SummaryStreamResponse {
        if body.0.section_summaries.trim().is_empty() {
            return SummaryStreamResponse::from_error(SummaryError::NothingToSummarize);
        }

        events(
            self.summarize_final_use_case.execute(SummarizeFinalParams {
                section_summaries: body.0.section_summaries,
            }),
        )
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum SummaryStreamResponse {
    #[oai(status = 200)]
    Ok(EventStream<BoxStream<'static, SummaryEventResponse>>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
}

impl SummaryStreamResponse {
    fn from_error(err: SummaryError) -> Self {
        let (_, json) = err.into_error_response();
        SummaryStreamResponse::BadRequest(json)
    }
}
