use std::sync::Arc;

use futures::future;
use futures::stream::{self, StreamExt, TryStreamExt};

use crate::domain::logger::Logger;
use crate::domain::summary::errors::SummaryError;
use crate::domain::summary::model::{SummaryStream, accumulate};
use crate::domain::summary::prompts::section_summary_prompt;
use crate::domain::summary::services::ChatModelService;
use crate::domain::summary::splitter::split_by_headers;
use crate::domain::summary::use_cases::summarize_sections::{
    SummarizeSectionsParams, SummarizeSectionsUseCase,
};

pub struct SummarizeSectionsUseCaseImpl {
    pub model: Arc<dyn ChatModelService>,
    pub logger: Arc<dyn Logger>,
}

impl SummarizeSectionsUseCase for SummarizeSectionsUseCaseImpl {
    fn execute(&self, params: SummarizeSectionsParams) -> SummaryStream {
        let sections = split_by_headers(&params.markdown);
        if sections.is_empty() {
            self.logger.warn("No Markdown sections to summarize");
            return stream::once(future::ready(Err(SummaryError::NothingToSummarize))).boxed();
        }

        self.logger
            .info(&format!("Summarizing {} sections", sections.len()));

        let model = self.model.clone();
        let logger = self.logger.clone();
        let pieces = stream::iter(sections)
            .flat_map(move |section| {
                let model = model.clone();
                let heading = section.heading_line();
                let prompt = section_summary_prompt(&section);
                let tokens = stream::once(async move { model.stream(prompt).await }).try_flatten();
                stream::once(future::ready(Ok(heading))).chain(tokens)
            })
            .inspect_err(move |err| logger.error(&format!("Section summary failed: {}", err)));

        accumulate(pieces.boxed())
    }
}
