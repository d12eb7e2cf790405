use std::sync::Arc;

use futures::future;
use futures::stream::{self, StreamExt, TryStreamExt};

use crate::domain::logger::Logger;
use crate::domain::summary::errors::SummaryError;
use crate::domain::summary::model::{SummaryStream, accumulate};
use crate::domain::summary::prompts::final_summary_prompt;
use crate::domain::summary::services::ChatModelService;
use crate::domain::summary::use_cases::summarize_final::{
    SummarizeFinalParams, SummarizeFinalUseCase,
};

pub struct SummarizeFinalUseCaseImpl {
    pub model: Arc<dyn ChatModelService>,
    pub logger: Arc<dyn Logger>,
}

impl SummarizeFinalUseCase for SummarizeFinalUseCaseImpl {
    fn execute(&self, params: SummarizeFinalParams) -> SummaryStream {
        if params.section_summaries.trim().is_empty() {
            self.logger.warn("No section summaries to combine");
            return stream::once(future::ready(Err(SummaryError::NothingToSummarize))).boxed();
        }

        self.logger.info(&format!(
            "Generating final summary from {} characters of section summaries",
            params.section_summaries.len()
        ));

        let model = self.model.clone();
        let logger = self.logger.clone();
        let prompt = final_summary_prompt(&params.section_summaries);
        let pieces = stream::once(async move { model.stream(prompt).await })
            .try_flatten()
            .inspect_err(move |err| logger.error(&format!("Final summary failed: {}", err)));

        accumulate(pieces.boxed())
    }
}
