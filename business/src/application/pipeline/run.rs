use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tokio::sync::mpsc;

use crate::domain::logger::Logger;
use crate::domain::paper::model::PaperSource;
use crate::domain::paper::progress::{ConversionStage, ProgressReporter};
use crate::domain::paper::use_cases::convert::{ConvertPaperParams, ConvertPaperUseCase};
use crate::domain::pipeline::errors::PipelineError;
use crate::domain::pipeline::model::{PipelineEvent, PipelineStream};
use crate::domain::pipeline::use_cases::run::{RunPipelineParams, RunPipelineUseCase};
use crate::domain::summary::model::SummaryStream;
use crate::domain::summary::use_cases::summarize_final::{
    SummarizeFinalParams, SummarizeFinalUseCase,
};
use crate::domain::summary::use_cases::summarize_sections::{
    SummarizeSectionsParams, SummarizeSectionsUseCase,
};

pub struct RunPipelineUseCaseImpl {
    pub convert: Arc<dyn ConvertPaperUseCase>,
    pub summarize_sections: Arc<dyn SummarizeSectionsUseCase>,
    pub summarize_final: Arc<dyn SummarizeFinalUseCase>,
    pub logger: Arc<dyn Logger>,
}

impl RunPipelineUseCase for RunPipelineUseCaseImpl {
    fn execute(&self, params: RunPipelineParams) -> PipelineStream {
        let (sender, receiver) = mpsc::unbounded_channel();
        let run = PipelineRun {
            convert: self.convert.clone(),
            summarize_sections: self.summarize_sections.clone(),
            summarize_final: self.summarize_final.clone(),
            logger: self.logger.clone(),
            sender,
        };
        tokio::spawn(run.drive(params.source));

        stream::unfold(receiver, |mut receiver| async move {
            receiver.recv().await.map(|event| (event, receiver))
        })
        .boxed()
    }
}

/// Forwards conversion stages into the event channel.
struct ChannelProgress {
    sender: mpsc::UnboundedSender<PipelineEvent>,
}

impl ProgressReporter for ChannelProgress {
    fn report(&self, stage: ConversionStage) {
        let _ = self.sender.send(PipelineEvent::Progress {
            fraction: stage.fraction(),
            description: stage.description().to_string(),
        });
    }
}

/// State of one background run. Stops as soon as the receiving side is gone.
struct PipelineRun {
    convert: Arc<dyn ConvertPaperUseCase>,
    summarize_sections: Arc<dyn SummarizeSectionsUseCase>,
    summarize_final: Arc<dyn SummarizeFinalUseCase>,
    logger: Arc<dyn Logger>,
    sender: mpsc::UnboundedSender<PipelineEvent>,
}

impl PipelineRun {
    async fn drive(self, source: PaperSource) {
        let progress = ChannelProgress {
            sender: self.sender.clone(),
        };

        let conversion = tokio::select! {
            result = self.convert.execute(ConvertPaperParams { source }, &progress) => result,
            _ = self.sender.closed() => {
                self.logger.info("Pipeline cancelled during conversion");
                return;
            }
        };
        let paper = match conversion {
            Ok(paper) => paper,
            Err(err) => return self.fail(err.into()),
        };

        let markdown = paper.markdown.clone();
        if !self.emit(PipelineEvent::Markdown {
            paper_id: paper.id,
            markdown: paper.markdown,
        }) {
            return;
        }

        let sections = self
            .summarize_sections
            .execute(SummarizeSectionsParams { markdown });
        let Some(section_summaries) = self.forward(sections, PipelineEvent::SectionSummary).await
        else {
            return;
        };

        let final_summary = self
            .summarize_final
            .execute(SummarizeFinalParams { section_summaries });
        if self
            .forward(final_summary, PipelineEvent::FinalSummary)
            .await
            .is_some()
        {
            self.logger.info("Pipeline finished");
        }
    }

    /// Relays every update and returns the last one, or `None` if the run
    /// failed or was abandoned.
    async fn forward(
        &self,
        mut updates: SummaryStream,
        wrap: fn(String) -> PipelineEvent,
    ) -> Option<String> {
        let mut latest = String::new();
        loop {
            let update = tokio::select! {
                update = updates.next() => update,
                _ = self.sender.closed() => {
                    self.logger.info("Pipeline cancelled during summarization");
                    return None;
                }
            };
            let Some(update) = update else {
                break;
            };
            match update {
                Ok(text) => {
                    latest.clone_from(&text);
                    if !self.emit(wrap(text)) {
                        return None;
                    }
                }
                Err(err) => {
                    self.fail(err.into());
                    return None;
                }
            }
        }
        Some(latest)
    }

    fn emit(&self, event: PipelineEvent) -> bool {
        if self.sender.send(event).is_err() {
            self.logger.info("Pipeline consumer went away, stopping");
            return false;
        }
        true
    }

    fn fail(&self, err: PipelineError) {
        self.logger.error(&format!("Pipeline failed: {}", err));
        let _ = self.sender.send(PipelineEvent::Failed(err));
    }
}
