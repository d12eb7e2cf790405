use futures::stream::BoxStream;

use crate::domain::paper::model::PaperId;

use super::errors::PipelineError;

/// One observable step of a full paper run.
#[derive(Debug)]
pub enum PipelineEvent {
    Progress { fraction: f64, description: String },
    Markdown { paper_id: PaperId, markdown: String },
    /// Accumulated per-section summary so far.
    SectionSummary(String),
    /// Accumulated final summary so far.
    FinalSummary(String),
    /// Terminal. No event follows it.
    Failed(PipelineError),
}

pub type PipelineStream = BoxStream<'static, PipelineEvent>;
